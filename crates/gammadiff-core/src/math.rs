//! Mathematical utilities shared by the gamma-difference crates

/// Sum of `ln(i)` for `i` in `[1, n)`.
///
/// This is `ln((n - 1)!)`, i.e. `ln Γ(n)` for a positive integer `n`, which is
/// the log-normaliser of a Gamma density with integer shape `n`.
pub fn ln_factorial_below(n: u32) -> f64 {
    (1..n).map(|i| (i as f64).ln()).sum()
}

/// Relative change between two consecutive samples, `|b - a| / |b + a|`.
///
/// Returns `None` when the denominator is zero or not finite.
#[inline]
pub fn relative_change(a: f64, b: f64) -> Option<f64> {
    let denom = (b + a).abs();
    if denom == 0.0 || !denom.is_finite() {
        return None;
    }
    Some((b - a).abs() / denom)
}
