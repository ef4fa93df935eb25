//! Inverse CDF by adaptive accumulation

use crate::accumulator::{AdaptiveStepAccumulator, StopCondition};
use crate::config::{AccumulatorConfig, EXTREME_PROBABILITY};
use crate::pdf::PdfEvaluator;
use gammadiff_core::{Error, Result};
use tracing::{debug, instrument};

/// Whether `y` is too close to 0 or 1 for the walk to resolve.
///
/// Probabilities below 0 or above 1 count as extreme as well.
#[inline]
pub fn is_extreme_probability(y: f64) -> bool {
    y < EXTREME_PROBABILITY || y >= 1.0 - EXTREME_PROBABILITY
}

/// Abscissa at which the cumulative probability first reaches `y`.
///
/// Every `y` outside `[1e-8, 1 - 1e-8)`, including values outside `[0, 1]`,
/// resolves to `f64::INFINITY` without walking; callers treat that as
/// "unbounded". Only NaN is rejected.
#[instrument(skip(pdf, config), level = "debug")]
pub fn inverse_cdf(pdf: &PdfEvaluator, config: AccumulatorConfig, y: f64) -> Result<f64> {
    if y.is_nan() {
        return Err(Error::InvalidProbability { p: y });
    }
    if is_extreme_probability(y) {
        debug!(y, "extreme probability, returning +inf");
        return Ok(f64::INFINITY);
    }

    let mut walk = AdaptiveStepAccumulator::new(pdf, config)?;
    let state = walk.start()?;
    let state = walk.accumulate_until(state, StopCondition::ReachedProbability(y))?;
    let x = state.corrected_abscissa(y);
    debug!(x, samples = walk.samples(), "inverse cdf resolved");
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::DistributionParameters;
    use approx::assert_abs_diff_eq;
    use gammadiff_core::NumericConfig;

    fn laplace(beta: f64) -> PdfEvaluator {
        let params = DistributionParameters::new(1, beta, 1, beta).unwrap();
        PdfEvaluator::new(params, NumericConfig::default())
    }

    #[test]
    fn test_extreme_probabilities() {
        assert!(is_extreme_probability(0.0));
        assert!(is_extreme_probability(1e-9));
        assert!(is_extreme_probability(1.0 - 1e-9));
        assert!(is_extreme_probability(1.0));
        assert!(!is_extreme_probability(1e-8));
        assert!(!is_extreme_probability(0.5));

        let pdf = laplace(1.0);
        let config = AccumulatorConfig::inverse();
        assert_eq!(inverse_cdf(&pdf, config, 1e-9).unwrap(), f64::INFINITY);
        assert_eq!(inverse_cdf(&pdf, config, 1.0 - 1e-9).unwrap(), f64::INFINITY);
    }

    #[test]
    fn test_out_of_range_probabilities_are_unbounded() {
        let pdf = laplace(1.0);
        let config = AccumulatorConfig::inverse();
        for y in [-0.1, -1.0, 1.5, f64::NEG_INFINITY, f64::INFINITY] {
            assert!(is_extreme_probability(y));
            assert_eq!(inverse_cdf(&pdf, config, y).unwrap(), f64::INFINITY);
        }
    }

    #[test]
    fn test_nan_probability_rejected() {
        let pdf = laplace(1.0);
        let err = inverse_cdf(&pdf, AccumulatorConfig::inverse(), f64::NAN).unwrap_err();
        assert!(matches!(err, Error::InvalidProbability { p } if p.is_nan()));
    }

    #[test]
    fn test_laplace_quantiles() {
        // Laplace(0, 1/beta) quantile: ln(2y)/beta below the median
        let beta: f64 = 2.0;
        let pdf = laplace(beta);
        let config = AccumulatorConfig::inverse();
        for y in [0.1_f64, 0.25, 0.5] {
            let expected = (2.0 * y).ln() / beta;
            assert_abs_diff_eq!(inverse_cdf(&pdf, config, y).unwrap(), expected, epsilon = 5e-3);
        }
        let expected = -(2.0_f64 * (1.0 - 0.8)).ln() / beta;
        assert_abs_diff_eq!(inverse_cdf(&pdf, config, 0.8).unwrap(), expected, epsilon = 5e-3);
    }
}
