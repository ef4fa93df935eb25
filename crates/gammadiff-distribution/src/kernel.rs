//! Integrand of the gamma-difference density
//!
//! The density at `z` is `∫ f1(x) f2(x - z) dx`. The integrand is evaluated
//! in log space and exponentiated once, so the large normalising constant and
//! the power terms never overflow on their own.

use crate::config::KERNEL_GUARD_SCALE;
use crate::params::DistributionParameters;

/// Integrand for `z >= 0`; `x` is the value of `X1` and `x - z` that of `X2`.
///
/// Returns exactly 0 when `x - z` is within `standard_err / 10000` of the
/// singular boundary.
#[inline]
pub fn integrand_plus(
    x: f64,
    params: &DistributionParameters,
    z: f64,
    c: f64,
    standard_err: f64,
) -> f64 {
    if KERNEL_GUARD_SCALE * x - KERNEL_GUARD_SCALE * z <= standard_err {
        return 0.0;
    }
    (c + params.beta_2 * z
        + (params.alpha_1 as f64 - 1.0) * x.ln()
        + (params.alpha_2 as f64 - 1.0) * (x - z).ln()
        - (params.beta_1 + params.beta_2) * x)
        .exp()
}

/// Integrand for `z < 0`; `x` is the value of `X2` and `x + z` that of `X1`.
///
/// Returns exactly 0 when `x + z` is within `standard_err / 10000` of the
/// singular boundary.
#[inline]
pub fn integrand_minus(
    x: f64,
    params: &DistributionParameters,
    z: f64,
    c: f64,
    standard_err: f64,
) -> f64 {
    if KERNEL_GUARD_SCALE * x + KERNEL_GUARD_SCALE * z <= standard_err {
        return 0.0;
    }
    (c - params.beta_1 * z
        + (params.alpha_2 as f64 - 1.0) * x.ln()
        + (params.alpha_1 as f64 - 1.0) * (x + z).ln()
        - (params.beta_1 + params.beta_2) * x)
        .exp()
}

/// Which side of zero the query point lies on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    /// `z >= 0`, integrate over `X1`
    Plus,
    /// `z < 0`, integrate over `X2`
    Minus,
}

/// Density integrand bound to one query point `z`
#[derive(Debug, Clone, Copy)]
pub struct DensityKernel<'a> {
    params: &'a DistributionParameters,
    z: f64,
    c: f64,
    standard_err: f64,
    branch: Branch,
}

impl<'a> DensityKernel<'a> {
    /// Bind the integrand to `z` with a precomputed log-normaliser `c`
    pub fn new(params: &'a DistributionParameters, z: f64, c: f64, standard_err: f64) -> Self {
        let branch = if z >= 0.0 { Branch::Plus } else { Branch::Minus };
        Self {
            params,
            z,
            c,
            standard_err,
            branch,
        }
    }

    /// Selected branch
    pub fn branch(&self) -> Branch {
        self.branch
    }

    /// Lower limit of integration: the singular boundary of the branch
    pub fn lower_limit(&self) -> f64 {
        match self.branch {
            Branch::Plus => self.z,
            Branch::Minus => -self.z,
        }
    }

    /// Integrand value at `x`
    #[inline]
    pub fn evaluate(&self, x: f64) -> f64 {
        match self.branch {
            Branch::Plus => integrand_plus(x, self.params, self.z, self.c, self.standard_err),
            Branch::Minus => integrand_minus(x, self.params, self.z, self.c, self.standard_err),
        }
    }
}
