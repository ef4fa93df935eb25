//! Distribution parameters and the moments derived from them

use gammadiff_core::{math::ln_factorial_below, Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shape and rate of the two Gamma components of `X1 - X2`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionParameters {
    /// Shape of `X1` (positive integer)
    pub alpha_1: u32,
    /// Rate of `X1`
    pub beta_1: f64,
    /// Shape of `X2` (positive integer)
    pub alpha_2: u32,
    /// Rate of `X2`
    pub beta_2: f64,
}

/// Location and dispersion scale of the difference
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedMoments {
    /// Mean of the difference, `alpha_1/beta_1 - alpha_2/beta_2`
    pub center: f64,
    /// `sqrt(alpha_1/beta_1² + alpha_2/beta_2²)`; sizes search windows and steps
    pub standard_err: f64,
}

impl DistributionParameters {
    /// Create validated parameters
    pub fn new(alpha_1: u32, beta_1: f64, alpha_2: u32, beta_2: f64) -> Result<Self> {
        let params = Self {
            alpha_1,
            beta_1,
            alpha_2,
            beta_2,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check `alpha_i >= 1` and finite `beta_i > 0`
    pub fn validate(&self) -> Result<()> {
        Error::check_shape("alpha_1", self.alpha_1)?;
        Error::check_rate("beta_1", self.beta_1)?;
        Error::check_shape("alpha_2", self.alpha_2)?;
        Error::check_rate("beta_2", self.beta_2)?;
        Ok(())
    }

    /// Center and dispersion scale
    pub fn moments(&self) -> DerivedMoments {
        let a1 = self.alpha_1 as f64;
        let a2 = self.alpha_2 as f64;
        DerivedMoments {
            center: a1 / self.beta_1 - a2 / self.beta_2,
            standard_err: (a1 / (self.beta_1 * self.beta_1) + a2 / (self.beta_2 * self.beta_2))
                .sqrt(),
        }
    }

    /// Log of the joint normalising constant of the two Gamma densities
    pub fn log_normalizer(&self) -> f64 {
        self.alpha_1 as f64 * self.beta_1.ln() + self.alpha_2 as f64 * self.beta_2.ln()
            - ln_factorial_below(self.alpha_1)
            - ln_factorial_below(self.alpha_2)
    }
}

impl fmt::Display for DistributionParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Gamma({}, {}) - Gamma({}, {})",
            self.alpha_1, self.beta_1, self.alpha_2, self.beta_2
        )
    }
}

impl DerivedMoments {
    /// `center + k * standard_err`
    #[inline]
    pub fn offset(&self, sigmas: f64) -> f64 {
        self.center + sigmas * self.standard_err
    }
}
