//! Error types for gamma-difference computations
//!
//! Provides a unified error type for all gammadiff crates.

use crate::quadrature::QuadratureError;
use thiserror::Error;

/// Core error type for gamma-difference operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Probability outside of [0, 1] (or NaN)
    #[error("Probability {p} must be in [0, 1]")]
    InvalidProbability { p: f64 },

    /// The adaptive step fell below its floor before the walk finished
    #[error("Step underflow at x = {x}: step {delta} fell below floor {epsilon}")]
    StepUnderflow { x: f64, delta: f64, epsilon: f64 },

    /// The walk did not reach its stopping condition within the iteration budget
    #[error("Iteration limit of {iterations} reached at x = {x} (cdf = {cdf})")]
    IterationLimit { iterations: usize, x: f64, cdf: f64 },

    /// The walk left the support of the density before collecting the target mass
    #[error("Mass exhausted at x = {x}: collected {reached} of target {target}")]
    MassExhausted { target: f64, reached: f64, x: f64 },

    /// The underlying definite-integral primitive failed
    #[error("Quadrature failure: {0}")]
    Quadrature(#[from] QuadratureError),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check that a probability lies in [0, 1]
    pub fn check_probability(p: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&p) {
            return Err(Error::InvalidProbability { p });
        }
        Ok(())
    }

    /// Check that a shape parameter is a positive integer
    pub fn check_shape(name: &str, alpha: u32) -> Result<()> {
        if alpha == 0 {
            return Err(Error::InvalidParameter(format!(
                "{name} must be a positive integer, got {alpha}"
            )));
        }
        Ok(())
    }

    /// Check that a rate parameter is finite and strictly positive
    pub fn check_rate(name: &str, beta: f64) -> Result<()> {
        if !beta.is_finite() || beta <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "{name} must be finite and positive, got {beta}"
            )));
        }
        Ok(())
    }

    /// Reject a NaN query point
    pub fn check_not_nan(name: &str, value: f64) -> Result<()> {
        if value.is_nan() {
            return Err(Error::InvalidParameter(format!("{name} must not be NaN")));
        }
        Ok(())
    }

    /// Whether this error is a step underflow of the adaptive walk
    pub fn is_step_underflow(&self) -> bool {
        matches!(self, Error::StepUnderflow { .. })
    }
}
