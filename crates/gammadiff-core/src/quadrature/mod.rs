//! Definite-integral primitives
//!
//! The distribution code consumes these through the [`Integrator`] trait and
//! treats them as a black box. Integrands may be fallible so that nested
//! integrals can surface the inner integral's error unchanged.

mod adaptive;
mod rules;

pub use adaptive::AdaptiveGaussKronrod;
pub use rules::KronrodRule;

use thiserror::Error;

/// Failures of the quadrature primitives
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuadratureError {
    /// The subdivision budget ran out before the tolerance was met
    #[error("no convergence after {limit} subdivisions (error estimate {error_estimate:e})")]
    MaxSubdivisions { limit: usize, error_estimate: f64 },

    /// The integrand produced NaN or an infinity
    #[error("integrand is not finite at x = {x} (value {value})")]
    NonFinite { x: f64, value: f64 },

    /// The integration bounds are not finite
    #[error("integration bounds [{a}, {b}] are not finite")]
    InvalidInterval { a: f64, b: f64 },
}

/// Value of an integral together with its error estimate
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Estimate {
    /// Approximated integral
    pub value: f64,
    /// Estimated absolute error
    pub error: f64,
    /// Number of integrand evaluations spent
    pub evaluations: usize,
}

/// A numerical integrator over a bounded interval.
///
/// Reversed bounds (`a > b`) return the negated integral.
pub trait Integrator {
    /// Integrate a fallible integrand on `[a, b]`
    fn try_estimate<F, E>(&self, f: F, a: f64, b: f64) -> Result<Estimate, E>
    where
        F: FnMut(f64) -> Result<f64, E>,
        E: From<QuadratureError>;

    /// Integrate `f` on `[a, b]`, returning the value and its error estimate
    fn estimate<F>(&self, mut f: F, a: f64, b: f64) -> Result<Estimate, QuadratureError>
    where
        F: FnMut(f64) -> f64,
    {
        self.try_estimate(|x| Ok(f(x)), a, b)
    }

    /// Integrate `f` on `[a, b]`
    fn integrate<F>(&self, f: F, a: f64, b: f64) -> Result<f64, QuadratureError>
    where
        F: FnMut(f64) -> f64,
    {
        self.estimate(f, a, b).map(|e| e.value)
    }
}
