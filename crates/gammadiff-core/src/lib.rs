//! Core types for gamma-difference distribution computations
//!
//! This crate provides the pieces the distribution crate builds on:
//!
//! - [`Error`] / [`Result`]: the error taxonomy shared by all gammadiff crates
//! - [`NumericConfig`]: explicit, caller-supplied precision settings
//! - [`quadrature`]: adaptive Gauss-Kronrod integration behind the
//!   [`Integrator`] trait
//! - [`math`]: small numeric helpers
//!
//! # Example
//!
//! ```rust
//! use gammadiff_core::{AdaptiveGaussKronrod, Integrator, KronrodRule, NumericConfig};
//!
//! let quad = AdaptiveGaussKronrod::new(KronrodRule::G10K21, NumericConfig::double());
//! let area = quad.integrate(|x| x * x, 0.0, 3.0).unwrap();
//! assert!((area - 9.0).abs() < 1e-10);
//! ```

pub mod error;
pub mod math;
pub mod numeric;
pub mod quadrature;

pub use error::{Error, Result};
pub use numeric::NumericConfig;
pub use quadrature::{AdaptiveGaussKronrod, Estimate, Integrator, KronrodRule, QuadratureError};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::{Integrator, NumericConfig, Result};
}
