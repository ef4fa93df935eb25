//! Gamma-difference distribution toolkit
//!
//! Re-exports the workspace crates:
//!
//! - [`gammadiff_core`]: error taxonomy, numeric precision settings and quadrature
//! - [`gammadiff_distribution`]: pdf, CDF, inverse CDF and segment tables of
//!   `Gamma(alpha_1, beta_1) - Gamma(alpha_2, beta_2)`
//!
//! ```rust,no_run
//! use gammadiff::prelude::*;
//!
//! let dist = GammaDifference::new(50, 10_000.0, 100, 20_000.0)?;
//! let q = dist.inverse_cdf(0.975)?;
//! println!("97.5% quantile: {q:e}");
//! # Ok::<(), Error>(())
//! ```

pub use gammadiff_core;
pub use gammadiff_distribution;

pub use gammadiff_distribution::{
    cdf, cdf_adaptive, cdf_segment, inverse_cdf, pdf, AccumulatorConfig, DistributionParameters,
    Error, GammaDifference, NumericConfig, Result, SegmentTable, DEFAULT_SEGMENTS,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use gammadiff_distribution::prelude::*;
}
