//! Point-wise density evaluation

use crate::config::{PDF_INITIAL_PARTITIONS, PDF_WINDOW_SIGMAS};
use crate::kernel::DensityKernel;
use crate::params::{DerivedMoments, DistributionParameters};
use gammadiff_core::{AdaptiveGaussKronrod, Integrator, KronrodRule, NumericConfig, Result};

/// Density of `X1 - X2`, obtained by integrating [`DensityKernel`] over
/// `[|z|, center + 100·standard_err]`.
///
/// Everything that does not depend on `z` is computed once at construction.
#[derive(Debug, Clone)]
pub struct PdfEvaluator {
    params: DistributionParameters,
    moments: DerivedMoments,
    log_normalizer: f64,
    upper_limit: f64,
    integrator: AdaptiveGaussKronrod,
}

impl PdfEvaluator {
    /// Create an evaluator with the given precision settings
    pub fn new(params: DistributionParameters, numeric: NumericConfig) -> Self {
        let moments = params.moments();
        Self {
            params,
            moments,
            log_normalizer: params.log_normalizer(),
            upper_limit: moments.offset(PDF_WINDOW_SIGMAS),
            integrator: AdaptiveGaussKronrod::new(KronrodRule::G10K21, numeric)
                .with_initial_partitions(PDF_INITIAL_PARTITIONS),
        }
    }

    /// Parameters of the distribution
    pub fn params(&self) -> &DistributionParameters {
        &self.params
    }

    /// Center and dispersion scale
    pub fn moments(&self) -> &DerivedMoments {
        &self.moments
    }

    /// Upper end of the integration window, `center + 100·standard_err`.
    ///
    /// The density is exactly 0 at and beyond this point.
    pub fn upper_limit(&self) -> f64 {
        self.upper_limit
    }

    /// Density at `z`.
    ///
    /// An empty integration window (`|z|` at or beyond the upper limit) has
    /// no mass and yields 0. Quadrature failures propagate.
    pub fn density(&self, z: f64) -> Result<f64> {
        let kernel = DensityKernel::new(
            &self.params,
            z,
            self.log_normalizer,
            self.moments.standard_err,
        );
        let lower = kernel.lower_limit();
        if lower >= self.upper_limit {
            return Ok(0.0);
        }
        let value = self
            .integrator
            .integrate(|x| kernel.evaluate(x), lower, self.upper_limit)?;
        Ok(value.max(0.0))
    }
}
