//! Reference CDF by nested quadrature
//!
//! Every outer quadrature node runs a full density integral, so this path is
//! expensive. It exists to cross-check the adaptive walk.

use crate::config::{CDF_CLAMP_SIGMAS, DIRECT_CDF_INITIAL_PARTITIONS, DIRECT_CDF_LOWER_SIGMAS};
use crate::pdf::PdfEvaluator;
use gammadiff_core::{AdaptiveGaussKronrod, Error, Integrator, KronrodRule, NumericConfig, Result};
use tracing::{debug, instrument};

/// Integrates [`PdfEvaluator`] over `[center - 200·standard_err, z]`
#[derive(Debug, Clone)]
pub struct DirectCdfIntegrator<'a> {
    pdf: &'a PdfEvaluator,
    integrator: AdaptiveGaussKronrod,
}

impl<'a> DirectCdfIntegrator<'a> {
    /// Build on an existing density evaluator
    pub fn new(pdf: &'a PdfEvaluator, numeric: NumericConfig) -> Self {
        Self {
            pdf,
            integrator: AdaptiveGaussKronrod::new(KronrodRule::G10K21, numeric)
                .with_initial_partitions(DIRECT_CDF_INITIAL_PARTITIONS),
        }
    }

    /// Cumulative probability at `z`; `z` is clamped to `center + 30·standard_err`.
    ///
    /// A NaN `z` is an [`Error::InvalidParameter`].
    #[instrument(skip(self), level = "debug")]
    pub fn cdf(&self, z: f64) -> Result<f64> {
        Error::check_not_nan("z", z)?;
        let moments = self.pdf.moments();
        let z = z.min(moments.offset(CDF_CLAMP_SIGMAS));
        let lower = moments.offset(-DIRECT_CDF_LOWER_SIGMAS);
        if z <= lower {
            return Ok(0.0);
        }

        let estimate = self
            .integrator
            .try_estimate::<_, Error>(|x| self.pdf.density(x), lower, z)?;
        debug!(
            value = estimate.value,
            error = estimate.error,
            evaluations = estimate.evaluations,
            "direct cdf"
        );
        Ok(estimate.value.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::DistributionParameters;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_laplace_cdf() {
        let beta = 1.0;
        let params = DistributionParameters::new(1, beta, 1, beta).unwrap();
        let pdf = PdfEvaluator::new(params, NumericConfig::default());
        let direct = DirectCdfIntegrator::new(&pdf, NumericConfig::default());

        for &z in &[-2.0, -0.5, 0.0, 0.5, 2.0] {
            let expected = if z < 0.0 {
                0.5 * (beta * z).exp()
            } else {
                1.0 - 0.5 * (-beta * z).exp()
            };
            assert_abs_diff_eq!(direct.cdf(z).unwrap(), expected, epsilon = 2e-3);
        }
    }

    #[test]
    fn test_tails_and_clamp() {
        let params = DistributionParameters::new(4, 2.0, 3, 1.0).unwrap();
        let pdf = PdfEvaluator::new(params, NumericConfig::default());
        let direct = DirectCdfIntegrator::new(&pdf, NumericConfig::default());
        let m = *pdf.moments();

        assert_eq!(direct.cdf(m.offset(-250.0)).unwrap(), 0.0);
        let far = direct.cdf(m.offset(1_000.0)).unwrap();
        let clamped = direct.cdf(m.offset(CDF_CLAMP_SIGMAS)).unwrap();
        assert_eq!(far, clamped);
        assert_abs_diff_eq!(far, 1.0, epsilon = 2e-3);
        assert_eq!(direct.cdf(f64::INFINITY).unwrap(), clamped);
        assert_eq!(direct.cdf(f64::NEG_INFINITY).unwrap(), 0.0);
    }

    #[test]
    fn test_nan_query_rejected() {
        let params = DistributionParameters::new(1, 1.0, 1, 1.0).unwrap();
        let pdf = PdfEvaluator::new(params, NumericConfig::default());
        let direct = DirectCdfIntegrator::new(&pdf, NumericConfig::default());
        assert!(matches!(
            direct.cdf(f64::NAN),
            Err(Error::InvalidParameter(_))
        ));
    }
}
