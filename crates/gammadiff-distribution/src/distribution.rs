//! The [`GammaDifference`] distribution object

use crate::accumulator::{AdaptiveStepAccumulator, StopCondition};
use crate::config::{AccumulatorConfig, CDF_CLAMP_SIGMAS};
use crate::direct_cdf::DirectCdfIntegrator;
use crate::inverse;
use crate::params::{DerivedMoments, DistributionParameters};
use crate::pdf::PdfEvaluator;
use crate::segment::{self, SegmentTable};
use gammadiff_core::{Error, NumericConfig, Result};
use std::fmt;
use tracing::{debug, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Distribution of `X1 - X2` with `X1 ~ Gamma(alpha_1, beta_1)` and
/// `X2 ~ Gamma(alpha_2, beta_2)` independent, rates as in `beta·e^{-beta·x}`.
///
/// Immutable once built; every query owns its own walk state, so a single
/// instance can be shared across threads.
///
/// # Example
///
/// ```rust,no_run
/// use gammadiff_distribution::GammaDifference;
///
/// let dist = GammaDifference::new(50, 10_000.0, 100, 20_000.0)?;
/// let median = dist.inverse_cdf(0.5)?;
/// let p = dist.cdf_adaptive(median)?;
/// assert!((p - 0.5).abs() < 1e-3);
/// # Ok::<(), gammadiff_core::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct GammaDifference {
    pdf: PdfEvaluator,
    numeric: NumericConfig,
    inverse_config: AccumulatorConfig,
    cdf_config: AccumulatorConfig,
}

impl GammaDifference {
    /// Create with validated parameters and default precision
    pub fn new(alpha_1: u32, beta_1: f64, alpha_2: u32, beta_2: f64) -> Result<Self> {
        let params = DistributionParameters::new(alpha_1, beta_1, alpha_2, beta_2)?;
        Ok(Self::from_params(params))
    }

    /// Create from already-validated parameters
    pub fn from_params(params: DistributionParameters) -> Self {
        let numeric = NumericConfig::default();
        Self {
            pdf: PdfEvaluator::new(params, numeric),
            numeric,
            inverse_config: AccumulatorConfig::inverse(),
            cdf_config: AccumulatorConfig::artificial_cdf(),
        }
    }

    /// Replace the quadrature precision settings
    pub fn with_numeric_config(mut self, numeric: NumericConfig) -> Self {
        self.pdf = PdfEvaluator::new(*self.pdf.params(), numeric);
        self.numeric = numeric;
        self
    }

    /// Replace the walk configuration of `inverse_cdf` and `cdf_segment`
    pub fn with_accumulator_config(mut self, config: AccumulatorConfig) -> Self {
        self.inverse_config = config;
        self
    }

    /// Replace the walk configuration of `cdf_adaptive`
    pub fn with_cdf_config(mut self, config: AccumulatorConfig) -> Self {
        self.cdf_config = config;
        self
    }

    pub fn params(&self) -> &DistributionParameters {
        self.pdf.params()
    }

    pub fn moments(&self) -> &DerivedMoments {
        self.pdf.moments()
    }

    pub fn numeric_config(&self) -> &NumericConfig {
        &self.numeric
    }

    pub fn accumulator_config(&self) -> &AccumulatorConfig {
        &self.inverse_config
    }

    pub fn cdf_config(&self) -> &AccumulatorConfig {
        &self.cdf_config
    }

    /// Mean of the difference (`center`)
    pub fn mean(&self) -> f64 {
        self.moments().center
    }

    /// Variance of the difference, `alpha_1/beta_1² + alpha_2/beta_2²`
    pub fn variance(&self) -> f64 {
        let se = self.moments().standard_err;
        se * se
    }

    /// Probability density at `z`
    pub fn pdf(&self, z: f64) -> Result<f64> {
        self.pdf.density(z)
    }

    /// Densities at every point of `zs`, in order.
    ///
    /// With the `parallel` feature the points are evaluated on the rayon pool.
    pub fn pdf_batch(&self, zs: &[f64]) -> Result<Vec<f64>> {
        #[cfg(feature = "parallel")]
        {
            zs.par_iter().map(|&z| self.pdf.density(z)).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            zs.iter().map(|&z| self.pdf.density(z)).collect()
        }
    }

    /// Cumulative probability at `z` by nested quadrature
    pub fn cdf(&self, z: f64) -> Result<f64> {
        DirectCdfIntegrator::new(&self.pdf, self.numeric).cdf(z)
    }

    /// Cumulative probability at `z` by adaptive trapezoidal accumulation.
    ///
    /// `z` is clamped to `center + 30·standard_err`; NaN is rejected. The
    /// walk overshoots `z` by at most one step; that part of the last
    /// trapezoid is removed.
    #[instrument(skip(self), level = "debug")]
    pub fn cdf_adaptive(&self, z: f64) -> Result<f64> {
        Error::check_not_nan("z", z)?;
        let z = z.min(self.moments().offset(CDF_CLAMP_SIGMAS));
        let mut walk = AdaptiveStepAccumulator::new(&self.pdf, self.cdf_config)?;
        let state = walk.start()?;
        if state.x > z {
            debug!(x = state.x, "query lies below the seek point");
            return Ok(0.0);
        }
        let state = walk.accumulate_until(state, StopCondition::PastAbscissa(z))?;
        let cdf = state.mass_at(z).min(1.0);
        debug!(cdf, samples = walk.samples(), "adaptive cdf");
        Ok(cdf)
    }

    /// Abscissa at which the CDF reaches `y`; `+∞` for extreme probabilities
    pub fn inverse_cdf(&self, y: f64) -> Result<f64> {
        inverse::inverse_cdf(&self.pdf, self.inverse_config, y)
    }

    /// Table of the `n - 1` boundaries of `n` equal-probability segments
    pub fn cdf_segment(&self, n: usize) -> Result<SegmentTable> {
        segment::cdf_segment(&self.pdf, self.inverse_config, n)
    }
}

impl fmt::Display for GammaDifference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.params())
    }
}
