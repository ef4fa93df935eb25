//! Tuning constants and walk configuration
//!
//! The window multiples and ratio thresholds below are empirical
//! stability/efficiency trade-offs. Changing any of them changes results and
//! needs re-validation against the regression oracle in the test suite.

use gammadiff_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// The density integrand is zeroed when `KERNEL_GUARD_SCALE * (x ∓ z) <= standard_err`
pub const KERNEL_GUARD_SCALE: f64 = 10_000.0;

/// Upper limit of the density integral, in dispersion units above center
pub const PDF_WINDOW_SIGMAS: f64 = 100.0;

/// Lower limit of the direct CDF integral, in dispersion units below center
pub const DIRECT_CDF_LOWER_SIGMAS: f64 = 200.0;

/// CDF queries above `center + CDF_CLAMP_SIGMAS * standard_err` are clamped
pub const CDF_CLAMP_SIGMAS: f64 = 30.0;

/// The walk starts this many dispersion units below center
pub const WALK_START_SIGMAS: f64 = 300.0;

/// Step floor is `standard_err / STEP_FLOOR_DIVISOR`
pub const STEP_FLOOR_DIVISOR: f64 = 10_000.0;

/// Initial step of the inverse/segment walks is `standard_err / 30`
pub const INVERSE_STEP_DIVISOR: f64 = 30.0;

/// Initial step of the adaptive CDF walk is `standard_err / 50`
pub const CDF_STEP_DIVISOR: f64 = 50.0;

/// Seeking stops once `pdf * delta` reaches this mass
pub const SEEK_MASS: f64 = 1e-10;

/// Below this local mass `(pdf_curr + pdf_next) * delta` the step is held
pub const NEGLIGIBLE_MASS: f64 = 1e-8;

// The seek loop only runs while the local mass is below NEGLIGIBLE_MASS, so the
// hold wins on every seek step but the last and these thresholds rarely act.

/// Seek phase: double the step below this relative change
pub const SEEK_LOW: f64 = 0.2;

/// Seek phase (inverse/segment): halve the step above this relative change
pub const SEEK_HIGH_INVERSE: f64 = 0.5;

/// Seek phase (adaptive CDF): halve the step above this relative change
pub const SEEK_HIGH_CDF: f64 = 0.6;

/// Accumulation phase: double the step below this relative change
pub const ACCUMULATE_LOW: f64 = 0.001;

/// Accumulation phase: halve the step above this relative change
pub const ACCUMULATE_HIGH: f64 = 0.003;

/// Probabilities below this (or at/above its complement) map to +∞
pub const EXTREME_PROBABILITY: f64 = 1e-8;

/// Default number of segments of a segment table
pub const DEFAULT_SEGMENTS: usize = 200;

/// Default bound on density samples taken by one walk
pub const DEFAULT_MAX_ITERATIONS: usize = 1_000_000;

/// Initial partitions of the density integral window
pub const PDF_INITIAL_PARTITIONS: usize = 8;

/// Initial partitions of the direct CDF integral
pub const DIRECT_CDF_INITIAL_PARTITIONS: usize = 16;

/// Relative-change thresholds driving the step controller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepThresholds {
    /// Below this the step doubles
    pub low: f64,
    /// Above this the step halves
    pub high: f64,
}

impl StepThresholds {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    fn validate(&self, phase: &str) -> Result<()> {
        if !(self.low > 0.0 && self.low < self.high && self.high.is_finite()) {
            return Err(Error::InvalidParameter(format!(
                "{phase} thresholds must satisfy 0 < low < high, got ({}, {})",
                self.low, self.high
            )));
        }
        Ok(())
    }
}

/// Configuration of one adaptive walk
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccumulatorConfig {
    /// Initial step is `standard_err / initial_step_divisor`
    pub initial_step_divisor: f64,

    /// Step floor is `standard_err / floor_divisor`
    pub floor_divisor: f64,

    /// Walk starts at `center - start_sigmas * standard_err`
    pub start_sigmas: f64,

    /// Thresholds used while skipping the negligible left tail
    pub seek: StepThresholds,

    /// Thresholds used while accumulating mass
    pub accumulate: StepThresholds,

    /// Seeking stops once `pdf * delta` reaches this mass
    pub seek_mass: f64,

    /// Local mass below which the step is left unchanged
    pub negligible_mass: f64,

    /// Maximum number of density samples per walk
    pub max_iterations: usize,
}

impl Default for AccumulatorConfig {
    fn default() -> Self {
        Self::inverse()
    }
}

impl AccumulatorConfig {
    /// Walk used by the inverse CDF and the segment table
    pub fn inverse() -> Self {
        Self {
            initial_step_divisor: INVERSE_STEP_DIVISOR,
            floor_divisor: STEP_FLOOR_DIVISOR,
            start_sigmas: WALK_START_SIGMAS,
            seek: StepThresholds::new(SEEK_LOW, SEEK_HIGH_INVERSE),
            accumulate: StepThresholds::new(ACCUMULATE_LOW, ACCUMULATE_HIGH),
            seek_mass: SEEK_MASS,
            negligible_mass: NEGLIGIBLE_MASS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Walk used by the adaptive CDF
    pub fn artificial_cdf() -> Self {
        Self {
            initial_step_divisor: CDF_STEP_DIVISOR,
            seek: StepThresholds::new(SEEK_LOW, SEEK_HIGH_CDF),
            ..Self::inverse()
        }
    }

    /// Set the step floor divisor (smaller divisor, coarser floor)
    pub fn with_floor_divisor(mut self, floor_divisor: f64) -> Self {
        self.floor_divisor = floor_divisor;
        self
    }

    /// Set the initial step divisor
    pub fn with_initial_step_divisor(mut self, initial_step_divisor: f64) -> Self {
        self.initial_step_divisor = initial_step_divisor;
        self
    }

    /// Set the iteration bound
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the accumulation thresholds
    pub fn with_accumulate_thresholds(mut self, low: f64, high: f64) -> Self {
        self.accumulate = StepThresholds::new(low, high);
        self
    }

    /// Check internal consistency
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("initial_step_divisor", self.initial_step_divisor),
            ("floor_divisor", self.floor_divisor),
            ("start_sigmas", self.start_sigmas),
            ("seek_mass", self.seek_mass),
            ("negligible_mass", self.negligible_mass),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidParameter(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }
        if self.max_iterations == 0 {
            return Err(Error::InvalidParameter(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        self.seek.validate("seek")?;
        self.accumulate.validate("accumulate")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let inverse = AccumulatorConfig::inverse();
        assert_eq!(inverse.initial_step_divisor, 30.0);
        assert_eq!(inverse.seek, StepThresholds::new(0.2, 0.5));
        assert_eq!(inverse.accumulate, StepThresholds::new(0.001, 0.003));
        assert!(inverse.validate().is_ok());

        let cdf = AccumulatorConfig::artificial_cdf();
        assert_eq!(cdf.initial_step_divisor, 50.0);
        assert_eq!(cdf.seek.high, 0.6);
        assert_eq!(cdf.accumulate, inverse.accumulate);
        assert!(cdf.validate().is_ok());

        assert_eq!(AccumulatorConfig::default(), inverse);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(AccumulatorConfig::inverse()
            .with_floor_divisor(0.0)
            .validate()
            .is_err());
        assert!(AccumulatorConfig::inverse()
            .with_initial_step_divisor(f64::NAN)
            .validate()
            .is_err());
        assert!(AccumulatorConfig::inverse()
            .with_max_iterations(0)
            .validate()
            .is_err());
        assert!(AccumulatorConfig::inverse()
            .with_accumulate_thresholds(0.01, 0.001)
            .validate()
            .is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = AccumulatorConfig::artificial_cdf().with_max_iterations(42);
        let json = serde_json::to_string(&config).unwrap();
        let back: AccumulatorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
