//! Numeric precision configuration
//!
//! Precision is carried explicitly by the caller and handed to every
//! quadrature primitive. There is no process-wide precision setting.

use serde::{Deserialize, Serialize};

/// Decimal places targeted by default (standard double-precision work)
pub const DEFAULT_DECIMAL_PLACES: u32 = 8;

/// Largest number of decimal places a double can meaningfully resolve
pub const MAX_DECIMAL_PLACES: u32 = 15;

/// Default subdivision budget for adaptive quadrature
pub const DEFAULT_MAX_SUBDIVISIONS: usize = 200;

/// Precision settings for the integration primitives
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericConfig {
    /// Number of significant decimal places the quadrature aims for
    pub decimal_places: u32,

    /// Absolute error floor below which an interval is accepted outright
    pub absolute_tolerance: f64,

    /// Maximum number of interval subdivisions before giving up
    pub max_subdivisions: usize,
}

impl Default for NumericConfig {
    fn default() -> Self {
        Self::double()
    }
}

impl NumericConfig {
    /// Standard double-precision settings
    pub fn double() -> Self {
        Self {
            decimal_places: DEFAULT_DECIMAL_PLACES,
            absolute_tolerance: 1e-14,
            max_subdivisions: DEFAULT_MAX_SUBDIVISIONS,
        }
    }

    /// Opt into a tighter (or looser) target for ill-conditioned parameters.
    ///
    /// Values above [`MAX_DECIMAL_PLACES`] are clamped.
    pub fn with_decimal_places(decimal_places: u32) -> Self {
        let decimal_places = decimal_places.clamp(1, MAX_DECIMAL_PLACES);
        Self {
            decimal_places,
            // Extra places need room to subdivide
            max_subdivisions: DEFAULT_MAX_SUBDIVISIONS
                * (1 + decimal_places.saturating_sub(DEFAULT_DECIMAL_PLACES) as usize),
            ..Self::double()
        }
    }

    /// Set the subdivision budget
    pub fn with_max_subdivisions(mut self, max_subdivisions: usize) -> Self {
        self.max_subdivisions = max_subdivisions;
        self
    }

    /// Set the absolute error floor
    pub fn with_absolute_tolerance(mut self, absolute_tolerance: f64) -> Self {
        self.absolute_tolerance = absolute_tolerance;
        self
    }

    /// Relative tolerance implied by the decimal places
    #[inline]
    pub fn relative_tolerance(&self) -> f64 {
        10f64.powi(-(self.decimal_places as i32))
    }
}
