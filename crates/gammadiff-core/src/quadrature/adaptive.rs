//! Globally adaptive Gauss-Kronrod integration
//!
//! The interval is split into an initial partition, each piece is estimated
//! with a [`KronrodRule`], and the piece carrying the largest error estimate
//! is bisected until the summed error meets the tolerance implied by the
//! [`NumericConfig`].

use super::{Estimate, Integrator, KronrodRule, QuadratureError};
use crate::numeric::NumericConfig;
use ordered_float::OrderedFloat;
use std::collections::BinaryHeap;
use tracing::trace;

/// Adaptive Gauss-Kronrod integrator over a bounded interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptiveGaussKronrod {
    rule: KronrodRule,
    config: NumericConfig,
    initial_partitions: usize,
}

#[derive(Debug, Clone, Copy)]
struct Piece {
    a: f64,
    b: f64,
    estimate: Estimate,
}

impl AdaptiveGaussKronrod {
    /// Create an integrator with the given rule and precision settings
    pub fn new(rule: KronrodRule, config: NumericConfig) -> Self {
        Self {
            rule,
            config,
            initial_partitions: 1,
        }
    }

    /// Split the interval into `n` equal pieces before adapting.
    ///
    /// Useful when the integrand is sharply peaked somewhere in a wide window.
    pub fn with_initial_partitions(mut self, n: usize) -> Self {
        self.initial_partitions = n.max(1);
        self
    }

    /// The rule applied on each piece
    pub fn rule(&self) -> &KronrodRule {
        &self.rule
    }

    /// The precision settings
    pub fn config(&self) -> &NumericConfig {
        &self.config
    }

    fn tolerance(&self, value: f64) -> f64 {
        self.config
            .absolute_tolerance
            .max(self.config.relative_tolerance() * value.abs())
    }

    fn adapt<F, E>(&self, f: &mut F, lo: f64, hi: f64) -> Result<Estimate, E>
    where
        F: FnMut(f64) -> Result<f64, E>,
        E: From<QuadratureError>,
    {
        let n = self.initial_partitions;
        let width = (hi - lo) / n as f64;
        let mut pieces = Vec::with_capacity(n + self.config.max_subdivisions);
        let mut heap = BinaryHeap::with_capacity(n + self.config.max_subdivisions);
        let mut evaluations = 0;

        for i in 0..n {
            let a = lo + width * i as f64;
            let b = if i + 1 == n { hi } else { a + width };
            let estimate = self.rule.apply(f, a, b)?;
            evaluations += estimate.evaluations;
            heap.push((OrderedFloat(estimate.error), pieces.len()));
            pieces.push(Piece { a, b, estimate });
        }

        let mut subdivisions = 0;
        loop {
            let value: f64 = pieces.iter().map(|p| p.estimate.value).sum();
            let error: f64 = pieces.iter().map(|p| p.estimate.error).sum();

            if error <= self.tolerance(value) {
                return Ok(Estimate {
                    value,
                    error,
                    evaluations,
                });
            }

            if subdivisions >= self.config.max_subdivisions {
                return Err(QuadratureError::MaxSubdivisions {
                    limit: self.config.max_subdivisions,
                    error_estimate: error,
                }
                .into());
            }

            let Some((_, worst)) = heap.pop() else {
                return Ok(Estimate {
                    value,
                    error,
                    evaluations,
                });
            };
            let Piece { a, b, .. } = pieces[worst];
            let mid = 0.5 * (a + b);
            if mid <= a || mid >= b {
                // Roundoff floor: the worst piece cannot be split any further
                trace!(a, b, error, "quadrature reached roundoff floor");
                return Ok(Estimate {
                    value,
                    error,
                    evaluations,
                });
            }

            let left = self.rule.apply(f, a, mid)?;
            let right = self.rule.apply(f, mid, b)?;
            evaluations += left.evaluations + right.evaluations;

            pieces[worst] = Piece {
                a,
                b: mid,
                estimate: left,
            };
            heap.push((OrderedFloat(left.error), worst));
            heap.push((OrderedFloat(right.error), pieces.len()));
            pieces.push(Piece {
                a: mid,
                b,
                estimate: right,
            });
            subdivisions += 1;
        }
    }
}

impl Default for AdaptiveGaussKronrod {
    fn default() -> Self {
        Self::new(KronrodRule::G10K21, NumericConfig::default())
    }
}

impl Integrator for AdaptiveGaussKronrod {
    fn try_estimate<F, E>(&self, mut f: F, a: f64, b: f64) -> Result<Estimate, E>
    where
        F: FnMut(f64) -> Result<f64, E>,
        E: From<QuadratureError>,
    {
        if !a.is_finite() || !b.is_finite() {
            return Err(QuadratureError::InvalidInterval { a, b }.into());
        }
        if a == b {
            return Ok(Estimate::default());
        }

        let (lo, hi, sign) = if a < b { (a, b, 1.0) } else { (b, a, -1.0) };
        let estimate = self.adapt(&mut f, lo, hi)?;
        Ok(Estimate {
            value: sign * estimate.value,
            ..estimate
        })
    }
}
