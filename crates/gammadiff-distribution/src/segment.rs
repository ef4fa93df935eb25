//! Equal-probability segment tables
//!
//! One walk produces the abscissas at probabilities `1/n, 2/n, …, (n-1)/n`.
//! The accumulated mass is never reset between targets, so the table costs
//! about as much as a single inverse CDF near the upper end.

use crate::accumulator::{AdaptiveStepAccumulator, StopCondition};
use crate::config::AccumulatorConfig;
use crate::pdf::PdfEvaluator;
use gammadiff_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Abscissas splitting the distribution into `n` equal-probability segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentTable {
    segments: usize,
    boundaries: Vec<f64>,
}

impl SegmentTable {
    /// Number of segments `n`; the table holds `n - 1` boundaries
    pub fn segments(&self) -> usize {
        self.segments
    }

    /// Number of boundaries
    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.boundaries
    }

    /// Cumulative probability of each boundary, `i / n`
    pub fn probabilities(&self) -> impl Iterator<Item = f64> + '_ {
        let n = self.segments as f64;
        (1..self.segments).map(move |i| i as f64 / n)
    }

    /// Approximate quantile by linear interpolation between boundaries.
    ///
    /// Outside `[1/n, (n-1)/n]` the nearest boundary is returned.
    pub fn quantile(&self, p: f64) -> Result<f64> {
        Error::check_probability(p)?;
        let (first, last) = match (self.boundaries.first(), self.boundaries.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => {
                return Err(Error::InvalidParameter(
                    "segment table has no boundaries".to_string(),
                ))
            }
        };

        // Boundary i (0-based) sits at probability (i + 1) / n
        let pos = p * self.segments as f64 - 1.0;
        if pos <= 0.0 {
            return Ok(first);
        }
        let upper = (self.len() - 1) as f64;
        if pos >= upper {
            return Ok(last);
        }
        let i = pos.floor() as usize;
        let frac = pos - i as f64;
        let lo = self.boundaries[i];
        let hi = self.boundaries[i + 1];
        Ok(lo + frac * (hi - lo))
    }
}

impl AsRef<[f64]> for SegmentTable {
    fn as_ref(&self) -> &[f64] {
        &self.boundaries
    }
}

impl IntoIterator for SegmentTable {
    type Item = f64;
    type IntoIter = std::vec::IntoIter<f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.boundaries.into_iter()
    }
}

/// Build the `n`-segment table with a single walk.
///
/// Requires `n >= 2`. Step underflow anywhere aborts the whole table.
#[instrument(skip(pdf, config), level = "debug")]
pub fn cdf_segment(pdf: &PdfEvaluator, config: AccumulatorConfig, n: usize) -> Result<SegmentTable> {
    if n < 2 {
        return Err(Error::InvalidParameter(format!(
            "segment count must be at least 2, got {n}"
        )));
    }

    let mut walk = AdaptiveStepAccumulator::new(pdf, config)?;
    let mut state = walk.start()?;
    let mut boundaries = Vec::with_capacity(n - 1);
    for i in 1..n {
        let target = i as f64 / n as f64;
        state = walk.accumulate_until(state, StopCondition::ReachedProbability(target))?;
        boundaries.push(state.corrected_abscissa(target));
    }

    debug!(n, samples = walk.samples(), "segment table built");
    Ok(SegmentTable {
        segments: n,
        boundaries,
    })
}
