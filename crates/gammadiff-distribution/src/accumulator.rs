//! Adaptive-step trapezoidal accumulation of the density
//!
//! The walk starts deep in the left tail, skips the negligible mass (seek
//! phase), then integrates with the trapezoidal rule while a step controller
//! doubles or halves the step according to the local relative change of the
//! density. The step may never fall below `standard_err / 10000`.
//!
//! All state lives in [`AccumulatorState`], which each step consumes and
//! returns; the step controller itself is a pure function of the state.

use crate::config::{AccumulatorConfig, StepThresholds};
use crate::pdf::PdfEvaluator;
use gammadiff_core::{math::relative_change, Error, Result};
use tracing::{debug, trace, warn};

/// Position, step and running mass of a walk
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccumulatorState {
    /// Current abscissa
    pub x: f64,
    /// Current step
    pub delta: f64,
    /// Mass accumulated so far
    pub cdf: f64,
    /// Density at the previous abscissa
    pub pdf_prev: f64,
    /// Density at `x`
    pub pdf_curr: f64,
}

impl AccumulatorState {
    /// Fresh state at `x` with a single density sample and no mass
    pub fn start(x: f64, delta: f64, pdf: f64) -> Self {
        Self {
            x,
            delta,
            cdf: 0.0,
            pdf_prev: pdf,
            pdf_curr: pdf,
        }
    }

    /// Move to `x + delta` without accumulating mass (seek phase)
    pub fn skip(self, pdf_next: f64) -> Self {
        Self {
            x: self.x + self.delta,
            pdf_prev: self.pdf_curr,
            pdf_curr: pdf_next,
            ..self
        }
    }

    /// Move to `x + delta`, adding the trapezoid between the two samples
    pub fn accumulate(self, pdf_next: f64) -> Self {
        Self {
            x: self.x + self.delta,
            cdf: self.cdf + 0.5 * (self.pdf_curr + pdf_next) * self.delta,
            pdf_prev: self.pdf_curr,
            pdf_curr: pdf_next,
            ..self
        }
    }

    /// Apply the step controller to the last two samples.
    ///
    /// The step doubles when the relative change is below `low`, halves when
    /// it is above `high`, and is held when the local mass
    /// `|pdf_prev + pdf_curr| * delta` is below `negligible_mass`.
    pub fn adjust_step(self, thresholds: &StepThresholds, negligible_mass: f64) -> Self {
        let mass = (self.pdf_prev + self.pdf_curr).abs() * self.delta;
        if mass < negligible_mass {
            return self;
        }
        let delta = match relative_change(self.pdf_prev, self.pdf_curr) {
            Some(r) if r < thresholds.low => self.delta * 2.0,
            Some(r) if r > thresholds.high => self.delta / 2.0,
            _ => self.delta,
        };
        Self { delta, ..self }
    }

    /// Mean height of the last trapezoid
    #[inline]
    pub fn last_height(&self) -> f64 {
        0.5 * (self.pdf_prev + self.pdf_curr)
    }

    /// Abscissa at which the accumulated mass equals `target`, assuming the
    /// density is constant across the last trapezoid.
    pub fn corrected_abscissa(&self, target: f64) -> f64 {
        let height = self.last_height();
        if height > 0.0 {
            self.x - (self.cdf - target) / height
        } else {
            self.x
        }
    }

    /// Accumulated mass up to `z <= x`, removing the part of the last
    /// trapezoid that lies beyond `z`.
    pub fn mass_at(&self, z: f64) -> f64 {
        let overshoot = (self.x - z).max(0.0);
        (self.cdf - self.last_height() * overshoot).max(0.0)
    }
}

/// When an accumulation walk stops
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StopCondition {
    /// Stop once the abscissa has passed this point
    PastAbscissa(f64),
    /// Stop once the accumulated mass reaches this probability
    ReachedProbability(f64),
}

impl StopCondition {
    /// Whether `state` satisfies the condition
    #[inline]
    pub fn is_met(&self, state: &AccumulatorState) -> bool {
        match *self {
            StopCondition::PastAbscissa(z) => state.x > z,
            StopCondition::ReachedProbability(p) => state.cdf >= p,
        }
    }
}

/// Drives an adaptive walk over the density
#[derive(Debug)]
pub struct AdaptiveStepAccumulator<'a> {
    pdf: &'a PdfEvaluator,
    config: AccumulatorConfig,
    epsilon: f64,
    samples: usize,
}

impl<'a> AdaptiveStepAccumulator<'a> {
    /// New walk over `pdf`; the configuration is validated here
    pub fn new(pdf: &'a PdfEvaluator, config: AccumulatorConfig) -> Result<Self> {
        config.validate()?;
        let epsilon = pdf.moments().standard_err / config.floor_divisor;
        Ok(Self {
            pdf,
            config,
            epsilon,
            samples: 0,
        })
    }

    /// Step floor of this walk
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Density samples taken so far
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Density at `x`; `cdf` is the mass accumulated so far, reported if the
    /// iteration budget is exhausted.
    fn sample(&mut self, x: f64, cdf: f64) -> Result<f64> {
        if self.samples >= self.config.max_iterations {
            warn!(
                iterations = self.samples,
                x,
                cdf,
                "adaptive walk hit its iteration limit"
            );
            return Err(Error::IterationLimit {
                iterations: self.samples,
                x,
                cdf,
            });
        }
        self.samples += 1;
        self.pdf.density(x)
    }

    fn check_floor(&self, state: &AccumulatorState) -> Result<()> {
        if state.delta < self.epsilon {
            debug!(
                x = state.x,
                delta = state.delta,
                epsilon = self.epsilon,
                "step underflow"
            );
            return Err(Error::StepUnderflow {
                x: state.x,
                delta: state.delta,
                epsilon: self.epsilon,
            });
        }
        Ok(())
    }

    /// Sample the starting point and run the seek phase.
    ///
    /// The returned state sits where `pdf * delta` first reaches the seek
    /// mass, with no mass accumulated yet.
    pub fn start(&mut self) -> Result<AccumulatorState> {
        let moments = *self.pdf.moments();
        let x0 = moments.offset(-self.config.start_sigmas);
        let delta0 = moments.standard_err / self.config.initial_step_divisor;

        let pdf0 = self.sample(x0, 0.0)?;
        let mut state = AccumulatorState::start(x0, delta0, pdf0);

        while state.pdf_curr * state.delta < self.config.seek_mass {
            let pdf_next = self.sample(state.x + state.delta, state.cdf)?;
            state = state
                .skip(pdf_next)
                .adjust_step(&self.config.seek, self.config.negligible_mass);
            self.check_floor(&state)?;
        }

        debug!(
            x = state.x,
            delta = state.delta,
            samples = self.samples,
            "seek phase complete"
        );
        Ok(state)
    }

    /// One trapezoidal step followed by the step controller
    pub fn step(&mut self, state: AccumulatorState) -> Result<AccumulatorState> {
        let pdf_next = self.sample(state.x + state.delta, state.cdf)?;
        let state = state.accumulate(pdf_next);
        self.check_floor(&state)?;
        Ok(state.adjust_step(&self.config.accumulate, self.config.negligible_mass))
    }

    /// Keep stepping until `stop` holds.
    ///
    /// Returns immediately if `stop` already holds for `state`. A probability
    /// target still unmet once the walk passes [`PdfEvaluator::upper_limit`]
    /// can never be reached and fails with [`Error::MassExhausted`].
    pub fn accumulate_until(
        &mut self,
        mut state: AccumulatorState,
        stop: StopCondition,
    ) -> Result<AccumulatorState> {
        let support_end = self.pdf.upper_limit();
        while !stop.is_met(&state) {
            if let StopCondition::ReachedProbability(target) = stop {
                if state.x >= support_end {
                    warn!(
                        target,
                        reached = state.cdf,
                        x = state.x,
                        samples = self.samples,
                        "walk left the support before reaching its target"
                    );
                    return Err(Error::MassExhausted {
                        target,
                        reached: state.cdf,
                        x: state.x,
                    });
                }
            }
            state = self.step(state)?;
        }
        trace!(x = state.x, cdf = state.cdf, delta = state.delta, ?stop, "stop condition met");
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ACCUMULATE_HIGH, ACCUMULATE_LOW, DEFAULT_MAX_ITERATIONS, NEGLIGIBLE_MASS};
    use crate::params::DistributionParameters;
    use approx::assert_relative_eq;
    use gammadiff_core::NumericConfig;

    const THRESHOLDS: StepThresholds = StepThresholds::new(ACCUMULATE_LOW, ACCUMULATE_HIGH);

    fn reference_pdf() -> PdfEvaluator {
        let params = DistributionParameters::new(50, 10_000.0, 100, 20_000.0).unwrap();
        PdfEvaluator::new(params, NumericConfig::default())
    }

    #[test]
    fn test_step_controller() {
        let base = AccumulatorState {
            x: 0.0,
            delta: 1.0,
            cdf: 0.0,
            pdf_prev: 1.0,
            pdf_curr: 1.0,
        };

        // Flat: widen
        let flat = base.adjust_step(&THRESHOLDS, NEGLIGIBLE_MASS);
        assert_eq!(flat.delta, 2.0);

        // Steep: narrow
        let steep = AccumulatorState {
            pdf_curr: 1.1,
            ..base
        }
        .adjust_step(&THRESHOLDS, NEGLIGIBLE_MASS);
        assert_eq!(steep.delta, 0.5);

        // In band: hold (r = 0.002)
        let band = AccumulatorState {
            pdf_curr: 1.002 / 0.998,
            ..base
        }
        .adjust_step(&THRESHOLDS, NEGLIGIBLE_MASS);
        assert_eq!(band.delta, 1.0);

        // Negligible mass: hold even though the change is huge
        let tail = AccumulatorState {
            pdf_prev: 1e-12,
            pdf_curr: 1e-10,
            ..base
        }
        .adjust_step(&THRESHOLDS, NEGLIGIBLE_MASS);
        assert_eq!(tail.delta, 1.0);

        // Only delta changes
        assert_eq!(AccumulatorState { delta: 1.0, ..steep }, AccumulatorState { pdf_curr: 1.1, ..base });
    }

    #[test]
    fn test_trapezoid_and_correction() {
        let state = AccumulatorState::start(0.0, 0.5, 2.0).accumulate(2.0);
        assert_eq!(state.x, 0.5);
        assert_eq!(state.cdf, 1.0);
        assert_eq!(state.pdf_prev, 2.0);

        // Mass 1.0 at x = 0.5 with height 2: mass 0.8 is reached at 0.4
        assert_relative_eq!(state.corrected_abscissa(0.8), 0.4);
        assert_relative_eq!(state.mass_at(0.25), 0.5);
        assert_eq!(state.mass_at(-10.0), 0.0);

        let skipped = AccumulatorState::start(0.0, 0.5, 2.0).skip(3.0);
        assert_eq!(skipped.cdf, 0.0);
        assert_eq!(skipped.pdf_curr, 3.0);
    }

    #[test]
    fn test_stop_conditions() {
        let state = AccumulatorState {
            x: 1.0,
            delta: 0.1,
            cdf: 0.3,
            pdf_prev: 1.0,
            pdf_curr: 1.0,
        };
        assert!(StopCondition::PastAbscissa(0.9).is_met(&state));
        assert!(!StopCondition::PastAbscissa(1.0).is_met(&state));
        assert!(StopCondition::ReachedProbability(0.3).is_met(&state));
        assert!(!StopCondition::ReachedProbability(0.31).is_met(&state));
    }

    #[test]
    fn test_seek_lands_in_left_tail() {
        let pdf = reference_pdf();
        let se = pdf.moments().standard_err;
        let mut walk = AdaptiveStepAccumulator::new(&pdf, AccumulatorConfig::inverse()).unwrap();
        let state = walk.start().unwrap();

        assert_eq!(state.cdf, 0.0);
        assert!(state.pdf_curr * state.delta >= 1e-10);
        assert!(state.x < -4.0 * se && state.x > -10.0 * se, "x = {}", state.x / se);
        assert!(state.delta >= walk.epsilon());
    }

    #[test]
    fn test_walk_accumulates_monotonically() {
        let pdf = reference_pdf();
        let se = pdf.moments().standard_err;
        let mut walk = AdaptiveStepAccumulator::new(&pdf, AccumulatorConfig::inverse()).unwrap();
        let mut state = walk.start().unwrap();

        let mut min_delta = f64::INFINITY;
        let mut max_delta: f64 = 0.0;
        for _ in 0..50_000 {
            let next = walk.step(state).unwrap();
            assert!(next.cdf >= state.cdf);
            assert!(next.x > state.x);
            min_delta = min_delta.min(next.delta);
            max_delta = max_delta.max(next.delta);
            state = next;
            if state.cdf > 0.6 {
                break;
            }
        }
        assert!(state.cdf > 0.6);
        // The controller must actually adapt
        assert!(max_delta > 2.0 * min_delta);
        assert!(min_delta >= se / 10_000.0);
    }

    #[test]
    fn test_step_underflow_with_coarse_floor() {
        let pdf = reference_pdf();
        let config = AccumulatorConfig::inverse().with_floor_divisor(100.0);
        let mut walk = AdaptiveStepAccumulator::new(&pdf, config).unwrap();
        let state = walk.start().unwrap();
        let err = walk
            .accumulate_until(state, StopCondition::ReachedProbability(0.5))
            .unwrap_err();
        assert!(err.is_step_underflow(), "{err}");
    }

    #[test]
    fn test_floor_above_initial_step_fails_in_seek() {
        let pdf = reference_pdf();
        let config = AccumulatorConfig::inverse().with_floor_divisor(20.0);
        let mut walk = AdaptiveStepAccumulator::new(&pdf, config).unwrap();
        assert!(walk.start().unwrap_err().is_step_underflow());
    }

    #[test]
    fn test_unreachable_target_stops_at_support_end() {
        let pdf = reference_pdf();
        let mut walk = AdaptiveStepAccumulator::new(&pdf, AccumulatorConfig::inverse()).unwrap();
        let state = walk.start().unwrap();
        match walk.accumulate_until(state, StopCondition::ReachedProbability(0.99999)) {
            Err(Error::MassExhausted { target, reached, x }) => {
                assert_eq!(target, 0.99999);
                assert!(reached > 0.999 && reached < 0.99999, "reached = {reached}");
                assert!(x >= pdf.upper_limit());
            }
            other => panic!("expected mass exhaustion, got {other:?}"),
        }
        assert!(walk.samples() < DEFAULT_MAX_ITERATIONS);
    }

    #[test]
    fn test_iteration_limit() {
        let pdf = reference_pdf();
        let config = AccumulatorConfig::inverse().with_max_iterations(50);
        let mut walk = AdaptiveStepAccumulator::new(&pdf, config).unwrap();
        let err = walk.start().unwrap_err();
        assert!(matches!(err, Error::IterationLimit { iterations: 50, .. }));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let pdf = reference_pdf();
        let config = AccumulatorConfig::inverse().with_max_iterations(0);
        assert!(AdaptiveStepAccumulator::new(&pdf, config).is_err());
    }
}
