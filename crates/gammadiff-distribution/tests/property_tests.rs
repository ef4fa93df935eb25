//! Property-based tests for the gamma-difference routines
//!
//! The walk-based properties are expensive, so those blocks run few cases.

#[cfg(test)]
mod property_tests {
    use gammadiff_distribution::accumulator::AccumulatorState;
    use gammadiff_distribution::config::{ACCUMULATE_HIGH, ACCUMULATE_LOW, NEGLIGIBLE_MASS};
    use gammadiff_distribution::*;
    use proptest::prelude::*;

    fn thresholds() -> StepThresholds {
        StepThresholds::new(ACCUMULATE_LOW, ACCUMULATE_HIGH)
    }

    proptest! {
        // Property: the step controller only ever doubles, halves or holds
        #[test]
        fn prop_step_controller_factor(
            delta in 1e-6f64..10.0,
            prev in 0.0f64..100.0,
            curr in 0.0f64..100.0,
        ) {
            let state = AccumulatorState { x: 0.0, delta, cdf: 0.0, pdf_prev: prev, pdf_curr: curr };
            let next = state.adjust_step(&thresholds(), NEGLIGIBLE_MASS);
            prop_assert!(
                next.delta == delta || next.delta == 2.0 * delta || next.delta == delta / 2.0
            );
            prop_assert_eq!(next.x, state.x);
            prop_assert_eq!(next.cdf, state.cdf);
        }

        // Property: trapezoidal accumulation never loses mass
        #[test]
        fn prop_accumulate_is_monotone(
            x in -10.0f64..10.0,
            delta in 1e-6f64..1.0,
            pdfs in prop::collection::vec(0.0f64..50.0, 1..50),
        ) {
            let mut state = AccumulatorState::start(x, delta, pdfs[0]);
            for &p in &pdfs[1..] {
                let next = state.accumulate(p);
                prop_assert!(next.cdf >= state.cdf);
                prop_assert!(next.x > state.x);
                state = next;
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        // Property: the density is never negative
        #[test]
        fn prop_pdf_non_negative(
            a1 in 1u32..20,
            b1 in 0.1f64..10.0,
            a2 in 1u32..20,
            b2 in 0.1f64..10.0,
            sigmas in -20.0f64..20.0,
        ) {
            let dist = GammaDifference::new(a1, b1, a2, b2).unwrap();
            let z = dist.moments().offset(sigmas);
            let value = dist.pdf(z).unwrap();
            prop_assert!(value >= 0.0 && value.is_finite(), "pdf({}) = {}", z, value);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(4))]

        // Property: the adaptive CDF is a non-decreasing probability
        #[test]
        fn prop_cdf_adaptive_monotone(
            a1 in 1u32..6,
            b1 in 0.5f64..4.0,
            a2 in 1u32..6,
            b2 in 0.5f64..4.0,
            s1 in -2.0f64..2.0,
            gap in 0.1f64..2.0,
        ) {
            let dist = GammaDifference::new(a1, b1, a2, b2).unwrap();
            let m = *dist.moments();
            let lo = dist.cdf_adaptive(m.offset(s1)).unwrap();
            let hi = dist.cdf_adaptive(m.offset(s1 + gap)).unwrap();
            prop_assert!((0.0..=1.0).contains(&lo));
            prop_assert!((0.0..=1.0).contains(&hi));
            prop_assert!(lo <= hi, "cdf not monotone: {} > {}", lo, hi);
        }

        // Property: segment-table interpolation is non-decreasing in p
        #[test]
        fn prop_table_quantile_monotone(
            ps in prop::collection::vec(0.0f64..=1.0, 2..20),
            n in 2usize..6,
        ) {
            let dist = GammaDifference::new(1, 1.0, 1, 1.0).unwrap();
            let table = dist.cdf_segment(n).unwrap();
            let mut ps = ps;
            ps.sort_by(|a, b| a.total_cmp(b));
            let qs: Vec<f64> = ps.iter().map(|&p| table.quantile(p).unwrap()).collect();
            prop_assert!(qs.windows(2).all(|w| w[0] <= w[1]), "{:?}", qs);
        }
    }
}
