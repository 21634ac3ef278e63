//! Property-based tests for the draw table.

use proptest::prelude::*;

use counterfeit_deposit::math::{expected_marked_drawn, DrawTable};
use counterfeit_deposit::scenario::sample_size;

/// Strategy: (genuine, marked, sample) with sample <= genuine + marked.
fn population_strategy() -> impl Strategy<Value = (u64, u64, u64)> {
    (0..60u64, 0..60u64).prop_flat_map(|(g, m)| (Just(g), Just(m), 0..=(g + m)))
}

proptest! {
    #[test]
    fn rows_sum_to_one((g, m, n) in population_strategy()) {
        let table = DrawTable::build(g, m, n).unwrap();
        for (b, row) in table.rows().iter().enumerate() {
            prop_assert_eq!(row.len(), b + 1);
            let sum: f64 = row.iter().sum();
            prop_assert!((sum - 1.).abs() < 1e-9, "row {} sums to {}", b, sum);
        }
    }

    #[test]
    fn expectation_matches_closed_form((g, m, n) in population_strategy()) {
        let e = expected_marked_drawn(g, m, n).unwrap();
        let total = g + m;
        let closed = if total == 0 { 0. } else { n as f64 * m as f64 / total as f64 };
        prop_assert!((e - closed).abs() < 1e-9 * closed.max(1.), "{} vs {}", e, closed);
    }

    #[test]
    fn expectation_monotone_in_fakes(g in 0..50u64, m in 0..80u64, pct in 1..=100u32) {
        let fraction = pct as f64 / 100.;
        let at = |m: u64| {
            let n = sample_size(g + m, fraction).unwrap();
            expected_marked_drawn(g, m, n).unwrap()
        };
        prop_assert!(at(m + 1) + 1e-12 >= at(m));
    }
}
