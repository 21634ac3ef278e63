use statrs::function::factorial::binomial;

use crate::error::{invalid, Result};

/// Tolerance used when checking that probabilities stay inside `[0, 1]` and
/// that every row of the draw table sums to one.
pub const PROBABILITY_TOLERANCE: f64 = 1e-9;

/// Relative comparison, falling back to absolute near zero.
pub fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance * a.abs().max(b.abs()).max(1.0)
}

pub fn check_probability(name: &'static str, p: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&p) {
        return Err(invalid(name, format!("{p} is outside [0, 1]")));
    }
    Ok(())
}

/// Number of distinct orderings of `n` draws that contain exactly `k` marked
/// items.
pub fn orderings(n: u64, k: u64) -> f64 {
    if k > n {
        return 0.;
    }
    binomial(n, k)
}
