use super::utils::check_probability;
use crate::error::{invalid, Result};

/// E[B]: chance that inspection finds none of the marked items drawn.
///
/// The expected drawn count is used as the exponent of independent per-item
/// misses. This is an approximation; the exact value would need the full
/// draw distribution rather than its mean.
pub fn probability_none_detected(expected_marked_drawn: f64, detect_prob: f64) -> Result<f64> {
    check_probability("detection_probability", detect_prob)?;
    if !expected_marked_drawn.is_finite() || expected_marked_drawn < 0. {
        return Err(invalid(
            "expected_marked_drawn",
            format!("{expected_marked_drawn} is not a non-negative count"),
        ));
    }
    Ok((1. - detect_prob).powf(expected_marked_drawn))
}

/// Expected retained value of a deposit of `total_count` notes. A detected
/// fake forfeits everything, so only the undetected branch contributes.
pub fn expected_payoff(total_count: u64, unit_value: f64, prob_none_detected: f64) -> Result<f64> {
    check_probability("probability_none_detected", prob_none_detected)?;
    if !unit_value.is_finite() || unit_value <= 0. {
        return Err(invalid("unit_value", format!("{unit_value} must be positive")));
    }
    Ok(total_count as f64 * unit_value * prob_none_detected)
}
