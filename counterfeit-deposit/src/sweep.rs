use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::math::{expected_marked_drawn, expected_payoff, probability_none_detected};
use crate::math::utils::approx_eq;
use crate::scenario::{sample_size, SweepConfig};

/// One evaluated deposit: `marked_count` fakes added to the genuine notes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepPoint {
    pub marked_count: u64,
    pub total_count: u64,
    pub sample_size: u64,
    pub expected_marked_drawn: f64,
    pub probability_none_detected: f64,
    pub expected_payoff: f64,
}

impl SweepPoint {
    pub fn evaluate(cfg: &SweepConfig, marked_count: u64) -> Result<Self> {
        let total_count = cfg.genuine_count + marked_count;
        let sample_size = sample_size(total_count, cfg.review_fraction)?;
        let expected_marked_drawn =
            expected_marked_drawn(cfg.genuine_count, marked_count, sample_size)?;
        let probability_none_detected =
            probability_none_detected(expected_marked_drawn, cfg.detection_probability)?;
        let expected_payoff =
            expected_payoff(total_count, cfg.unit_value, probability_none_detected)?;

        debug!(
            marked_count,
            total_count, sample_size, expected_marked_drawn, expected_payoff, "evaluated deposit"
        );
        Ok(Self {
            marked_count,
            total_count,
            sample_size,
            expected_marked_drawn,
            probability_none_detected,
            expected_payoff,
        })
    }
}

/// Evaluate every fake count in the configured range, ascending.
///
/// The whole config is validated before any point is computed, so a bad
/// parameter never yields a partial curve.
pub fn sweep(cfg: &SweepConfig) -> Result<Vec<SweepPoint>> {
    cfg.validate()?;
    let curve = cfg
        .marked_range()
        .into_par_iter()
        .map(|marked| SweepPoint::evaluate(cfg, marked))
        .collect::<Result<Vec<_>>>()?;
    debug!(points = curve.len(), "sweep finished");
    Ok(curve)
}

/// Every point whose payoff ties the maximum within `tolerance` (relative).
/// Ties are all reported, in curve order.
pub fn argmax(curve: &[SweepPoint], tolerance: f64) -> Vec<SweepPoint> {
    if curve.is_empty() {
        return Vec::new();
    }
    let best = curve
        .iter()
        .map(|p| p.expected_payoff)
        .fold(f64::NEG_INFINITY, f64::max);

    let winners: Vec<SweepPoint> = curve
        .iter()
        .filter(|p| approx_eq(p.expected_payoff, best, tolerance))
        .copied()
        .collect();
    info!(
        best,
        marked_counts = ?winners.iter().map(|p| p.marked_count).collect::<Vec<_>>(),
        "maximum expected payoff"
    );
    winners
}
