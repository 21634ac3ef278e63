use std::fs::File;
use std::io::BufReader;
use std::ops::RangeInclusive;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::{invalid, Result};
use crate::math::utils::check_probability;

pub const GENUINE_COUNT: u64 = 25;
pub const DETECTION_PROBABILITY: f64 = 0.25;
pub const REVIEW_FRACTION: f64 = 0.05;
pub const UNIT_VALUE: f64 = 100.;
pub const TIE_TOLERANCE: f64 = 1e-9;
/// The draw table holds about `n * n / 2` floats.
pub const MAX_SAMPLE_SIZE: u64 = 4096;

/// Parameters of a counterfeit-deposit sweep. Defaults reproduce the
/// reference scenario: 25 genuine $100 notes, 5% of the deposit inspected,
/// each inspected fake caught 25% of the time, 0..=100 fakes tried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub genuine_count: u64,
    pub review_fraction: f64,
    pub detection_probability: f64,
    pub unit_value: f64,
    pub marked_min: u64,
    pub marked_max: u64,
    /// Relative tolerance under which two payoffs count as tied.
    pub tie_tolerance: f64,
    /// Largest inspection sample the sweep may need.
    pub max_sample_size: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            genuine_count: GENUINE_COUNT,
            review_fraction: REVIEW_FRACTION,
            detection_probability: DETECTION_PROBABILITY,
            unit_value: UNIT_VALUE,
            marked_min: 0,
            marked_max: 100,
            tie_tolerance: TIE_TOLERANCE,
            max_sample_size: MAX_SAMPLE_SIZE,
        }
    }
}

impl SweepConfig {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open config {}", path.display()))?;
        let cfg: SweepConfig = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        cfg.validate()
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        validate_review_fraction(self.review_fraction)?;
        check_probability("detection_probability", self.detection_probability)?;
        if !self.unit_value.is_finite() || self.unit_value <= 0. {
            return Err(invalid("unit_value", format!("{} must be positive", self.unit_value)));
        }
        if self.marked_min > self.marked_max {
            return Err(invalid(
                "marked_min",
                format!("range {}..={} is empty", self.marked_min, self.marked_max),
            ));
        }
        let largest_total = self
            .genuine_count
            .checked_add(self.marked_max)
            .ok_or_else(|| invalid("marked_max", "population size overflows u64"))?;
        let largest_sample = sample_size(largest_total, self.review_fraction)?;
        if largest_sample > self.max_sample_size {
            return Err(invalid(
                "max_sample_size",
                format!(
                    "{largest_total} notes need a sample of {largest_sample}, above the limit of {}",
                    self.max_sample_size
                ),
            ));
        }
        if !(self.tie_tolerance >= 0.) {
            return Err(invalid("tie_tolerance", format!("{} is negative", self.tie_tolerance)));
        }
        Ok(())
    }

    pub fn marked_range(&self) -> RangeInclusive<u64> {
        self.marked_min..=self.marked_max
    }

    pub fn genuine_value(&self) -> f64 {
        self.genuine_count as f64 * self.unit_value
    }
}

fn validate_review_fraction(review_fraction: f64) -> Result<()> {
    if !(review_fraction > 0. && review_fraction <= 1.) {
        return Err(invalid("review_fraction", format!("{review_fraction} is outside (0, 1]")));
    }
    Ok(())
}

/// Number of notes pulled for inspection: `ceil(total * review_fraction)`.
pub fn sample_size(total: u64, review_fraction: f64) -> Result<u64> {
    validate_review_fraction(review_fraction)?;
    let n = (total as f64 * review_fraction).ceil() as u64;
    if n > total {
        return Err(invalid(
            "sample_size",
            format!("{n} inspected notes exceed the deposit of {total}"),
        ));
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;

    #[test]
    fn test_sample_size() {
        assert_eq!(sample_size(60, 0.05).unwrap(), 3);
        assert_eq!(sample_size(61, 0.05).unwrap(), 4);
        assert_eq!(sample_size(80, 0.05).unwrap(), 4);
        assert_eq!(sample_size(25, 0.05).unwrap(), 2);
        assert_eq!(sample_size(0, 0.05).unwrap(), 0);
        assert_eq!(sample_size(7, 1.).unwrap(), 7);
        assert!(sample_size(10, 0.).is_err());
        assert!(sample_size(10, 1.01).is_err());
        assert!(sample_size(10, f64::NAN).is_err());
    }

    #[test]
    fn test_default_is_valid() {
        let cfg = SweepConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.marked_range(), 0..=100);
        assert_eq!(cfg.genuine_value(), 2500.);
    }

    #[test]
    fn test_validate_rejects() {
        let bad = [
            SweepConfig { review_fraction: 0., ..Default::default() },
            SweepConfig { detection_probability: 1.5, ..Default::default() },
            SweepConfig { unit_value: -100., ..Default::default() },
            SweepConfig { marked_min: 10, marked_max: 5, ..Default::default() },
            SweepConfig { tie_tolerance: f64::NAN, ..Default::default() },
            SweepConfig { max_sample_size: 6, ..Default::default() },
        ];
        for cfg in bad {
            assert!(cfg.validate().is_err(), "{cfg:?}");
        }
    }

    #[test]
    fn test_sample_size_limit() {
        let huge = SweepConfig { genuine_count: 1_000_000, review_fraction: 1., ..Default::default() };
        assert!(matches!(
            huge.validate(),
            Err(ModelError::InvalidParameter { name: "max_sample_size", .. })
        ));

        // 125 notes at 5% need exactly 7.
        let tight = SweepConfig { max_sample_size: 7, ..Default::default() };
        tight.validate().unwrap();
        let raised = SweepConfig { max_sample_size: 2_000_000, ..huge };
        raised.validate().unwrap();
    }

    #[test]
    fn test_partial_json() {
        let cfg: SweepConfig =
            serde_json::from_str(r#"{"genuine_count": 10, "marked_max": 40}"#).unwrap();
        assert_eq!(cfg.genuine_count, 10);
        assert_eq!(cfg.marked_max, 40);
        assert_eq!(cfg.review_fraction, REVIEW_FRACTION);

        assert!(serde_json::from_str::<SweepConfig>(r#"{"genuine_count": -1}"#).is_err());
    }
}
