use tracing::warn;

use super::utils::{orderings, PROBABILITY_TOLERANCE};
use crate::error::{invalid, ModelError, Result};

/// Triangular table `Q[b][k]`: probability that exactly `k` of the first `b`
/// items drawn without replacement are marked.
///
/// Row `b` has `b + 1` entries. Every row is a full distribution, so the
/// combinatorial weighting over orderings is already folded into the table.
#[derive(Debug, Clone)]
pub struct DrawTable {
    rows: Vec<Vec<f64>>,
}

impl DrawTable {
    pub fn build(genuine: u64, marked: u64, sample_size: u64) -> Result<Self> {
        let total = genuine
            .checked_add(marked)
            .ok_or_else(|| invalid("marked_count", "population size overflows u64"))?;
        if sample_size > total {
            return Err(invalid(
                "sample_size",
                format!("cannot draw {sample_size} items from a population of {total}"),
            ));
        }

        let rows = fill_rows(genuine, marked, total, sample_size)?;
        Ok(Self { rows })
    }

    pub fn sample_size(&self) -> u64 {
        (self.rows.len() - 1) as u64
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Distribution of the marked count over the whole sample.
    pub fn distribution(&self) -> &[f64] {
        &self.rows[self.rows.len() - 1]
    }

    /// Probability of one particular ordered draw sequence with `k` marked
    /// items. Every such ordering is equally likely.
    pub fn path_probability(&self, k: u64) -> f64 {
        let n = self.sample_size();
        match self.distribution().get(k as usize) {
            Some(&p) if p > 0. => p / orderings(n, k),
            _ => 0.,
        }
    }

    pub fn expectation(&self) -> f64 {
        self.distribution()
            .iter()
            .enumerate()
            .map(|(k, p)| k as f64 * p)
            .sum()
    }
}

/// Run the draw recurrence over `population` notes. `population` must equal
/// `genuine + marked`; any mismatch surfaces as `NumericInstability`.
fn fill_rows(genuine: u64, marked: u64, population: u64, sample_size: u64) -> Result<Vec<Vec<f64>>> {
    let n = sample_size as usize;
    let mut rows: Vec<Vec<f64>> = Vec::with_capacity(n + 1);
    rows.push(vec![1.]);

    for b in 0..n {
        let remaining = population.saturating_sub(b as u64) as f64;
        let current = &rows[b];
        let mut next = vec![0.; b + 2];

        for (k, &mass) in current.iter().enumerate() {
            if mass == 0. {
                continue;
            }
            let remaining_marked = marked.saturating_sub(k as u64) as f64;
            let remaining_genuine = genuine.saturating_sub((b - k) as u64) as f64;

            next[k] += mass * remaining_genuine / remaining;
            next[k + 1] += mass * remaining_marked / remaining;
        }

        check_row(b as u64 + 1, &next)?;
        rows.push(next);
    }

    Ok(rows)
}

fn check_row(draw: u64, row: &[f64]) -> Result<()> {
    if let Some((k, p)) = row
        .iter()
        .enumerate()
        .find(|(_, p)| !p.is_finite() || **p < -PROBABILITY_TOLERANCE || **p > 1. + PROBABILITY_TOLERANCE)
    {
        warn!(draw, k, p, "draw probability left [0, 1]");
        return Err(ModelError::NumericInstability {
            draw,
            detail: format!("Q[{draw}][{k}] = {p}"),
        });
    }

    let sum: f64 = row.iter().sum();
    if (sum - 1.).abs() > PROBABILITY_TOLERANCE {
        warn!(draw, sum, "draw distribution does not sum to one");
        return Err(ModelError::NumericInstability {
            draw,
            detail: format!("row sums to {sum}"),
        });
    }
    Ok(())
}

/// E[A]: expected number of marked items among `sample_size` items drawn
/// without replacement from `genuine + marked`.
pub fn expected_marked_drawn(genuine: u64, marked: u64, sample_size: u64) -> Result<f64> {
    Ok(DrawTable::build(genuine, marked, sample_size)?.expectation())
}
