//! Per-arm outcome counts: the Dirichlet concentration vector of one arm.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScoopError};

use super::scale::Scale;

/// Pseudo-count every slot starts with (uniform Dirichlet prior).
pub const PRIOR_PSEUDO_COUNT: u64 = 1;

/// Fixed-length count vector over an ordinal scale.
///
/// Every entry is at least [`PRIOR_PSEUDO_COUNT`] and entries only grow, so a
/// Gamma draw with shape zero can never be requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u64>", into = "Vec<u64>")]
pub struct OutcomeCounts {
    counts: Vec<u64>,
}

impl OutcomeCounts {
    /// All-ones prior over `scale`.
    #[must_use]
    pub fn uniform(scale: Scale) -> Self {
        Self {
            counts: vec![PRIOR_PSEUDO_COUNT; scale.outcomes()],
        }
    }

    /// Rebuild counts persisted by a store. Persisted vectors already embed
    /// the prior, so they replace it rather than add to it. Entries below the
    /// prior pseudo-count are lifted to it.
    pub fn restore(scale: Scale, counts: &[u64]) -> Result<Self> {
        if counts.len() != scale.outcomes() {
            return Err(ScoopError::InvalidCounts(format!(
                "expected {} entries, got {}",
                scale.outcomes(),
                counts.len()
            )));
        }
        Ok(Self {
            counts: counts.iter().map(|&c| c.max(PRIOR_PSEUDO_COUNT)).collect(),
        })
    }

    #[must_use]
    pub fn scale(&self) -> Scale {
        // Length is validated on every construction path.
        Scale::new(self.counts.len()).unwrap_or_default()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u64] {
        &self.counts
    }

    #[must_use]
    pub fn get(&self, outcome: usize) -> Option<u64> {
        self.counts.get(outcome).copied()
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Observations recorded on top of the prior.
    #[must_use]
    pub fn observations(&self) -> u64 {
        self.total()
            .saturating_sub(PRIOR_PSEUDO_COUNT * self.counts.len() as u64)
    }

    /// Record one observation of `outcome`, which must already be coerced
    /// onto the scale.
    pub(crate) fn increment(&mut self, outcome: usize) {
        debug_assert!(outcome < self.counts.len());
        if let Some(slot) = self.counts.get_mut(outcome) {
            *slot = slot.saturating_add(1);
        }
    }

    /// Fold another arm's counts into this one, slot by slot. Used when
    /// pooling per-user records of the same flavor.
    pub fn absorb(&mut self, other: &Self) -> Result<()> {
        if other.counts.len() != self.counts.len() {
            return Err(ScoopError::InvalidCounts(format!(
                "cannot pool {} outcomes into {}",
                other.counts.len(),
                self.counts.len()
            )));
        }
        for (slot, &add) in self.counts.iter_mut().zip(&other.counts) {
            *slot = slot.saturating_add(add);
        }
        Ok(())
    }

    /// Posterior mean of the outcome probabilities, `counts / sum`.
    #[must_use]
    pub fn mean_distribution(&self) -> Vec<f64> {
        let total = self.total() as f64;
        self.counts.iter().map(|&c| c as f64 / total).collect()
    }

    /// Posterior mean outcome value, `Σ v · counts[v] / sum`.
    #[must_use]
    pub fn mean_value(&self) -> f64 {
        let total = self.total() as f64;
        self.counts
            .iter()
            .enumerate()
            .map(|(v, &c)| v as f64 * c as f64)
            .sum::<f64>()
            / total
    }
}

impl TryFrom<Vec<u64>> for OutcomeCounts {
    type Error = ScoopError;

    fn try_from(counts: Vec<u64>) -> Result<Self> {
        let scale = Scale::new(counts.len())
            .map_err(|_| ScoopError::InvalidCounts(format!("{} entries", counts.len())))?;
        Self::restore(scale, &counts)
    }
}

impl From<OutcomeCounts> for Vec<u64> {
    fn from(counts: OutcomeCounts) -> Self {
        counts.counts
    }
}
