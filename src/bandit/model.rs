//! Dirichlet-multinomial Thompson sampler over a growing set of arms.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScoopError};

use super::counts::OutcomeCounts;
use super::sampling::dirichlet_from_counts;
use super::scale::Scale;

/// One posterior per arm over a shared ordinal scale.
///
/// Arms are addressed by their position. Selection draws one probability
/// vector per arm from `Dirichlet(counts)`, scores it by its expected outcome
/// and returns the best arm, lowest index first on ties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BanditModel {
    scale: Scale,
    arms: Vec<OutcomeCounts>,
}

impl BanditModel {
    /// `arms` fresh arms, each with the uniform prior.
    #[must_use]
    pub fn new(scale: Scale, arms: usize) -> Self {
        Self {
            scale,
            arms: vec![OutcomeCounts::uniform(scale); arms],
        }
    }

    /// Rebuild a model from persisted count vectors, one per arm, in order.
    pub fn restore<I, C>(scale: Scale, counts: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[u64]>,
    {
        let arms = counts
            .into_iter()
            .map(|c| OutcomeCounts::restore(scale, c.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { scale, arms })
    }

    /// Build a model from already-validated arms. Every arm must share `scale`.
    pub fn from_arms(scale: Scale, arms: Vec<OutcomeCounts>) -> Result<Self> {
        if let Some(bad) = arms.iter().position(|arm| arm.scale() != scale) {
            return Err(ScoopError::InvalidCounts(format!(
                "arm {bad} has {} outcomes, model expects {}",
                arms[bad].scale().outcomes(),
                scale.outcomes()
            )));
        }
        Ok(Self { scale, arms })
    }

    #[must_use]
    pub const fn scale(&self) -> Scale {
        self.scale
    }

    #[must_use]
    pub fn arm_count(&self) -> usize {
        self.arms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arms.is_empty()
    }

    pub fn counts(&self, arm: usize) -> Result<&OutcomeCounts> {
        self.arms.get(arm).ok_or(ScoopError::OutOfRange {
            index: arm,
            arms: self.arms.len(),
        })
    }

    #[must_use]
    pub fn arms(&self) -> &[OutcomeCounts] {
        &self.arms
    }

    /// Draw one posterior score per arm: the expected outcome under a
    /// probability vector sampled from that arm's Dirichlet posterior.
    /// Each score lies in `[0, K-1]`.
    pub fn scores<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        self.arms
            .iter()
            .map(|arm| expected_outcome(&dirichlet_from_counts(arm.as_slice(), rng)))
            .collect()
    }

    /// Thompson-sampling choice of the next arm to present.
    pub fn select_arm<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<usize> {
        self.select_with_score(rng).map(|(arm, _)| arm)
    }

    /// Like [`select_arm`](Self::select_arm), also returning the winning score.
    pub fn select_with_score<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<(usize, f64)> {
        if self.arms.is_empty() {
            return Err(ScoopError::EmptyModel);
        }
        let scores = self.scores(rng);
        Ok(first_max(&scores))
    }

    /// Record that `arm` received `outcome`. The outcome is rounded and
    /// clamped onto the scale before one count is incremented.
    pub fn record_outcome(&mut self, arm: usize, outcome: f64) -> Result<()> {
        let slot = self.scale.coerce(outcome);
        let arms = self.arms.len();
        let counts = self
            .arms
            .get_mut(arm)
            .ok_or(ScoopError::OutOfRange { index: arm, arms })?;
        counts.increment(slot);
        Ok(())
    }

    /// Append a fresh arm with the uniform prior and return its index.
    pub fn add_arm(&mut self) -> usize {
        self.arms.push(OutcomeCounts::uniform(self.scale));
        self.arms.len() - 1
    }

    /// Posterior mean probability of each outcome for `arm`.
    pub fn value_distribution(&self, arm: usize) -> Result<Vec<f64>> {
        Ok(self.counts(arm)?.mean_distribution())
    }

    /// Posterior mean outcome for `arm`.
    pub fn expected_value(&self, arm: usize) -> Result<f64> {
        Ok(self.counts(arm)?.mean_value())
    }
}

/// `Σ v · p[v]` over the ordinal scale.
#[must_use]
pub fn expected_outcome(probabilities: &[f64]) -> f64 {
    probabilities
        .iter()
        .enumerate()
        .map(|(v, p)| v as f64 * p)
        .sum()
}

/// Index and value of the strictly largest score; earliest index wins ties.
fn first_max(scores: &[f64]) -> (usize, f64) {
    scores
        .iter()
        .enumerate()
        .fold((0, scores[0]), |(best, best_score), (i, &score)| {
            if score > best_score {
                (i, score)
            } else {
                (best, best_score)
            }
        })
}
