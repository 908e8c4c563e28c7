//! A long-lived model shared across concurrent callers.

use parking_lot::RwLock;
use rand::Rng;

use crate::error::Result;

use super::model::BanditModel;

/// Lock-protected [`BanditModel`].
///
/// Selections take a read lock and may run in parallel; they see each count
/// vector either before or after a concurrent increment, never torn.
/// Recording and adding arms take the write lock, so increments are never lost.
#[derive(Debug)]
pub struct SharedBandit {
    model: RwLock<BanditModel>,
}

impl SharedBandit {
    #[must_use]
    pub const fn new(model: BanditModel) -> Self {
        Self {
            model: RwLock::new(model),
        }
    }

    pub fn select_arm<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<usize> {
        self.model.read().select_arm(rng)
    }

    pub fn record_outcome(&self, arm: usize, outcome: f64) -> Result<()> {
        self.model.write().record_outcome(arm, outcome)
    }

    pub fn add_arm(&self) -> usize {
        self.model.write().add_arm()
    }

    #[must_use]
    pub fn arm_count(&self) -> usize {
        self.model.read().arm_count()
    }

    /// Point-in-time copy of the model, e.g. for persisting.
    #[must_use]
    pub fn snapshot(&self) -> BanditModel {
        self.model.read().clone()
    }

    #[must_use]
    pub fn into_inner(self) -> BanditModel {
        self.model.into_inner()
    }
}

impl From<BanditModel> for SharedBandit {
    fn from(model: BanditModel) -> Self {
        Self::new(model)
    }
}
