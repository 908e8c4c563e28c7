//! The ordinal outcome scale shared by every arm of a model.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScoopError};

/// Number of distinct ordinal outcomes `K`; outcomes are `0..K`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Scale(usize);

impl Scale {
    /// Ratings `0..=10`.
    pub const DEFAULT_OUTCOMES: usize = 11;

    /// Build a scale with `outcomes` values. A scale needs at least two
    /// outcomes to express a preference.
    pub fn new(outcomes: usize) -> Result<Self> {
        if outcomes < 2 {
            return Err(ScoopError::Config(format!(
                "outcome scale needs at least 2 values, got {outcomes}"
            )));
        }
        Ok(Self(outcomes))
    }

    #[must_use]
    pub const fn outcomes(self) -> usize {
        self.0
    }

    #[must_use]
    pub const fn max_outcome(self) -> usize {
        self.0 - 1
    }

    /// Coerce an arbitrary numeric rating onto the scale: round half away
    /// from zero, then clamp into `[0, K-1]`. NaN maps to 0.
    #[must_use]
    pub fn coerce(self, outcome: f64) -> usize {
        let rounded = outcome.round();
        if rounded.is_nan() || rounded <= 0.0 {
            return 0;
        }
        let max = self.max_outcome();
        if rounded >= max as f64 {
            max
        } else {
            rounded as usize
        }
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self(Self::DEFAULT_OUTCOMES)
    }
}

impl TryFrom<usize> for Scale {
    type Error = ScoopError;

    fn try_from(value: usize) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Scale> for usize {
    fn from(scale: Scale) -> Self {
        scale.0
    }
}
