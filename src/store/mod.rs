//! Candidate stores: where flavors and their outcome counts live between
//! recommendation requests.
//!
//! Two backends share one contract:
//! - `SqliteStore`: durable, one database file per data root
//! - `MemoryStore`: in-process, for anonymous sessions and tests
//!
//! Every user owns at most one record per flavor. A record carries the full
//! count vector (prior included), so a snapshot can be fed straight into
//! `BanditModel::restore`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bandit::{OutcomeCounts, Scale};
use crate::error::Result;

#[cfg(test)]
pub(crate) mod conformance;
pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Which records a snapshot draws from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "user")]
pub enum Scope {
    /// One user's own records.
    Personal(String),
    /// Every user's records, pooled per flavor name.
    Community,
}

/// One candidate as the bandit sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSnapshot {
    pub name: String,
    pub description: String,
    pub counts: OutcomeCounts,
}

/// One rating a user gave, as kept in their history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingEntry {
    pub flavor: String,
    pub description: String,
    /// Outcome already coerced onto the store's scale.
    pub outcome: usize,
    pub rated_at: DateTime<Utc>,
}

impl RatingEntry {
    /// Rating stamped with the current time; `outcome` is coerced onto `scale`.
    #[must_use]
    pub fn now(
        scale: Scale,
        flavor: impl Into<String>,
        description: impl Into<String>,
        outcome: f64,
    ) -> Self {
        Self {
            flavor: flavor.into(),
            description: description.into(),
            outcome: scale.coerce(outcome),
            rated_at: Utc::now(),
        }
    }
}

pub trait CandidateStore: Send + Sync {
    /// Outcome scale every stored count vector uses.
    fn scale(&self) -> Scale;

    /// Current candidates for `scope`, in stable order.
    fn snapshot(&self, scope: &Scope) -> Result<Vec<CandidateSnapshot>>;

    /// Pooled snapshot of one flavor across all users.
    fn find_flavor(&self, name: &str) -> Result<Option<CandidateSnapshot>>;

    /// Register a new flavor for `user` with the uniform prior. Fails with
    /// `FlavorExists` if any user already has a record with that name.
    fn add_flavor(&self, user: &str, name: &str, description: &str) -> Result<()>;

    /// Persist one rating: create the user's record with the uniform prior if
    /// needed, increment the rated slot and append to history. Returns the
    /// record's counts after the increment.
    fn record_rating(&self, user: &str, rating: &RatingEntry) -> Result<OutcomeCounts>;

    /// Append to the user's history only. No record is created or updated,
    /// so the rating never reaches any posterior.
    fn append_history(&self, user: &str, rating: &RatingEntry) -> Result<()>;

    /// The user's ratings, newest first.
    fn history(&self, user: &str) -> Result<Vec<RatingEntry>>;

    /// Remove every record and history entry owned by `user`.
    fn clear(&self, user: &str) -> Result<()>;
}

impl<S: CandidateStore + ?Sized> CandidateStore for Arc<S> {
    fn scale(&self) -> Scale {
        (**self).scale()
    }

    fn snapshot(&self, scope: &Scope) -> Result<Vec<CandidateSnapshot>> {
        (**self).snapshot(scope)
    }

    fn find_flavor(&self, name: &str) -> Result<Option<CandidateSnapshot>> {
        (**self).find_flavor(name)
    }

    fn add_flavor(&self, user: &str, name: &str, description: &str) -> Result<()> {
        (**self).add_flavor(user, name, description)
    }

    fn record_rating(&self, user: &str, rating: &RatingEntry) -> Result<OutcomeCounts> {
        (**self).record_rating(user, rating)
    }

    fn append_history(&self, user: &str, rating: &RatingEntry) -> Result<()> {
        (**self).append_history(user, rating)
    }

    fn history(&self, user: &str) -> Result<Vec<RatingEntry>> {
        (**self).history(user)
    }

    fn clear(&self, user: &str) -> Result<()> {
        (**self).clear(user)
    }
}

/// Pool `(name, description, counts)` records by flavor name. Counts are
/// summed slot by slot; the first description seen wins; order follows each
/// name's first appearance.
pub fn pool_by_name<I>(records: I) -> Result<Vec<CandidateSnapshot>>
where
    I: IntoIterator<Item = CandidateSnapshot>,
{
    let mut pooled: Vec<CandidateSnapshot> = Vec::new();
    for record in records {
        match pooled.iter_mut().find(|c| c.name == record.name) {
            Some(existing) => existing.counts.absorb(&record.counts)?,
            None => pooled.push(record),
        }
    }
    Ok(pooled)
}
