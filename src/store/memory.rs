//! In-process candidate store.

use parking_lot::Mutex;

use crate::bandit::{OutcomeCounts, Scale};
use crate::error::{Result, ScoopError};

use super::{CandidateSnapshot, CandidateStore, RatingEntry, Scope, pool_by_name};

#[derive(Debug, Clone)]
struct Record {
    user: String,
    name: String,
    description: String,
    counts: OutcomeCounts,
}

impl Record {
    fn snapshot(&self) -> CandidateSnapshot {
        CandidateSnapshot {
            name: self.name.clone(),
            description: self.description.clone(),
            counts: self.counts.clone(),
        }
    }
}

#[derive(Debug, Default)]
struct State {
    records: Vec<Record>,
    history: Vec<(String, RatingEntry)>,
}

/// Candidate store that lives as long as the process.
#[derive(Debug)]
pub struct MemoryStore {
    scale: Scale,
    state: Mutex<State>,
}

impl MemoryStore {
    #[must_use]
    pub fn new(scale: Scale) -> Self {
        Self {
            scale,
            state: Mutex::new(State::default()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(Scale::default())
    }
}

impl CandidateStore for MemoryStore {
    fn scale(&self) -> Scale {
        self.scale
    }

    fn snapshot(&self, scope: &Scope) -> Result<Vec<CandidateSnapshot>> {
        let state = self.state.lock();
        match scope {
            Scope::Personal(user) => Ok(state
                .records
                .iter()
                .filter(|r| &r.user == user)
                .map(Record::snapshot)
                .collect()),
            Scope::Community => pool_by_name(state.records.iter().map(Record::snapshot)),
        }
    }

    fn find_flavor(&self, name: &str) -> Result<Option<CandidateSnapshot>> {
        let state = self.state.lock();
        let pooled = pool_by_name(
            state
                .records
                .iter()
                .filter(|r| r.name == name)
                .map(Record::snapshot),
        )?;
        Ok(pooled.into_iter().next())
    }

    fn add_flavor(&self, user: &str, name: &str, description: &str) -> Result<()> {
        let mut state = self.state.lock();
        if state.records.iter().any(|r| r.name == name) {
            return Err(ScoopError::FlavorExists(name.to_string()));
        }
        state.records.push(Record {
            user: user.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            counts: OutcomeCounts::uniform(self.scale),
        });
        Ok(())
    }

    fn record_rating(&self, user: &str, rating: &RatingEntry) -> Result<OutcomeCounts> {
        let mut state = self.state.lock();
        let index = match state
            .records
            .iter()
            .position(|r| r.user == user && r.name == rating.flavor)
        {
            Some(index) => index,
            None => {
                state.records.push(Record {
                    user: user.to_string(),
                    name: rating.flavor.clone(),
                    description: rating.description.clone(),
                            counts: OutcomeCounts::uniform(self.scale),
                });
                state.records.len() - 1
            }
        };
        let outcome = rating.outcome.min(self.scale.max_outcome());
        let record = &mut state.records[index];
        record.counts.increment(outcome);
        let counts = record.counts.clone();
        state.history.push((user.to_string(), rating.clone()));
        Ok(counts)
    }

    fn append_history(&self, user: &str, rating: &RatingEntry) -> Result<()> {
        self.state
            .lock()
            .history
            .push((user.to_string(), rating.clone()));
        Ok(())
    }

    fn history(&self, user: &str) -> Result<Vec<RatingEntry>> {
        let state = self.state.lock();
        let mut entries: Vec<RatingEntry> = state
            .history
            .iter()
            .filter(|(owner, _)| owner == user)
            .map(|(_, entry)| entry.clone())
            .collect();
        // Stable sort keeps insertion order for equal timestamps; reverse it
        // so the latest insert comes first.
        entries.reverse();
        entries.sort_by(|a, b| b.rated_at.cmp(&a.rated_at));
        Ok(entries)
    }

    fn clear(&self, user: &str) -> Result<()> {
        let mut state = self.state.lock();
        state.records.retain(|r| r.user != user);
        state.history.retain(|(owner, _)| owner != user);
        Ok(())
    }
}
