//! Recommendation service: glues a candidate store to the bandit core.
//!
//! Every request rebuilds a fresh `BanditModel` from the store's current
//! snapshot; nothing about the posterior is cached between calls.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::bandit::{BanditModel, OutcomeCounts, Scale};
use crate::catalog;
use crate::config::{Config, RecommendConfig, ScopeKind};
use crate::error::{Result, ScoopError};
use crate::store::{CandidateSnapshot, CandidateStore, RatingEntry, Scope};

/// User id for ratings made without signing in.
pub const ANONYMOUS_USER: &str = "anonymous";

/// Where a recommendation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Chosen by posterior sampling over stored candidates.
    Bandit,
    /// Picked uniformly from the built-in catalog.
    Catalog,
}

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub flavor: CandidateSnapshot,
    pub source: Source,
    /// Winning posterior score, for bandit picks.
    pub score: Option<f64>,
    /// Number of candidates considered.
    pub candidates: usize,
}

/// Posterior summary of one stored flavor.
#[derive(Debug, Clone, Serialize)]
pub struct FlavorStats {
    pub name: String,
    pub description: String,
    pub counts: OutcomeCounts,
    pub observations: u64,
    pub expected_value: f64,
    pub distribution: Vec<f64>,
}

pub struct Recommender<S, R = StdRng> {
    store: S,
    settings: RecommendConfig,
    rng: R,
}

impl<S: CandidateStore> Recommender<S, StdRng> {
    /// Recommender using the configured seed, or OS entropy when unset.
    pub fn from_config(store: S, config: &Config) -> Result<Self> {
        let scale = config.scale()?;
        if store.scale() != scale {
            return Err(ScoopError::Config(format!(
                "store uses {} outcomes, config expects {}",
                store.scale().outcomes(),
                scale.outcomes()
            )));
        }
        let rng = match config.bandit.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self::new(store, config.recommend.clone(), rng))
    }
}

impl<S: CandidateStore, R: Rng> Recommender<S, R> {
    pub const fn new(store: S, settings: RecommendConfig, rng: R) -> Self {
        Self {
            store,
            settings,
            rng,
        }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub fn scale(&self) -> Scale {
        self.store.scale()
    }

    /// Scope for `user` under the configured (or overridden) scope kind.
    pub fn scope_for(&self, kind: Option<ScopeKind>, user: &str) -> Scope {
        match kind.unwrap_or(self.settings.scope) {
            ScopeKind::Personal => Scope::Personal(user.to_string()),
            ScopeKind::Community => Scope::Community,
        }
    }

    /// Pick the next flavor to present.
    pub fn recommend(&mut self, scope: &Scope) -> Result<Recommendation> {
        let candidates = match self.store.snapshot(scope) {
            Ok(candidates) => candidates,
            Err(err) if self.settings.fallback_to_catalog => {
                warn!(error = %err, "candidate store unavailable, using catalog");
                return Ok(self.from_catalog());
            }
            Err(err) => return Err(err),
        };

        if candidates.is_empty() {
            if self.settings.fallback_to_catalog {
                debug!(?scope, "no stored candidates, using catalog");
                return Ok(self.from_catalog());
            }
            return Err(ScoopError::EmptyModel);
        }

        let arms = candidates.iter().map(|c| c.counts.clone()).collect();
        let model = BanditModel::from_arms(self.scale(), arms)?;
        let (arm, score) = model.select_with_score(&mut self.rng)?;
        let total = candidates.len();
        let flavor = candidates
            .into_iter()
            .nth(arm)
            .ok_or(ScoopError::OutOfRange { index: arm, arms: total })?;

        info!(flavor = %flavor.name, score, candidates = total, "recommended flavor");
        Ok(Recommendation {
            flavor,
            source: Source::Bandit,
            score: Some(score),
            candidates: total,
        })
    }

    fn from_catalog(&mut self) -> Recommendation {
        let scale = self.scale();
        let flavor = catalog::random(&mut self.rng).snapshot(scale);
        info!(flavor = %flavor.name, "recommended catalog flavor");
        Recommendation {
            flavor,
            source: Source::Catalog,
            score: None,
            candidates: catalog::flavors().len(),
        }
    }

    /// Record `user`'s rating of a flavor. The outcome is rounded and clamped
    /// onto the scale. Returns that user's updated counts for the flavor.
    ///
    /// Anonymous ratings only land in history: they never create a candidate
    /// or move a posterior, and the result is `None`.
    pub fn rate(
        &self,
        user: &str,
        flavor: &str,
        description: Option<&str>,
        outcome: f64,
    ) -> Result<Option<OutcomeCounts>> {
        let flavor = non_empty(flavor, "flavor name")?;
        let description = match description {
            Some(text) => text.to_string(),
            None => self.known_description(flavor)?,
        };
        let entry = RatingEntry::now(self.scale(), flavor, description, outcome);

        if !is_signed_in(user) {
            self.store.append_history(ANONYMOUS_USER, &entry)?;
            info!(flavor, outcome = entry.outcome, "anonymous rating kept in history only");
            return Ok(None);
        }

        let counts = self.store.record_rating(user, &entry)?;
        info!(user, flavor, outcome = entry.outcome, "rating recorded");
        Ok(Some(counts))
    }

    /// Register a new flavor. Only signed-in users may add flavors.
    pub fn add_flavor(&self, user: &str, name: &str, description: &str) -> Result<()> {
        require_user(user)?;
        let name = non_empty(name, "flavor name")?;
        self.store.add_flavor(user, name, description.trim())?;
        info!(user, flavor = name, "flavor added");
        Ok(())
    }

    /// Pooled stored record of one flavor.
    pub fn flavor(&self, name: &str) -> Result<CandidateSnapshot> {
        self.store
            .find_flavor(name)?
            .ok_or_else(|| ScoopError::FlavorNotFound(name.to_string()))
    }

    pub fn history(&self, user: &str) -> Result<Vec<RatingEntry>> {
        self.store.history(user)
    }

    pub fn clear(&self, user: &str) -> Result<()> {
        self.store.clear(user)
    }

    /// Posterior summaries for every candidate in `scope`, in snapshot order.
    pub fn stats(&self, scope: &Scope) -> Result<Vec<FlavorStats>> {
        let candidates = self.store.snapshot(scope)?;
        let model = BanditModel::from_arms(
            self.scale(),
            candidates.iter().map(|c| c.counts.clone()).collect(),
        )?;
        candidates
            .into_iter()
            .enumerate()
            .map(|(arm, candidate)| {
                Ok(FlavorStats {
                    observations: candidate.counts.observations(),
                    expected_value: model.expected_value(arm)?,
                    distribution: model.value_distribution(arm)?,
                    name: candidate.name,
                    description: candidate.description,
                    counts: candidate.counts,
                })
            })
            .collect()
    }

    fn known_description(&self, flavor: &str) -> Result<String> {
        if let Some(found) = self.store.find_flavor(flavor)? {
            return Ok(found.description);
        }
        Ok(catalog::find(flavor)
            .map(|f| f.description.to_string())
            .unwrap_or_default())
    }
}

fn is_signed_in(user: &str) -> bool {
    let user = user.trim();
    !user.is_empty() && user != ANONYMOUS_USER
}

fn require_user(user: &str) -> Result<()> {
    if !is_signed_in(user) {
        return Err(ScoopError::AuthRequired(
            "must be signed in to add new flavors".to_string(),
        ));
    }
    Ok(())
}

fn non_empty<'a>(value: &'a str, what: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ScoopError::InvalidInput(format!("{what} must not be empty")));
    }
    Ok(trimmed)
}
