use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::bandit::Scale;
use crate::error::{Result, ScoopError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bandit: BanditConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub recommend: RecommendConfig,
}

impl Config {
    pub fn load(explicit_path: Option<&Path>, root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("SCOOP_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_project(root)? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Parse a complete config from TOML text, without layering.
    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(raw).map_err(|err| ScoopError::Config(format!("parse config: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    /// The outcome scale configured for the bandit.
    pub fn scale(&self) -> Result<Scale> {
        Scale::new(self.bandit.outcomes)
    }

    /// Database location, resolving relative paths against `root`.
    #[must_use]
    pub fn database_path(&self, root: &Path) -> PathBuf {
        match &self.store.database {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => root.join(path),
            None => root.join("scoop.db"),
        }
    }

    fn validate(&self) -> Result<()> {
        self.scale()?;
        Ok(())
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let Some(dir) = dirs::config_dir() else {
            return Ok(None);
        };
        Self::load_patch(&dir.join("scoop/config.toml"))
    }

    fn load_project(root: &Path) -> Result<Option<ConfigPatch>> {
        Self::load_patch(&root.join("config.toml"))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| ScoopError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| ScoopError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.bandit {
            self.bandit.merge(patch);
        }
        if let Some(patch) = patch.store {
            self.store.merge(patch);
        }
        if let Some(patch) = patch.recommend {
            self.recommend.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(value) = env_usize("SCOOP_BANDIT_OUTCOMES")? {
            self.bandit.outcomes = value;
        }
        if let Some(value) = env_u64("SCOOP_BANDIT_SEED")? {
            self.bandit.seed = Some(value);
        }

        if let Some(value) = env_string("SCOOP_STORE_DATABASE") {
            self.store.database = Some(PathBuf::from(value));
        }
        if let Some(value) = env_string("SCOOP_USER") {
            self.store.user = Some(value);
        }

        if let Some(value) = env_string("SCOOP_RECOMMEND_SCOPE") {
            self.recommend.scope = parse_scope_kind(&value)?;
        }
        if let Some(value) = env_bool("SCOOP_RECOMMEND_FALLBACK") {
            self.recommend.fallback_to_catalog = value;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BanditConfig {
    /// Size of the ordinal rating scale (`K`).
    pub outcomes: usize,
    /// Seed for a reproducible random source; unset draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for BanditConfig {
    fn default() -> Self {
        Self {
            outcomes: Scale::DEFAULT_OUTCOMES,
            seed: None,
        }
    }
}

impl BanditConfig {
    fn merge(&mut self, patch: BanditPatch) {
        if let Some(value) = patch.outcomes {
            self.outcomes = value;
        }
        if let Some(value) = patch.seed {
            self.seed = Some(value);
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub database: Option<PathBuf>,
    /// Default user for commands that take `--user`.
    pub user: Option<String>,
}

impl StoreConfig {
    fn merge(&mut self, patch: StorePatch) {
        if let Some(value) = patch.database {
            self.database = Some(value);
        }
        if let Some(value) = patch.user {
            self.user = Some(value);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeKind {
    Personal,
    #[default]
    Community,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendConfig {
    pub scope: ScopeKind,
    pub fallback_to_catalog: bool,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            scope: ScopeKind::Community,
            fallback_to_catalog: true,
        }
    }
}

impl RecommendConfig {
    fn merge(&mut self, patch: RecommendPatch) {
        if let Some(value) = patch.scope {
            self.scope = value;
        }
        if let Some(value) = patch.fallback_to_catalog {
            self.fallback_to_catalog = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub bandit: Option<BanditPatch>,
    pub store: Option<StorePatch>,
    pub recommend: Option<RecommendPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct BanditPatch {
    pub outcomes: Option<usize>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct StorePatch {
    pub database: Option<PathBuf>,
    pub user: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RecommendPatch {
    pub scope: Option<ScopeKind>,
    pub fallback_to_catalog: Option<bool>,
}

pub fn parse_scope_kind(value: &str) -> Result<ScopeKind> {
    match value.to_lowercase().as_str() {
        "personal" | "user" => Ok(ScopeKind::Personal),
        "community" | "all" => Ok(ScopeKind::Community),
        _ => Err(ScoopError::Config(format!(
            "invalid scope {value} (expected personal|community)"
        ))),
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key).ok().map(|value| {
        matches!(
            value.to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

fn env_usize(key: &str) -> Result<Option<usize>> {
    match std::env::var(key) {
        Ok(value) => value.parse::<usize>().map(Some).map_err(|err| {
            ScoopError::Config(format!("invalid {key} value {value}: {err}"))
        }),
        Err(_) => Ok(None),
    }
}

fn env_u64(key: &str) -> Result<Option<u64>> {
    match std::env::var(key) {
        Ok(value) => value.parse::<u64>().map(Some).map_err(|err| {
            ScoopError::Config(format!("invalid {key} value {value}: {err}"))
        }),
        Err(_) => Ok(None),
    }
}
