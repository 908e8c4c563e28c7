use std::path::{Path, PathBuf};
use std::sync::Arc;

use rand::rngs::StdRng;
use tracing::debug;

use crate::config::Config;
use crate::error::{Result, ScoopError};
use crate::recommend::{ANONYMOUS_USER, Recommender};
use crate::store::SqliteStore;

pub struct AppContext {
    pub config: Config,
    pub store: Arc<SqliteStore>,
    pub robot_mode: bool,
}

impl AppContext {
    pub fn from_cli(cli: &crate::cli::Cli) -> Result<Self> {
        let root = Self::find_root()?;
        let config = Config::load(cli.config.as_deref(), &root)?;
        let database = config.database_path(&root);
        debug!(root = %root.display(), database = %database.display(), "resolved data root");

        Ok(Self {
            store: Arc::new(SqliteStore::open(&database, config.scale()?)?),
            config,
            robot_mode: cli.robot,
        })
    }

    /// Fresh recommender over the shared store.
    pub fn recommender(&self) -> Result<Recommender<Arc<SqliteStore>, StdRng>> {
        Recommender::from_config(Arc::clone(&self.store), &self.config)
    }

    /// Explicit `--user`, then the configured user, then the anonymous user.
    #[must_use]
    pub fn user(&self, explicit: Option<&str>) -> String {
        explicit
            .map(str::to_string)
            .or_else(|| self.config.store.user.clone())
            .unwrap_or_else(|| ANONYMOUS_USER.to_string())
    }

    fn find_root() -> Result<PathBuf> {
        if let Ok(root) = std::env::var("SCOOP_ROOT") {
            return Ok(PathBuf::from(root));
        }
        let cwd = std::env::current_dir()?;
        if let Some(found) = find_upwards(&cwd, ".scoop") {
            return Ok(found);
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| ScoopError::Config("data directory not found".to_string()))?;
        Ok(data_dir.join("scoop"))
    }
}

fn find_upwards(start: &Path, name: &str) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        let candidate = dir.join(name);
        if candidate.is_dir() {
            return Some(candidate);
        }
        current = dir.parent();
    }
    None
}
