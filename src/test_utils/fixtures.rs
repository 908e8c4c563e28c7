use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::bandit::Scale;
use crate::store::{CandidateStore, SqliteStore};

/// Isolated data root with its own database file.
pub struct DataRootFixture {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl Default for DataRootFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl DataRootFixture {
    #[must_use]
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path().to_path_buf();

        println!("[FIXTURE] Created data root: {root:?}");

        Self { temp_dir, root }
    }

    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.root.join("scoop.db")
    }

    /// Open (or reopen) the fixture's database on `scale`.
    #[must_use]
    pub fn open_store(&self, scale: Scale) -> SqliteStore {
        SqliteStore::open(self.database_path(), scale).expect("Failed to open store")
    }

    /// Store on the default scale with `ratings` applied in order.
    #[must_use]
    pub fn seeded_store(&self, ratings: &[(&str, &str, f64)]) -> SqliteStore {
        let store = self.open_store(Scale::default());
        for (user, flavor, outcome) in ratings {
            let entry = crate::store::RatingEntry::now(store.scale(), *flavor, "", *outcome);
            store
                .record_rating(user, &entry)
                .expect("Failed to seed rating");
        }
        store
    }

    /// Write `config.toml` at the data root.
    #[must_use]
    pub fn write_config(&self, content: &str) -> PathBuf {
        self.create_file("config.toml", content)
    }

    #[must_use]
    pub fn create_file(&self, relative_path: impl AsRef<Path>, content: &str) -> PathBuf {
        let full_path = self.root.join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        println!(
            "[FIXTURE] Created file: {:?} ({} bytes)",
            full_path,
            content.len()
        );
        full_path
    }
}

impl Drop for DataRootFixture {
    fn drop(&mut self) {
        println!("[FIXTURE] Cleaning up data root: {:?}", self.root);
    }
}
