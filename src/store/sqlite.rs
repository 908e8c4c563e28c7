//! SQLite candidate store

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, info};

use crate::bandit::{OutcomeCounts, Scale};
use crate::error::{Result, ScoopError};

use super::{CandidateSnapshot, CandidateStore, RatingEntry, Scope, pool_by_name};

/// Current schema version, tracked in `PRAGMA user_version`.
pub const SCHEMA_VERSION: u32 = 1;

const SCHEMA_V1: &str = "
CREATE TABLE IF NOT EXISTS user_ratings (
    id                 INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id            TEXT NOT NULL,
    flavor_name        TEXT NOT NULL,
    flavor_description TEXT NOT NULL DEFAULT '',
    user_rating        INTEGER,
    ratings_array      TEXT NOT NULL,
    created_at         TEXT NOT NULL,
    updated_at         TEXT NOT NULL,
    UNIQUE (user_id, flavor_name)
);
CREATE INDEX IF NOT EXISTS idx_user_ratings_flavor ON user_ratings (flavor_name);

CREATE TABLE IF NOT EXISTS rating_history (
    id                 INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id            TEXT NOT NULL,
    flavor_name        TEXT NOT NULL,
    flavor_description TEXT NOT NULL DEFAULT '',
    rating             INTEGER NOT NULL,
    rated_at           TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_rating_history_user ON rating_history (user_id, rated_at);
";

/// Durable candidate store. Count vectors are kept as JSON arrays in
/// `user_ratings.ratings_array`; `user_rating` is NULL until the owner rates.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    scale: Scale,
    schema_version: u32,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `path`.
    pub fn open(path: impl AsRef<Path>, scale: Scale) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        Self::configure_pragmas(&conn)?;
        let schema_version = Self::migrate(&conn)?;
        info!(path = %path.display(), schema_version, "opened candidate store");

        Ok(Self {
            conn: Mutex::new(conn),
            scale,
            schema_version,
        })
    }

    /// Throwaway database that vanishes with the store.
    pub fn open_in_memory(scale: Scale) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let schema_version = Self::migrate(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            scale,
            schema_version,
        })
    }

    /// Schema version after migrations.
    pub const fn schema_version(&self) -> u32 {
        self.schema_version
    }

    fn configure_pragmas(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA temp_store = MEMORY;
             PRAGMA foreign_keys = ON;",
        )?;
        Ok(())
    }

    fn migrate(conn: &Connection) -> Result<u32> {
        let current: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if current > SCHEMA_VERSION {
            return Err(ScoopError::Config(format!(
                "database schema version {current} is newer than supported {SCHEMA_VERSION}"
            )));
        }
        if current < 1 {
            debug!("applying schema v1");
            conn.execute_batch(SCHEMA_V1)?;
            conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        }
        Ok(SCHEMA_VERSION)
    }

    fn encode_counts(counts: &OutcomeCounts) -> Result<String> {
        Ok(serde_json::to_string(counts.as_slice())?)
    }

    fn decode_counts(&self, raw: &str) -> Result<OutcomeCounts> {
        let values: Vec<u64> = serde_json::from_str(raw)?;
        OutcomeCounts::restore(self.scale, &values)
    }

    fn insert_history(
        conn: &Connection,
        user: &str,
        rating: &RatingEntry,
        outcome: usize,
    ) -> Result<()> {
        conn.execute(
            "INSERT INTO rating_history (user_id, flavor_name, flavor_description, rating, rated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                user,
                rating.flavor,
                rating.description,
                outcome as i64,
                timestamp(&rating.rated_at)
            ],
        )?;
        Ok(())
    }

    fn load_records(&self, sql: &str, param: Option<&str>) -> Result<Vec<CandidateSnapshot>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(sql)?;
        let map_row = |row: &rusqlite::Row<'_>| -> rusqlite::Result<(String, String, String)> {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        };
        let rows = match param {
            Some(value) => stmt
                .query_map([value], map_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?,
            None => stmt
                .query_map([], map_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?,
        };
        drop(stmt);
        drop(conn);

        rows.into_iter()
            .map(|(name, description, raw)| {
                let counts = self.decode_counts(&raw)?;
                Ok(CandidateSnapshot {
                    name,
                    description,
                    counts,
                })
            })
            .collect()
    }
}

/// Fixed-width UTC timestamps so text ordering matches time ordering.
fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|err| ScoopError::Serialization(format!("timestamp {raw}: {err}")))
}

impl CandidateStore for SqliteStore {
    fn scale(&self) -> Scale {
        self.scale
    }

    fn snapshot(&self, scope: &Scope) -> Result<Vec<CandidateSnapshot>> {
        match scope {
            Scope::Personal(user) => self.load_records(
                "SELECT flavor_name, flavor_description, ratings_array
                 FROM user_ratings WHERE user_id = ?1 ORDER BY id",
                Some(user.as_str()),
            ),
            Scope::Community => pool_by_name(self.load_records(
                "SELECT flavor_name, flavor_description, ratings_array
                 FROM user_ratings ORDER BY id",
                None,
            )?),
        }
    }

    fn find_flavor(&self, name: &str) -> Result<Option<CandidateSnapshot>> {
        let records = self.load_records(
            "SELECT flavor_name, flavor_description, ratings_array
             FROM user_ratings WHERE flavor_name = ?1 ORDER BY id",
            Some(name),
        )?;
        Ok(pool_by_name(records)?.into_iter().next())
    }

    fn add_flavor(&self, user: &str, name: &str, description: &str) -> Result<()> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        let exists: Option<i64> = tx
            .query_row(
                "SELECT id FROM user_ratings WHERE flavor_name = ?1 LIMIT 1",
                [name],
                |row| row.get(0),
            )
            .optional()?;
        if exists.is_some() {
            return Err(ScoopError::FlavorExists(name.to_string()));
        }

        let now = timestamp(&Utc::now());
        tx.execute(
            "INSERT INTO user_ratings
                (user_id, flavor_name, flavor_description, user_rating, ratings_array, created_at, updated_at)
             VALUES (?1, ?2, ?3, NULL, ?4, ?5, ?5)",
            params![
                user,
                name,
                description,
                Self::encode_counts(&OutcomeCounts::uniform(self.scale))?,
                now
            ],
        )?;
        tx.commit()?;
        debug!(user, flavor = name, "added flavor");
        Ok(())
    }

    fn record_rating(&self, user: &str, rating: &RatingEntry) -> Result<OutcomeCounts> {
        let outcome = rating.outcome.min(self.scale.max_outcome());
        let now = timestamp(&Utc::now());

        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        let existing: Option<(i64, String)> = tx
            .query_row(
                "SELECT id, ratings_array FROM user_ratings
                 WHERE user_id = ?1 AND flavor_name = ?2",
                [user, rating.flavor.as_str()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let mut counts = match &existing {
            Some((_, raw)) => self.decode_counts(raw)?,
            None => OutcomeCounts::uniform(self.scale),
        };
        counts.increment(outcome);
        let encoded = Self::encode_counts(&counts)?;

        match existing {
            Some((id, _)) => {
                tx.execute(
                    "UPDATE user_ratings
                     SET user_rating = ?1, ratings_array = ?2, updated_at = ?3
                     WHERE id = ?4",
                    params![outcome as i64, encoded, now, id],
                )?;
            }
            None => {
                tx.execute(
                    "INSERT INTO user_ratings
                        (user_id, flavor_name, flavor_description, user_rating, ratings_array, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
                    params![
                        user,
                        rating.flavor,
                        rating.description,
                        outcome as i64,
                        encoded,
                        now
                    ],
                )?;
            }
        }

        Self::insert_history(&tx, user, rating, outcome)?;
        tx.commit()?;
        debug!(user, flavor = %rating.flavor, outcome, "recorded rating");
        Ok(counts)
    }

    fn append_history(&self, user: &str, rating: &RatingEntry) -> Result<()> {
        let outcome = rating.outcome.min(self.scale.max_outcome());
        let conn = self.conn.lock();
        Self::insert_history(&conn, user, rating, outcome)?;
        debug!(user, flavor = %rating.flavor, outcome, "recorded history-only rating");
        Ok(())
    }

    fn history(&self, user: &str) -> Result<Vec<RatingEntry>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT flavor_name, flavor_description, rating, rated_at
             FROM rating_history WHERE user_id = ?1
             ORDER BY rated_at DESC, id DESC",
        )?;
        let rows = stmt
            .query_map([user], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter()
            .map(|(flavor, description, rating, rated_at)| {
                Ok(RatingEntry {
                    flavor,
                    description,
                    outcome: usize::try_from(rating).unwrap_or(0),
                    rated_at: parse_timestamp(&rated_at)?,
                })
            })
            .collect()
    }

    fn clear(&self, user: &str) -> Result<()> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        let records = tx.execute("DELETE FROM user_ratings WHERE user_id = ?1", [user])?;
        let ratings = tx.execute("DELETE FROM rating_history WHERE user_id = ?1", [user])?;
        tx.commit()?;
        info!(user, records, ratings, "cleared user data");
        Ok(())
    }
}
