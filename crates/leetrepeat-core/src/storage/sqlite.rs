//! SQLite Storage Implementation
//!
//! Problem records in a single `problems` table. Timestamps are integer
//! microseconds since the Unix epoch, which covers every `DateTime<Utc>`;
//! row order (`rowid`) is insertion order.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use super::{ProblemRepository, Result, StorageError};
use crate::config::Config;
use crate::problem::{Problem, ProblemMemoryState};

/// SQLite-backed problem repository
///
/// Uses separate reader/writer connections for interior mutability.
/// All methods take `&self`, so the repository is `Send + Sync` and can be
/// shared behind an `Arc`.
pub struct SqliteRepository {
    writer: Mutex<Connection>,
    reader: Mutex<Connection>,
    path: PathBuf,
}

impl SqliteRepository {
    /// Apply PRAGMAs and optional encryption to a connection
    fn configure_connection(conn: &Connection) -> Result<()> {
        // Apply encryption key if SQLCipher is enabled and key is provided
        #[cfg(feature = "encryption")]
        {
            if let Ok(key) = std::env::var(crate::config::ENCRYPTION_KEY_ENV) {
                if !key.is_empty() {
                    conn.pragma_update(None, "key", &key)?;
                }
            }
        }

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA foreign_keys = ON;
             PRAGMA busy_timeout = 5000;",
        )?;

        Ok(())
    }

    /// Open (or create) the database at `path` and run migrations
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let writer_conn = Connection::open(&path)?;

        // Restrict database file permissions to owner-only on Unix
        #[cfg(unix)]
        if path.exists() {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            let _ = std::fs::set_permissions(&path, perms);
        }

        Self::configure_connection(&writer_conn)?;

        // Apply migrations on writer only
        let applied = super::migrations::apply_migrations(&writer_conn)?;
        if applied > 0 {
            tracing::info!("Applied {} migration(s) to {}", applied, path.display());
        }

        let reader_conn = Connection::open(&path)?;
        Self::configure_connection(&reader_conn)?;

        tracing::debug!("Opened problem database at {}", path.display());

        Ok(Self {
            writer: Mutex::new(writer_conn),
            reader: Mutex::new(reader_conn),
            path,
        })
    }

    /// Open the database described by `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        config.ensure_data_dir()?;
        Self::open(config.db_path())
    }

    /// Path to the database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of stored problems
    pub fn count(&self) -> Result<i64> {
        let reader = self.reader.lock()
            .map_err(|_| StorageError::Init("Reader lock poisoned".into()))?;
        let count = reader.query_row("SELECT COUNT(*) FROM problems", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Flush the WAL into the main database file
    pub fn checkpoint(&self) -> Result<()> {
        let writer = self.writer.lock()
            .map_err(|_| StorageError::Init("Writer lock poisoned".into()))?;
        writer.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }

    /// Timestamp from stored epoch microseconds
    fn parse_timestamp(value: i64, field_name: &str) -> rusqlite::Result<DateTime<Utc>> {
        DateTime::from_timestamp_micros(value).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Integer,
                Box::new(StorageError::InvalidTimestamp(format!(
                    "{} {} is out of range",
                    field_name, value
                ))),
            )
        })
    }

    /// Convert a row to Problem
    fn row_to_problem(row: &rusqlite::Row) -> rusqlite::Result<Problem> {
        let created_at: i64 = row.get("created_at")?;
        let next_review_at: i64 = row.get("next_review_at")?;
        let last_reviewed_at: Option<i64> = row.get("last_reviewed_at")?;

        let last_reviewed_at = match last_reviewed_at {
            Some(micros) => Some(Self::parse_timestamp(micros, "last_reviewed_at")?),
            None => None,
        };

        Ok(Problem {
            id: row.get("id")?,
            url: row.get("url")?,
            title: row.get("title")?,
            created_at: Self::parse_timestamp(created_at, "created_at")?,
            state: ProblemMemoryState {
                easiness_factor: row.get("easiness_factor")?,
                repetition_count: row.get("repetition_count")?,
                interval_days: row.get("interval_days")?,
                next_review_at: Self::parse_timestamp(next_review_at, "next_review_at")?,
                last_reviewed_at,
            },
        })
    }
}

impl ProblemRepository for SqliteRepository {
    fn load_all(&self) -> Result<Vec<Problem>> {
        let reader = self.reader.lock()
            .map_err(|_| StorageError::Init("Reader lock poisoned".into()))?;
        let mut stmt = reader.prepare("SELECT * FROM problems ORDER BY rowid ASC")?;

        let problems = stmt.query_map([], |row| Self::row_to_problem(row))?;

        let mut result = Vec::new();
        for problem in problems {
            result.push(problem?);
        }
        Ok(result)
    }

    fn load(&self, id: &str) -> Result<Option<Problem>> {
        let reader = self.reader.lock()
            .map_err(|_| StorageError::Init("Reader lock poisoned".into()))?;
        let mut stmt = reader.prepare("SELECT * FROM problems WHERE id = ?1")?;

        let problem = stmt
            .query_row(params![id], |row| Self::row_to_problem(row))
            .optional()?;
        Ok(problem)
    }

    fn save(&self, problem: &Problem) -> Result<()> {
        problem.state.validate()?;

        let state = &problem.state;
        let writer = self.writer.lock()
            .map_err(|_| StorageError::Init("Writer lock poisoned".into()))?;
        writer.execute(
            "INSERT INTO problems (
                id, url, title, created_at,
                easiness_factor, repetition_count, interval_days,
                next_review_at, last_reviewed_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT(id) DO UPDATE SET
                url = excluded.url,
                title = excluded.title,
                created_at = excluded.created_at,
                easiness_factor = excluded.easiness_factor,
                repetition_count = excluded.repetition_count,
                interval_days = excluded.interval_days,
                next_review_at = excluded.next_review_at,
                last_reviewed_at = excluded.last_reviewed_at",
            params![
                problem.id,
                problem.url,
                problem.title,
                problem.created_at.timestamp_micros(),
                state.easiness_factor,
                state.repetition_count,
                state.interval_days,
                state.next_review_at.timestamp_micros(),
                state.last_reviewed_at.map(|dt| dt.timestamp_micros()),
            ],
        )?;
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<bool> {
        let writer = self.writer.lock()
            .map_err(|_| StorageError::Init("Writer lock poisoned".into()))?;
        let rows = writer.execute("DELETE FROM problems WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }
}

// ============================================================================
// TESTS
// ============================================================================
