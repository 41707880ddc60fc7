//! Storage Module
//!
//! Per-record persistence behind [`ProblemRepository`]:
//! - SQLite backend with versioned migrations
//! - In-memory backend for tests and embedding
//!
//! The scheduler never calls into this module; callers load a record,
//! schedule it, and save the result.

mod memory;
mod migrations;
mod sqlite;

pub use memory::MemoryRepository;
pub use migrations::{apply_migrations, get_current_version, Migration, MIGRATIONS};
pub use sqlite::SqliteRepository;

use crate::problem::Problem;
use crate::sm2::ScheduleError;

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Storage error type
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    /// Problem not found
    #[error("Problem not found: {0}")]
    NotFound(String),
    /// Id prefix matches more than one problem
    #[error("Ambiguous problem id '{0}': matches {1} problems")]
    Ambiguous(String, usize),
    /// Rejected input
    #[error("Invalid input: {0}")]
    Invalid(String),
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Invalid timestamp
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
    /// Scheduling error
    #[error("Scheduling error: {0}")]
    Schedule(#[from] ScheduleError),
    /// Initialization error
    #[error("Initialization error: {0}")]
    Init(String),
}

/// Storage result type
pub type Result<T> = std::result::Result<T, StorageError>;

// ============================================================================
// REPOSITORY
// ============================================================================

/// Load/save interface over problem records
///
/// Implementations serialize their own statements but give no lost-update
/// protection across a load-then-save pair; that belongs to the caller.
pub trait ProblemRepository: Send + Sync {
    /// All problems in insertion order
    fn load_all(&self) -> Result<Vec<Problem>>;

    /// One problem by exact id
    fn load(&self, id: &str) -> Result<Option<Problem>>;

    /// Insert or replace a problem. Replacing keeps its insertion position.
    fn save(&self, problem: &Problem) -> Result<()>;

    /// Remove a problem, returning whether it existed
    fn delete(&self, id: &str) -> Result<bool>;
}

impl<R: ProblemRepository + ?Sized> ProblemRepository for Box<R> {
    fn load_all(&self) -> Result<Vec<Problem>> {
        (**self).load_all()
    }

    fn load(&self, id: &str) -> Result<Option<Problem>> {
        (**self).load(id)
    }

    fn save(&self, problem: &Problem) -> Result<()> {
        (**self).save(problem)
    }

    fn delete(&self, id: &str) -> Result<bool> {
        (**self).delete(id)
    }
}
