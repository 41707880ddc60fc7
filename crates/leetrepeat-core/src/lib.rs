//! # LeetRepeat Core
//!
//! Spaced-repetition tracking for coding-practice problems:
//!
//! - **SM-2 Scheduling**: grade a recall 0-5, get the next easiness factor,
//!   interval, and review date
//! - **Review Queue**: split problems into due-now and upcoming
//! - **Storage**: SQLite (default) or in-memory, one record per problem
//! - **Display helpers**: grade labels and "Today"/"Tomorrow" due labels
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use leetrepeat_core::prelude::*;
//! use chrono::Utc;
//!
//! let repo = SqliteRepository::from_config(&Config::resolve(None)?)?;
//! let tracker = ReviewTracker::new(repo);
//!
//! let problem = tracker.add_problem(
//!     NewProblem::from_url("https://leetcode.com/problems/two-sum/"),
//!     &Utc::now(),
//! )?;
//! tracker.grade(&problem.id, Grade::new(4)?, &Utc::now())?;
//!
//! let queue = tracker.queue(&Utc::now())?;
//! ```
//!
//! ## Feature Flags
//!
//! - `bundled-sqlite` (default): Compile SQLite into the binary
//! - `encryption`: SQLCipher, keyed from `LEETREPEAT_ENCRYPTION_KEY`

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod config;
pub mod display;
pub mod problem;
pub mod queue;
pub mod sm2;
pub mod storage;
pub mod tracker;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Problem types
pub use problem::{title_from_url, NewProblem, Problem, ProblemMemoryState, FALLBACK_TITLE};

// SM-2 algorithm
pub use sm2::{
    add_calendar_days, schedule, Grade, PreviewOutcome, PreviewResults, ScheduleError,
    Sm2Parameters, Sm2Scheduler, DEFAULT_EASINESS, FIRST_INTERVAL_DAYS, MIN_EASINESS,
    SECOND_INTERVAL_DAYS,
};

// Review queue
pub use queue::{partition, partition_by, partition_problems, ReviewQueue};

// Storage layer
pub use storage::{MemoryRepository, ProblemRepository, Result, SqliteRepository, StorageError};

// Orchestration
pub use tracker::{ReviewTracker, TrackerStats};

// Display
pub use display::{due_label, grade_info, DueLabel, GradeInfo, GRADE_INFO};

pub use config::Config;

// ============================================================================
// VERSION INFO
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// PRELUDE
// ============================================================================

/// Convenient imports for common usage
pub mod prelude {
    pub use crate::{
        Config, Grade, MemoryRepository, NewProblem, Problem, ProblemMemoryState,
        ProblemRepository, Result, ReviewQueue, ReviewTracker, ScheduleError, Sm2Scheduler,
        SqliteRepository, StorageError,
    };
}
