//! Problem - The unit being scheduled
//!
//! Each problem carries:
//! - Identity and provenance (id, url, title)
//! - SM-2 memory state (easiness, repetitions, interval, next review)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::title::title_from_url;
use crate::sm2::{ScheduleError, DEFAULT_EASINESS, FIRST_INTERVAL_DAYS, MIN_EASINESS};

// ============================================================================
// MEMORY STATE
// ============================================================================

/// SM-2 memory state of one problem
///
/// Only the scheduler produces new states; callers persist what it returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemMemoryState {
    /// How easy the problem is to recall (>= 1.3)
    pub easiness_factor: f64,
    /// Consecutive passing grades since the last fail
    pub repetition_count: u32,
    /// Days between the last review and the next one (>= 1)
    pub interval_days: u32,
    /// When the problem is next due
    pub next_review_at: DateTime<Utc>,
    /// When the problem was last graded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reviewed_at: Option<DateTime<Utc>>,
}

impl ProblemMemoryState {
    /// Creation defaults: easiness 2.5, no repetitions, due at `created_at`
    pub fn new(created_at: DateTime<Utc>) -> Self {
        Self {
            easiness_factor: DEFAULT_EASINESS,
            repetition_count: 0,
            interval_days: FIRST_INTERVAL_DAYS,
            next_review_at: created_at,
            last_reviewed_at: None,
        }
    }

    /// Check the invariants against the default easiness floor
    pub fn validate(&self) -> Result<(), ScheduleError> {
        self.validate_with(MIN_EASINESS)
    }

    /// Check the invariants against a custom easiness floor
    pub fn validate_with(&self, minimum_easiness: f64) -> Result<(), ScheduleError> {
        if !self.easiness_factor.is_finite() {
            return Err(ScheduleError::InvalidState(format!(
                "easiness factor {} is not finite",
                self.easiness_factor
            )));
        }
        if self.easiness_factor < minimum_easiness {
            return Err(ScheduleError::InvalidState(format!(
                "easiness factor {} is below {}",
                self.easiness_factor, minimum_easiness
            )));
        }
        if self.interval_days < 1 {
            return Err(ScheduleError::InvalidState(
                "interval must be at least one day".to_string(),
            ));
        }
        Ok(())
    }

    /// Due at `now` (inclusive)
    pub fn is_due_at(&self, now: DateTime<Utc>) -> bool {
        self.next_review_at <= now
    }

    /// Never graded
    pub fn is_new(&self) -> bool {
        self.last_reviewed_at.is_none()
    }
}

// ============================================================================
// PROBLEM
// ============================================================================

/// A tracked coding-practice problem
///
/// The memory state is flattened so the serialized record reads
/// `{"id", "url", "title", "easinessFactor", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    /// Unique identifier (UUID v4)
    pub id: String,
    /// Link to the problem statement
    pub url: String,
    /// Display title
    pub title: String,
    /// When the problem was added
    pub created_at: DateTime<Utc>,
    /// SM-2 scheduling state
    #[serde(flatten)]
    pub state: ProblemMemoryState,
}

impl Problem {
    /// Build a new problem from input, due immediately.
    ///
    /// Without an explicit title one is derived from the URL.
    pub fn new(input: NewProblem, created_at: DateTime<Utc>) -> Self {
        let url = input.url.trim().to_string();
        let title = match input.title.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => title_from_url(&url),
        };

        Self {
            id: Uuid::new_v4().to_string(),
            url,
            title,
            created_at,
            state: ProblemMemoryState::new(created_at),
        }
    }

    /// Check if this problem is due at `now`
    pub fn is_due_at(&self, now: DateTime<Utc>) -> bool {
        self.state.is_due_at(now)
    }

    /// Short id for display
    pub fn short_id(&self) -> &str {
        let end = self
            .id
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.id.len());
        &self.id[..end]
    }
}

// ============================================================================
// INPUT TYPES
// ============================================================================

/// Input for adding a problem
///
/// Uses `deny_unknown_fields` so typos in imported JSON fail loudly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewProblem {
    /// Link to the problem statement
    pub url: String,
    /// Optional display title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl NewProblem {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
