//! SM-2 Scheduler
//!
//! Pure state transition: (state, grade, now) -> next state. Nothing here
//! reads the clock or touches storage.

use chrono::{DateTime, Days, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::grade::Grade;
use crate::problem::ProblemMemoryState;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Easiness factor given to a newly added problem
pub const DEFAULT_EASINESS: f64 = 2.5;

/// Floor for the easiness factor
pub const MIN_EASINESS: f64 = 1.3;

/// Interval after the first successful review (days)
pub const FIRST_INTERVAL_DAYS: u32 = 1;

/// Interval after the second consecutive successful review (days)
pub const SECOND_INTERVAL_DAYS: u32 = 6;

// ============================================================================
// ERRORS
// ============================================================================

/// Scheduling error type
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScheduleError {
    /// Grade outside `[0, 5]`
    #[error("Invalid grade {0}: expected an integer between 0 and 5")]
    InvalidGrade(i64),
    /// Grade text that is not an integer
    #[error("Invalid grade '{0}': expected an integer between 0 and 5")]
    UnparsableGrade(String),
    /// Prior state violates a memory-state invariant
    #[error("Invalid memory state: {0}")]
    InvalidState(String),
    /// Scheduler parameters would produce invalid states
    #[error("Invalid SM-2 parameters: {0}")]
    InvalidParameters(String),
    /// Next review date falls outside the representable range
    #[error("Next review date is out of range")]
    DateOutOfRange,
}

// ============================================================================
// PARAMETERS
// ============================================================================

/// Tunable SM-2 constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sm2Parameters {
    /// Easiness factor for new problems
    pub initial_easiness: f64,
    /// Easiness never drops below this
    pub minimum_easiness: f64,
    /// Interval after the first pass; also the interval after any fail
    pub first_interval: u32,
    /// Interval after the second consecutive pass
    pub second_interval: u32,
    /// Lowest grade that counts as a pass
    pub pass_threshold: u8,
}

impl Default for Sm2Parameters {
    fn default() -> Self {
        Self {
            initial_easiness: DEFAULT_EASINESS,
            minimum_easiness: MIN_EASINESS,
            first_interval: FIRST_INTERVAL_DAYS,
            second_interval: SECOND_INTERVAL_DAYS,
            pass_threshold: Grade::PASS_THRESHOLD,
        }
    }
}

impl Sm2Parameters {
    /// Reject parameter sets whose output would fail state validation.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        let invalid = |msg: String| Err(ScheduleError::InvalidParameters(msg));

        if !self.minimum_easiness.is_finite() || self.minimum_easiness < MIN_EASINESS {
            return invalid(format!(
                "minimum easiness {} must be a finite value of at least {}",
                self.minimum_easiness, MIN_EASINESS
            ));
        }
        if !self.initial_easiness.is_finite() || self.initial_easiness < self.minimum_easiness {
            return invalid(format!(
                "initial easiness {} must be finite and at least the minimum {}",
                self.initial_easiness, self.minimum_easiness
            ));
        }
        if self.first_interval == 0 || self.second_interval == 0 {
            return invalid("intervals must be at least one day".to_string());
        }
        if self.pass_threshold > Grade::MAX.value() {
            return invalid(format!(
                "pass threshold {} is above the highest grade {}",
                self.pass_threshold,
                Grade::MAX
            ));
        }
        Ok(())
    }
}

// ============================================================================
// PREVIEW
// ============================================================================

/// Outcome of a single hypothetical grade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewOutcome {
    pub grade: Grade,
    pub state: ProblemMemoryState,
}

/// What every grade would do to a state, ascending by grade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResults {
    pub outcomes: Vec<PreviewOutcome>,
}

impl PreviewResults {
    /// Outcome for a specific grade
    pub fn get(&self, grade: Grade) -> Option<&ProblemMemoryState> {
        self.outcomes
            .iter()
            .find(|o| o.grade == grade)
            .map(|o| &o.state)
    }
}

// ============================================================================
// SCHEDULER
// ============================================================================

/// SM-2 scheduler
///
/// Holds only its parameters; every call receives the full prior state and
/// returns the full next state.
#[derive(Debug, Clone, Default)]
pub struct Sm2Scheduler {
    params: Sm2Parameters,
}

impl Sm2Scheduler {
    /// Create a scheduler with custom parameters
    pub fn new(params: Sm2Parameters) -> Result<Self, ScheduleError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Get the parameters
    pub fn params(&self) -> &Sm2Parameters {
        &self.params
    }

    /// State for a problem added at `now`: due immediately, never reviewed.
    pub fn new_state<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> ProblemMemoryState {
        ProblemMemoryState {
            easiness_factor: self.params.initial_easiness,
            repetition_count: 0,
            interval_days: self.params.first_interval,
            next_review_at: now.with_timezone(&Utc),
            last_reviewed_at: None,
        }
    }

    /// Apply a grade to a state.
    ///
    /// The compounding interval uses the easiness factor from *before* this
    /// review, rounded half away from zero (`f64::round`). The easiness
    /// update uses one formula for passes and fails alike.
    pub fn schedule<Tz: TimeZone>(
        &self,
        state: &ProblemMemoryState,
        grade: Grade,
        now: &DateTime<Tz>,
    ) -> Result<ProblemMemoryState, ScheduleError> {
        state.validate_with(self.params.minimum_easiness)?;

        let (repetition_count, interval_days) = if grade.value() >= self.params.pass_threshold {
            let interval = match state.repetition_count {
                0 => self.params.first_interval,
                1 => self.params.second_interval,
                _ => compound_interval(state.interval_days, state.easiness_factor),
            };
            (state.repetition_count.saturating_add(1), interval)
        } else {
            (0, self.params.first_interval)
        };

        let easiness_factor =
            next_easiness(state.easiness_factor, grade, self.params.minimum_easiness);
        let next_review_at = add_calendar_days(now, interval_days)?;

        tracing::debug!(
            grade = grade.value(),
            repetition_count,
            interval_days,
            easiness_factor,
            "scheduled review"
        );

        Ok(ProblemMemoryState {
            easiness_factor,
            repetition_count,
            interval_days,
            next_review_at,
            last_reviewed_at: Some(now.with_timezone(&Utc)),
        })
    }

    /// Schedule every grade against the same state.
    pub fn preview<Tz: TimeZone>(
        &self,
        state: &ProblemMemoryState,
        now: &DateTime<Tz>,
    ) -> Result<PreviewResults, ScheduleError> {
        let outcomes = Grade::all()
            .map(|grade| {
                self.schedule(state, grade, now)
                    .map(|state| PreviewOutcome { grade, state })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PreviewResults { outcomes })
    }
}

/// Schedule with default parameters from a raw integer grade.
///
/// Grades outside `[0, 5]` are rejected with [`ScheduleError::InvalidGrade`];
/// they are never clamped.
pub fn schedule<Tz: TimeZone>(
    state: &ProblemMemoryState,
    grade: i64,
    now: &DateTime<Tz>,
) -> Result<ProblemMemoryState, ScheduleError> {
    Sm2Scheduler::default().schedule(state, Grade::new(grade)?, now)
}

// ============================================================================
// FORMULAS
// ============================================================================

/// EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)), floored at `minimum`
pub fn next_easiness(easiness: f64, grade: Grade, minimum: f64) -> f64 {
    let distance = 5.0 - f64::from(grade.value());
    let updated = easiness + (0.1 - distance * (0.08 + distance * 0.02));
    updated.max(minimum)
}

/// round(interval * easiness), at least one day
pub fn compound_interval(interval_days: u32, easiness: f64) -> u32 {
    let days = (f64::from(interval_days) * easiness).round();
    // `as` saturates at u32::MAX
    (days as u32).max(1)
}

/// Same wall-clock time `days` calendar days later, in `now`'s time zone.
///
/// When that local time is skipped or repeated by a DST transition, falls
/// back to `days * 24h`.
pub fn add_calendar_days<Tz: TimeZone>(
    now: &DateTime<Tz>,
    days: u32,
) -> Result<DateTime<Utc>, ScheduleError> {
    let target = now
        .naive_local()
        .checked_add_days(Days::new(u64::from(days)))
        .ok_or(ScheduleError::DateOutOfRange)?;

    if let Some(next) = now.timezone().from_local_datetime(&target).single() {
        return Ok(next.with_timezone(&Utc));
    }

    tracing::warn!(
        days,
        %target,
        "local wall-clock time skipped or repeated on target date; adding fixed 24h days"
    );
    now.clone()
        .checked_add_signed(Duration::days(i64::from(days)))
        .map(|next| next.with_timezone(&Utc))
        .ok_or(ScheduleError::DateOutOfRange)
}

// ============================================================================
// TESTS
// ============================================================================
