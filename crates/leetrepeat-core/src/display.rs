//! Presentation helpers
//!
//! Labels for grades and due dates. The scheduler never reads any of this;
//! it only ever sees the numeric [`Grade`].

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::sm2::Grade;

// ============================================================================
// GRADE LABELS
// ============================================================================

/// Human-facing description of one grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeInfo {
    pub grade: u8,
    pub label: &'static str,
    pub description: &'static str,
}

/// Labels for grades 0 through 5
pub const GRADE_INFO: [GradeInfo; 6] = [
    GradeInfo {
        grade: 0,
        label: "No Clue",
        description: "Zero clue how to do it",
    },
    GradeInfo {
        grade: 1,
        label: "Vague Recall",
        description: "Didn't solve, but had guesses / vaguely recalled solution",
    },
    GradeInfo {
        grade: 2,
        label: "Right Idea",
        description: "Didn't solve, but had mostly the right idea",
    },
    GradeInfo {
        grade: 3,
        label: "Solved Hard",
        description: "Solved, but took significant effort / many attempts",
    },
    GradeInfo {
        grade: 4,
        label: "Solved OK",
        description: "Solved, but felt tricky or was not the best solution",
    },
    GradeInfo {
        grade: 5,
        label: "Solved Easy",
        description: "Solved smoothly and easily",
    },
];

/// Look up the label for a grade
pub fn grade_info(grade: Grade) -> &'static GradeInfo {
    &GRADE_INFO[usize::from(grade.value())]
}

// ============================================================================
// DUE LABELS
// ============================================================================

/// Calendar-relative label for a review date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DueLabel {
    /// Same calendar date as now
    Today,
    /// The calendar date after now
    Tomorrow,
    /// Any other date, past or future
    On(NaiveDate),
}

impl std::fmt::Display for DueLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DueLabel::Today => write!(f, "Today"),
            DueLabel::Tomorrow => write!(f, "Tomorrow"),
            DueLabel::On(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

/// Label `next_review_at` relative to `now`, comparing dates in `now`'s zone.
pub fn due_label<Tz: TimeZone>(next_review_at: &DateTime<Utc>, now: &DateTime<Tz>) -> DueLabel {
    let today = now.date_naive();
    let date = next_review_at.with_timezone(&now.timezone()).date_naive();

    if date == today {
        DueLabel::Today
    } else if today.succ_opt() == Some(date) {
        DueLabel::Tomorrow
    } else {
        DueLabel::On(date)
    }
}
