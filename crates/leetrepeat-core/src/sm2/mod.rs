//! SM-2 (SuperMemo 2) Scheduling Module
//!
//! Computes the next review of a problem from its memory state and a recall
//! grade on the 0-5 scale.
//!
//! ## Core Formulas:
//! - Pass (q >= 3): interval 1, then 6, then round(I * EF); repetitions + 1
//! - Fail (q < 3): interval 1; repetitions reset to 0
//! - Easiness (every grade): EF' = max(1.3, EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)))
//! - Next review: now + I calendar days

mod grade;
mod scheduler;

pub use grade::Grade;

pub use scheduler::{
    add_calendar_days,
    compound_interval,
    next_easiness,
    // Core entry point
    schedule,
    PreviewOutcome,
    PreviewResults,
    ScheduleError,
    Sm2Parameters,
    Sm2Scheduler,
    // Constants
    DEFAULT_EASINESS,
    FIRST_INTERVAL_DAYS,
    MIN_EASINESS,
    SECOND_INTERVAL_DAYS,
};
