//! Recall grades on the fixed 0-5 scale.

use serde::{Deserialize, Serialize};

use super::scheduler::ScheduleError;

/// A validated recall grade in `[0, 5]`.
///
/// - 0-2: failed recall (repetition count resets)
/// - 3-5: successful recall (repetition count advances)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Grade(u8);

impl Grade {
    /// Lowest grade: no idea how to approach the problem
    pub const MIN: Grade = Grade(0);
    /// Highest grade: solved smoothly
    pub const MAX: Grade = Grade(5);
    /// Lowest grade that counts as a pass
    pub const PASS_THRESHOLD: u8 = 3;

    /// Validate an integer grade.
    pub fn new(value: i64) -> Result<Self, ScheduleError> {
        if (i64::from(Self::MIN.0)..=i64::from(Self::MAX.0)).contains(&value) {
            Ok(Grade(value as u8))
        } else {
            Err(ScheduleError::InvalidGrade(value))
        }
    }

    /// Numeric value in `[0, 5]`
    pub fn value(self) -> u8 {
        self.0
    }

    /// Whether this grade counts as a successful recall
    pub fn is_pass(self) -> bool {
        self.0 >= Self::PASS_THRESHOLD
    }

    /// All six grades in ascending order
    pub fn all() -> impl Iterator<Item = Grade> {
        (Self::MIN.0..=Self::MAX.0).map(Grade)
    }
}

impl TryFrom<i64> for Grade {
    type Error = ScheduleError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Grade::new(value)
    }
}

impl TryFrom<u8> for Grade {
    type Error = ScheduleError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Grade::new(i64::from(value))
    }
}

impl From<Grade> for u8 {
    fn from(grade: Grade) -> Self {
        grade.0
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Grade {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| ScheduleError::UnparsableGrade(s.to_string()))?;
        Grade::new(value)
    }
}
