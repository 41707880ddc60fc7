//! Test Data Factory
//!
//! Realistic problem fixtures:
//! - Problems with hand-set memory states
//! - Batch generation
//! - Pre-built review-history scenarios

use chrono::{DateTime, Duration, TimeZone, Utc};
use leetrepeat_core::{
    Grade, NewProblem, Problem, ProblemRepository, ReviewTracker, DEFAULT_EASINESS,
};

/// Real problem slugs used to build URLs
pub const SAMPLE_SLUGS: &[&str] = &[
    "two-sum",
    "valid-anagram",
    "longest-substring-without-repeating-characters",
    "merge-intervals",
    "lru-cache",
    "word-ladder",
    "median-of-two-sorted-arrays",
    "climbing-stairs",
];

/// A fixed instant so journeys are reproducible
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 15, 20, 0, 0).unwrap()
}

/// Builder for a problem with a chosen memory state
#[derive(Debug, Clone)]
pub struct ProblemFixture {
    slug: String,
    created_at: DateTime<Utc>,
    easiness_factor: f64,
    repetition_count: u32,
    interval_days: u32,
    next_review_at: Option<DateTime<Utc>>,
}

impl ProblemFixture {
    pub fn new(slug: &str) -> Self {
        Self {
            slug: slug.to_string(),
            created_at: fixed_now(),
            easiness_factor: DEFAULT_EASINESS,
            repetition_count: 0,
            interval_days: 1,
            next_review_at: None,
        }
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self
    }

    pub fn easiness(mut self, easiness_factor: f64) -> Self {
        self.easiness_factor = easiness_factor;
        self
    }

    pub fn reviewed(mut self, repetition_count: u32, interval_days: u32) -> Self {
        self.repetition_count = repetition_count;
        self.interval_days = interval_days;
        self
    }

    /// Due `offset` after the creation time (negative = overdue)
    pub fn due_in(mut self, offset: Duration) -> Self {
        self.next_review_at = Some(self.created_at + offset);
        self
    }

    pub fn build(self) -> Problem {
        let url = format!("https://leetcode.com/problems/{}/", self.slug);
        let mut problem = Problem::new(NewProblem::from_url(url), self.created_at);
        problem.state.easiness_factor = self.easiness_factor;
        problem.state.repetition_count = self.repetition_count;
        problem.state.interval_days = self.interval_days;
        if let Some(at) = self.next_review_at {
            problem.state.next_review_at = at;
        }
        if self.repetition_count > 0 {
            problem.state.last_reviewed_at = Some(self.created_at);
        }
        problem
    }
}

/// Factory for creating test data
pub struct TestDataFactory;

impl TestDataFactory {
    /// URL for the `i`-th sample problem, unique past the slug list
    pub fn sample_url(i: usize) -> String {
        let slug = SAMPLE_SLUGS[i % SAMPLE_SLUGS.len()];
        if i < SAMPLE_SLUGS.len() {
            format!("https://leetcode.com/problems/{slug}/")
        } else {
            format!("https://leetcode.com/problems/{slug}-{i}/")
        }
    }

    /// Add `count` new problems through the tracker
    pub fn add_batch<R: ProblemRepository>(
        tracker: &ReviewTracker<R>,
        count: usize,
        now: DateTime<Utc>,
    ) -> Vec<Problem> {
        (0..count)
            .map(|i| {
                tracker
                    .add_problem(NewProblem::from_url(Self::sample_url(i)), &now)
                    .expect("Failed to add problem")
            })
            .collect()
    }

    /// Problems due at `now - 1d`, `now`, `now + 1d`, `now + 3d`, in scrambled
    /// insertion order
    pub fn create_partition_scenario(now: DateTime<Utc>) -> Vec<Problem> {
        vec![
            ProblemFixture::new("word-ladder").created_at(now).due_in(Duration::days(3)).build(),
            ProblemFixture::new("two-sum").created_at(now).due_in(Duration::days(-1)).build(),
            ProblemFixture::new("lru-cache").created_at(now).due_in(Duration::days(1)).build(),
            ProblemFixture::new("merge-intervals").created_at(now).due_in(Duration::zero()).build(),
        ]
    }

    /// One new, one well-learned, and one struggling problem
    pub fn create_review_history_scenario<R: ProblemRepository>(
        tracker: &ReviewTracker<R>,
        now: DateTime<Utc>,
    ) -> Vec<Problem> {
        let grade = |g: i64| Grade::new(g).expect("valid grade");
        let [new, learned, struggling]: [Problem; 3] = Self::add_batch(tracker, 3, now)
            .try_into()
            .expect("three problems");

        let mut at = now;
        for g in [4, 5, 5] {
            tracker.grade(&learned.id, grade(g), &at).expect("grade");
            at += Duration::days(1);
        }
        for g in [1, 2, 0] {
            tracker.grade(&struggling.id, grade(g), &at).expect("grade");
        }

        vec![
            new,
            tracker.get(&learned.id).expect("learned"),
            tracker.get(&struggling.id).expect("struggling"),
        ]
    }
}
