//! Review Tracker
//!
//! Caller-side orchestration over a [`ProblemRepository`]: load a record,
//! run the scheduler, save the result. The tracker does not lock records
//! across that cycle; concurrent graders of the same problem must
//! coordinate themselves.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::problem::{NewProblem, Problem};
use crate::queue::{partition_problems, ReviewQueue};
use crate::sm2::{Grade, PreviewResults, Sm2Scheduler};
use crate::storage::{ProblemRepository, Result, StorageError};

/// Snapshot of the whole collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerStats {
    /// Number of tracked problems
    pub total_problems: usize,
    /// Problems due now
    pub due_now: usize,
    /// Problems not yet due
    pub upcoming: usize,
    /// Sum of current repetition counts
    pub total_reviews: u64,
    /// Mean easiness factor (0.0 when empty)
    pub average_easiness: f64,
    /// Soonest upcoming review
    pub next_due_at: Option<DateTime<Utc>>,
}

/// Add, grade, and queue problems over a repository
pub struct ReviewTracker<R> {
    repo: R,
    scheduler: Sm2Scheduler,
}

impl<R: ProblemRepository> ReviewTracker<R> {
    /// Tracker with default SM-2 parameters
    pub fn new(repo: R) -> Self {
        Self::with_scheduler(repo, Sm2Scheduler::default())
    }

    pub fn with_scheduler(repo: R, scheduler: Sm2Scheduler) -> Self {
        Self { repo, scheduler }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn scheduler(&self) -> &Sm2Scheduler {
        &self.scheduler
    }

    /// Track a new problem, due immediately
    pub fn add_problem<Tz: TimeZone>(&self, input: NewProblem, now: &DateTime<Tz>) -> Result<Problem> {
        if input.url.trim().is_empty() {
            return Err(StorageError::Invalid("URL cannot be empty".to_string()));
        }

        let mut problem = Problem::new(input, now.with_timezone(&Utc));
        problem.state = self.scheduler.new_state(now);
        self.repo.save(&problem)?;

        tracing::info!(id = %problem.id, title = %problem.title, "added problem");
        Ok(problem)
    }

    /// Load a problem by exact id
    pub fn get(&self, id: &str) -> Result<Problem> {
        self.repo
            .load(id)?
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }

    /// Expand a unique id prefix to the full id
    pub fn resolve_id(&self, prefix: &str) -> Result<String> {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return Err(StorageError::Invalid("Problem id cannot be empty".to_string()));
        }
        if self.repo.load(prefix)?.is_some() {
            return Ok(prefix.to_string());
        }

        let matches: Vec<String> = self
            .repo
            .load_all()?
            .into_iter()
            .filter(|p| p.id.starts_with(prefix))
            .map(|p| p.id)
            .collect();

        match matches.len() {
            0 => Err(StorageError::NotFound(prefix.to_string())),
            1 => Ok(matches.into_iter().next().unwrap_or_default()),
            n => Err(StorageError::Ambiguous(prefix.to_string(), n)),
        }
    }

    /// Grade a problem and persist its next state
    pub fn grade<Tz: TimeZone>(&self, id: &str, grade: Grade, now: &DateTime<Tz>) -> Result<Problem> {
        let mut problem = self.get(id)?;
        problem.state = self.scheduler.schedule(&problem.state, grade, now)?;
        self.repo.save(&problem)?;

        tracing::info!(
            id = %problem.id,
            grade = grade.value(),
            interval_days = problem.state.interval_days,
            "graded problem"
        );
        Ok(problem)
    }

    /// What each grade would do, without saving
    pub fn preview<Tz: TimeZone>(&self, id: &str, now: &DateTime<Tz>) -> Result<PreviewResults> {
        let problem = self.get(id)?;
        Ok(self.scheduler.preview(&problem.state, now)?)
    }

    /// Due and upcoming problems at `now`
    pub fn queue<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Result<ReviewQueue<Problem>> {
        Ok(partition_problems(self.repo.load_all()?, now))
    }

    /// Stop tracking a problem
    pub fn remove(&self, id: &str) -> Result<bool> {
        let removed = self.repo.delete(id)?;
        if removed {
            tracing::info!(id, "removed problem");
        }
        Ok(removed)
    }

    /// Collection statistics at `now`
    pub fn stats<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Result<TrackerStats> {
        let queue = self.queue(now)?;
        let total_problems = queue.len();

        let (total_reviews, easiness_sum) = queue
            .due
            .iter()
            .chain(queue.upcoming.iter())
            .fold((0u64, 0.0f64), |(reviews, easiness), p| {
                (
                    reviews + u64::from(p.state.repetition_count),
                    easiness + p.state.easiness_factor,
                )
            });

        let average_easiness = if total_problems > 0 {
            easiness_sum / total_problems as f64
        } else {
            0.0
        };

        Ok(TrackerStats {
            total_problems,
            due_now: queue.due.len(),
            upcoming: queue.upcoming.len(),
            total_reviews,
            average_easiness,
            next_due_at: queue.upcoming.first().map(|p| p.state.next_review_at),
        })
    }

    /// Every problem, in insertion order
    pub fn export(&self) -> Result<Vec<Problem>> {
        self.repo.load_all()
    }

    /// Save problems as-is after validating each state.
    ///
    /// Existing ids are overwritten. Returns how many were saved.
    pub fn import(&self, problems: Vec<Problem>) -> Result<usize> {
        for problem in &problems {
            problem.state.validate()?;
        }
        for problem in &problems {
            self.repo.save(problem)?;
        }
        tracing::info!(count = problems.len(), "imported problems");
        Ok(problems.len())
    }
}
