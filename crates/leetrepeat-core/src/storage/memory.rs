//! In-memory repository

use std::sync::{Mutex, MutexGuard};

use super::{ProblemRepository, Result, StorageError};
use crate::problem::Problem;

/// Problems held in a `Vec`, in insertion order
#[derive(Debug, Default)]
pub struct MemoryRepository {
    problems: Mutex<Vec<Problem>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-filled with `problems`, in the given order
    pub fn with_problems(problems: Vec<Problem>) -> Self {
        Self {
            problems: Mutex::new(problems),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Problem>>> {
        self.problems
            .lock()
            .map_err(|_| StorageError::Init("Problem list lock poisoned".into()))
    }
}

impl ProblemRepository for MemoryRepository {
    fn load_all(&self) -> Result<Vec<Problem>> {
        Ok(self.lock()?.clone())
    }

    fn load(&self, id: &str) -> Result<Option<Problem>> {
        Ok(self.lock()?.iter().find(|p| p.id == id).cloned())
    }

    fn save(&self, problem: &Problem) -> Result<()> {
        problem.state.validate()?;

        let mut problems = self.lock()?;
        match problems.iter_mut().find(|p| p.id == problem.id) {
            Some(existing) => *existing = problem.clone(),
            None => problems.push(problem.clone()),
        }
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<bool> {
        let mut problems = self.lock()?;
        let before = problems.len();
        problems.retain(|p| p.id != id);
        Ok(problems.len() < before)
    }
}
