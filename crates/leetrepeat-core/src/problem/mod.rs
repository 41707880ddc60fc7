//! Problem module - Core types
//!
//! - Problem records with their SM-2 memory state
//! - Input types for adding problems
//! - Title extraction from problem URLs

mod node;
mod title;

pub use node::{NewProblem, Problem, ProblemMemoryState};
pub use title::{title_from_url, FALLBACK_TITLE};
