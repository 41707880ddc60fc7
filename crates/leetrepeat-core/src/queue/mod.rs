//! Review Queue
//!
//! Splits a collection of memory states into what is due now and what is
//! coming up:
//! - `due`: `next_review_at <= now`, in input order
//! - `upcoming`: `next_review_at > now`, ascending by `next_review_at`,
//!   stable on ties
//!
//! Read-only over its input, linear in the number of entries plus the sort
//! of the upcoming half.

use std::borrow::Borrow;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::problem::{Problem, ProblemMemoryState};

/// Due and upcoming halves of a collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewQueue<K> {
    /// Ready for review, in input order
    pub due: Vec<K>,
    /// Not yet due, soonest first
    pub upcoming: Vec<K>,
}

impl<K> Default for ReviewQueue<K> {
    fn default() -> Self {
        Self {
            due: Vec::new(),
            upcoming: Vec::new(),
        }
    }
}

impl<K> ReviewQueue<K> {
    /// Total entries across both halves
    pub fn len(&self) -> usize {
        self.due.len() + self.upcoming.len()
    }

    pub fn is_empty(&self) -> bool {
        self.due.is_empty() && self.upcoming.is_empty()
    }

    /// Transform every entry, keeping both orders
    pub fn map<U>(self, mut f: impl FnMut(K) -> U) -> ReviewQueue<U> {
        ReviewQueue {
            due: self.due.into_iter().map(&mut f).collect(),
            upcoming: self.upcoming.into_iter().map(&mut f).collect(),
        }
    }
}

/// Partition `(id, state)` pairs at `now`.
pub fn partition<K, S, I, Tz>(entries: I, now: &DateTime<Tz>) -> ReviewQueue<K>
where
    I: IntoIterator<Item = (K, S)>,
    S: Borrow<ProblemMemoryState>,
    Tz: TimeZone,
{
    partition_by(entries, now, |(_, state)| {
        <S as Borrow<ProblemMemoryState>>::borrow(state).next_review_at
    })
    .map(|(id, _)| id)
}

/// Partition whole problem records at `now`.
pub fn partition_problems<I, Tz>(problems: I, now: &DateTime<Tz>) -> ReviewQueue<Problem>
where
    I: IntoIterator<Item = Problem>,
    Tz: TimeZone,
{
    partition_by(problems, now, |p| p.state.next_review_at)
}

/// Partition any items, reading each item's next review time with `next_review_at`.
pub fn partition_by<T, I, F, Tz>(items: I, now: &DateTime<Tz>, next_review_at: F) -> ReviewQueue<T>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> DateTime<Utc>,
    Tz: TimeZone,
{
    let now = now.with_timezone(&Utc);
    let mut due = Vec::new();
    let mut upcoming = Vec::new();

    for item in items {
        let at = next_review_at(&item);
        if at <= now {
            due.push(item);
        } else {
            upcoming.push((at, item));
        }
    }

    // sort_by_key is stable: equal timestamps keep input order
    upcoming.sort_by_key(|(at, _)| *at);

    ReviewQueue {
        due,
        upcoming: upcoming.into_iter().map(|(_, item)| item).collect(),
    }
}
