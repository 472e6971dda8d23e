//! Transition history tracking.
//!
//! Every committed transition is appended as a [`TransitionRecord`]. The
//! history is bounded: once `limit` records are held, the oldest record is
//! evicted for each new one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single committed transition.
///
/// # Example
///
/// ```rust
/// use hookfsm::core::TransitionRecord;
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     event: "warn".to_string(),
///     from: "green".to_string(),
///     to: "yellow".to_string(),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(record.to, "yellow");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Name of the emitted event
    pub event: String,
    /// The state being transitioned from
    pub from: String,
    /// The state being transitioned to
    pub to: String,
    /// When the transition was committed
    pub timestamp: DateTime<Utc>,
}

/// Bounded, ordered history of transitions.
///
/// # Example
///
/// ```rust
/// use hookfsm::core::{History, TransitionRecord};
/// use chrono::Utc;
///
/// let mut history = History::with_limit(8);
/// history.push(TransitionRecord {
///     event: "warn".to_string(),
///     from: "green".to_string(),
///     to: "yellow".to_string(),
///     timestamp: Utc::now(),
/// });
/// history.push(TransitionRecord {
///     event: "stop".to_string(),
///     from: "yellow".to_string(),
///     to: "red".to_string(),
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.path(), vec!["green", "yellow", "red"]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct History {
    limit: usize,
    records: VecDeque<TransitionRecord>,
}

impl History {
    /// Create an empty history holding at most `limit` records.
    ///
    /// A limit of zero disables recording.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            records: VecDeque::new(),
        }
    }

    /// Append a record, evicting the oldest once the limit is reached.
    pub fn push(&mut self, record: TransitionRecord) {
        if self.limit == 0 {
            return;
        }
        while self.records.len() >= self.limit {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the oldest retained record, then the
    /// `to` state of every record in order.
    pub fn path(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.front() {
            path.push(first.from.as_str());
        }
        path.extend(self.records.iter().map(|r| r.to.as_str()));
        path
    }

    /// Time elapsed between the oldest and newest retained record.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn records(&self) -> impl Iterator<Item = &TransitionRecord> {
        self.records.iter()
    }

    pub fn last(&self) -> Option<&TransitionRecord> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
