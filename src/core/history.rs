//! History of transitions applied by a machine.
//!
//! `record` returns a new history and leaves the receiver untouched. A
//! running machine appends with `push` instead, which does not copy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of one applied transition.
///
/// # Example
///
/// ```rust
/// use lumen::core::TransitionRecord;
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     transition: "toOff".to_string(),
///     from: "On".to_string(),
///     to: "Off".to_string(),
///     timestamp: Utc::now(),
///     step: 1,
/// };
/// assert_eq!(record.to, "Off");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Registered name of the transition that fired
    pub transition: String,
    /// State that was active before the step
    pub from: String,
    /// State that became active
    pub to: String,
    /// When the transition was applied
    pub timestamp: DateTime<Utc>,
    /// Step number (1-based) in which the transition was applied
    pub step: u64,
}

/// Ordered history of applied transitions.
///
/// # Example
///
/// ```rust
/// use lumen::core::{StepHistory, TransitionRecord};
/// use chrono::Utc;
///
/// let history = StepHistory::new().record(TransitionRecord {
///     transition: "toOff".to_string(),
///     from: "On".to_string(),
///     to: "Off".to_string(),
///     timestamp: Utc::now(),
///     step: 2,
/// });
///
/// assert_eq!(history.get_path(), vec!["On", "Off"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepHistory {
    records: Vec<TransitionRecord>,
}

impl StepHistory {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, record: TransitionRecord) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        Self { records }
    }

    /// Append a transition in place.
    pub fn push(&mut self, record: TransitionRecord) {
        self.records.push(record);
    }

    /// States traversed: the first `from`, then every `to` in order.
    pub fn get_path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        if let Some(first) = self.records.first() {
            path.push(first.from.as_str());
        }
        for record in &self.records {
            path.push(record.to.as_str());
        }
        path
    }

    /// Time between the first and last recorded transition.
    ///
    /// `None` when the history is empty.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.records.first(), self.records.last()) {
            last.timestamp
                .signed_duration_since(first.timestamp)
                .to_std()
                .ok()
        } else {
            None
        }
    }

    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
