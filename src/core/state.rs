//! The `State` trait for machine states.
//!
//! A state is a shared, immutable behaviour unit. Its identity is the name it
//! is registered under; the machine passes that name in when it runs the
//! state, so a state never holds a reference back to its owner.

use crate::core::event::{EventSink, MachineEvent};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for machine states.
///
/// `execute` must be idempotent: running the same state twice with no
/// transition in between emits the same event twice.
///
/// # Example
///
/// ```rust
/// use lumen::core::{MachineEvent, RecordingSink, State};
///
/// #[derive(Debug)]
/// struct Dimmed;
///
/// impl State for Dimmed {
///     fn status(&self) -> &str {
///         "Light is dimmed"
///     }
/// }
///
/// let recorder = RecordingSink::new();
/// Dimmed.execute("Dimmed", &mut recorder.clone());
///
/// assert_eq!(
///     recorder.events(),
///     vec![MachineEvent::state("Dimmed", "Light is dimmed")]
/// );
/// ```
pub trait State: Debug + Send + Sync {
    /// Display label emitted when the state runs.
    fn status(&self) -> &str;

    /// Run the state's action under its registered `name`.
    ///
    /// Default implementation emits [`MachineEvent::StateExecuted`].
    fn execute(&self, name: &str, sink: &mut dyn EventSink) {
        sink.emit(MachineEvent::state(name, self.status()));
    }
}

/// Data-driven state carrying only a status label.
///
/// Used for machines assembled from configuration, where states are not
/// known at compile time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusState {
    status: String,
}

impl StatusState {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }
}

impl State for StatusState {
    fn status(&self) -> &str {
        &self.status
    }
}
