//! Structured events emitted while a machine steps, and the sinks that
//! receive them.
//!
//! States and transitions never print. They hand a [`MachineEvent`] to
//! whatever [`EventSink`] the machine was built with, so drivers decide
//! where status output goes and tests can assert on the events directly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Observable effect of one phase of a step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MachineEvent {
    /// A pending transition was applied
    TransitionFired { transition: String, target: String },

    /// The active state ran its action
    StateExecuted { state: String, status: String },
}

impl MachineEvent {
    /// Shorthand for [`MachineEvent::TransitionFired`].
    pub fn transition(transition: impl Into<String>, target: impl Into<String>) -> Self {
        Self::TransitionFired {
            transition: transition.into(),
            target: target.into(),
        }
    }

    /// Shorthand for [`MachineEvent::StateExecuted`].
    pub fn state(state: impl Into<String>, status: impl Into<String>) -> Self {
        Self::StateExecuted {
            state: state.into(),
            status: status.into(),
        }
    }
}

impl fmt::Display for MachineEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TransitionFired { target, .. } => write!(f, "transitioning to {target}"),
            Self::StateExecuted { status, .. } => f.write_str(status),
        }
    }
}

/// Destination for machine events.
///
/// Any `FnMut(MachineEvent) + Send` closure is a sink, which keeps ad-hoc
/// drivers short:
///
/// ```rust
/// use lumen::core::{EventSink, MachineEvent};
///
/// let mut lines = Vec::new();
/// {
///     let mut sink = |event: MachineEvent| lines.push(event.to_string());
///     sink.emit(MachineEvent::state("On", "Light is ON"));
/// }
/// assert_eq!(lines, vec!["Light is ON".to_string()]);
/// ```
pub trait EventSink: Send {
    fn emit(&mut self, event: MachineEvent);
}

impl<F> EventSink for F
where
    F: FnMut(MachineEvent) + Send,
{
    fn emit(&mut self, event: MachineEvent) {
        self(event)
    }
}

/// Sink that forwards every event to `tracing` at info level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: MachineEvent) {
        match &event {
            MachineEvent::TransitionFired { transition, target } => {
                tracing::info!(transition = %transition, destination = %target, "{}", event);
            }
            MachineEvent::StateExecuted { state, .. } => {
                tracing::info!(state = %state, "{}", event);
            }
        }
    }
}

/// Sink that appends events to a shared log.
///
/// Clones share the same log, so a test can keep one handle and give the
/// other to the machine.
///
/// ```rust
/// use lumen::core::{EventSink, MachineEvent, RecordingSink};
///
/// let recorder = RecordingSink::new();
/// let mut handle = recorder.clone();
/// handle.emit(MachineEvent::transition("toOff", "Off"));
///
/// assert_eq!(recorder.events(), vec![MachineEvent::transition("toOff", "Off")]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<MachineEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    pub fn events(&self) -> Vec<MachineEvent> {
        self.log().clone()
    }

    /// Remove and return everything recorded so far.
    pub fn drain(&self) -> Vec<MachineEvent> {
        std::mem::take(&mut *self.log())
    }

    pub fn len(&self) -> usize {
        self.log().len()
    }

    pub fn is_empty(&self) -> bool {
        self.log().is_empty()
    }

    fn log(&self) -> std::sync::MutexGuard<'_, Vec<MachineEvent>> {
        // A panic while holding the lock cannot leave a Vec half-pushed.
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: MachineEvent) {
        self.log().push(event);
    }
}
