//! Errors raised by the machine's driver API.

use thiserror::Error;

/// Programming errors surfaced synchronously to the caller.
///
/// None of these are transient; retrying the same call fails the same way.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FsmError {
    #[error("Unknown state '{name}'")]
    UnknownStateName { name: String },

    #[error("Unknown transition '{name}'")]
    UnknownTransitionName { name: String },

    #[error("Transition '{transition}' targets unregistered state '{target}'")]
    InvalidTransitionTarget { transition: String, target: String },

    #[error("No active state. Call set_active_state() before step()")]
    NotInitialized,
}
