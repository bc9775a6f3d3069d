//! Errors raised while assembling a machine with `MachineBuilder`.

use crate::machine::FsmError;
use thiserror::Error;

/// Errors that can occur when building a machine.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(name) before .build()")]
    MissingInitialState,

    #[error("No states defined. Add at least one state")]
    NoStates,

    #[error(transparent)]
    Machine(#[from] FsmError),
}
