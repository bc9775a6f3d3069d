//! The finite state machine engine.
//!
//! - `FiniteStateMachine`: registries, active state, pending transition and
//!   the two-phase `step()`
//! - `SharedMachine`: the same engine behind a mutex for concurrent drivers
//! - `FsmError`: every way the driver API can be misused

mod error;
mod fsm;
mod shared;

pub use error::FsmError;
pub use fsm::{FiniteStateMachine, StepResult};
pub use shared::SharedMachine;
