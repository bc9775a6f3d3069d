//! Lumen: a small registry-driven finite state machine
//!
//! States and transitions are registered by name. A driver sets the initial
//! state, requests transitions, and calls `step()` on its own cadence. Each
//! step applies at most one pending transition and then runs the active
//! state. All output goes through an injected event sink, so the machine is
//! testable without capturing process output.
//!
//! # Core Concepts
//!
//! - **State**: a shared behaviour unit with a status label
//! - **Transition**: a named edge to a target state
//! - **FiniteStateMachine**: registries, active state, pending transition
//! - **EventSink**: where `TransitionFired` / `StateExecuted` events go
//!
//! # Example
//!
//! ```rust
//! use lumen::builder::MachineBuilder;
//! use lumen::core::{MachineEvent, RecordingSink, StatusState};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let recorder = RecordingSink::new();
//! let mut machine = MachineBuilder::new()
//!     .state("On", StatusState::new("Light is ON"))
//!     .state("Off", StatusState::new("Light is OFF"))
//!     .transition("toOn", "On")
//!     .transition("toOff", "Off")
//!     .initial("On")
//!     .sink(recorder.clone())
//!     .build()?;
//!
//! machine.step()?;
//! machine.request_transition("toOff")?;
//! machine.step()?;
//! machine.step()?;
//!
//! assert_eq!(
//!     recorder.events(),
//!     vec![
//!         MachineEvent::state("On", "Light is ON"),
//!         MachineEvent::transition("toOff", "Off"),
//!         MachineEvent::state("Off", "Light is OFF"),
//!         MachineEvent::state("Off", "Light is OFF"),
//!     ]
//! );
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod bulb;
pub mod checkpoint;
pub mod config;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use crate::core::{EventSink, MachineEvent, State, Transition};
pub use crate::machine::{FiniteStateMachine, FsmError, SharedMachine, StepResult};
