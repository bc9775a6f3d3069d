//! Building blocks of a machine: states, transitions, events and history.
//!
//! Nothing in this module owns mutable machine state. States and
//! transitions are shared values; all output goes through an [`EventSink`].

mod event;
mod history;
mod state;
mod transition;

pub use event::{EventSink, MachineEvent, RecordingSink, TracingSink};
pub use history::{StepHistory, TransitionRecord};
pub use state::{State, StatusState};
pub use transition::Transition;
