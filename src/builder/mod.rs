//! Builder API for ergonomic machine construction.
//!
//! `MachineBuilder` collects states and transitions, then validates them in
//! one go. `status_state!` declares simple states without boilerplate.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::MachineBuilder;
