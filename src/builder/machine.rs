//! Builder for constructing machines.

use crate::builder::error::BuildError;
use crate::core::{EventSink, State, TracingSink, Transition};
use crate::machine::FiniteStateMachine;
use std::sync::Arc;

/// Builder for constructing machines with a fluent API.
///
/// Unlike registering directly on a `FiniteStateMachine`, `build()` checks
/// every transition target up front, so a machine that builds can always
/// step.
pub struct MachineBuilder {
    states: Vec<(String, Arc<dyn State>)>,
    transitions: Vec<(String, Transition)>,
    initial: Option<String>,
    sink: Option<Box<dyn EventSink>>,
}

impl MachineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            transitions: Vec::new(),
            initial: None,
            sink: None,
        }
    }

    /// Add a state under `name`.
    pub fn state(self, name: impl Into<String>, state: impl State + 'static) -> Self {
        self.shared_state(name, Arc::new(state))
    }

    /// Add an already shared state under `name`.
    pub fn shared_state(mut self, name: impl Into<String>, state: Arc<dyn State>) -> Self {
        self.states.push((name.into(), state));
        self
    }

    /// Add a transition `name` leading to `target`.
    pub fn transition(mut self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.transitions.push((name.into(), Transition::new(target)));
        self
    }

    /// Set the initial state (required).
    pub fn initial(mut self, name: impl Into<String>) -> Self {
        self.initial = Some(name.into());
        self
    }

    /// Set the event sink. Defaults to [`TracingSink`].
    pub fn sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Build and validate the machine.
    pub fn build(self) -> Result<FiniteStateMachine, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }

        let sink = self.sink.unwrap_or_else(|| Box::new(TracingSink));
        let mut machine = FiniteStateMachine::with_boxed_sink(sink);

        for (name, state) in self.states {
            machine.register_shared_state(name, state);
        }
        for (name, transition) in self.transitions {
            machine.register_transition(name, transition)?;
        }

        machine.validate()?;
        machine.set_active_state(&initial)?;

        Ok(machine)
    }
}

impl Default for MachineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
