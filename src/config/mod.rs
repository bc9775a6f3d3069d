//! Machine definitions loaded from JSON.
//!
//! A definition names every state with its status label, every transition
//! with its target and the initial state. States built from a definition are
//! [`StatusState`]s.
//!
//! ```rust
//! use lumen::config::MachineDefinition;
//! use lumen::core::RecordingSink;
//!
//! # fn main() -> Result<(), lumen::config::ConfigError> {
//! let json = r#"{
//!     "initial": "Red",
//!     "states": [
//!         { "name": "Red", "status": "Stop" },
//!         { "name": "Green", "status": "Go" }
//!     ],
//!     "transitions": [
//!         { "name": "go", "target": "Green" },
//!         { "name": "stop", "target": "Red" }
//!     ]
//! }"#;
//!
//! let definition = MachineDefinition::from_json(json)?;
//! let machine = definition.build(RecordingSink::new())?;
//! assert_eq!(machine.active_state_name(), Some("Red"));
//! # Ok(())
//! # }
//! ```

pub mod error;

pub use error::ConfigError;

use crate::builder::MachineBuilder;
use crate::bulb::{self, LightOff, LightOn};
use crate::core::{EventSink, State, StatusState};
use crate::machine::FiniteStateMachine;
use serde::{Deserialize, Serialize};

/// One state in a definition
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDefinition {
    pub name: String,
    pub status: String,
}

/// One transition in a definition
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionDefinition {
    pub name: String,
    pub target: String,
}

/// Serializable description of a whole machine
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineDefinition {
    pub initial: String,
    pub states: Vec<StateDefinition>,
    #[serde(default)]
    pub transitions: Vec<TransitionDefinition>,
}

impl MachineDefinition {
    /// The two-state bulb: `On`/`Off` with `toOn`/`toOff`, starting lit.
    pub fn lightbulb() -> Self {
        Self {
            initial: bulb::ON.to_string(),
            states: vec![
                StateDefinition {
                    name: bulb::ON.to_string(),
                    status: LightOn.status().to_string(),
                },
                StateDefinition {
                    name: bulb::OFF.to_string(),
                    status: LightOff.status().to_string(),
                },
            ],
            transitions: vec![
                TransitionDefinition {
                    name: bulb::TO_ON.to_string(),
                    target: bulb::ON.to_string(),
                },
                TransitionDefinition {
                    name: bulb::TO_OFF.to_string(),
                    target: bulb::OFF.to_string(),
                },
            ],
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Build a validated machine reporting to `sink`.
    pub fn build(&self, sink: impl EventSink + 'static) -> Result<FiniteStateMachine, ConfigError> {
        let builder = self
            .states
            .iter()
            .fold(MachineBuilder::new(), |builder, state| {
                builder.state(state.name.clone(), StatusState::new(state.status.clone()))
            });

        let builder = self
            .transitions
            .iter()
            .fold(builder, |builder, transition| {
                builder.transition(transition.name.clone(), transition.target.clone())
            });

        let machine = builder.initial(self.initial.clone()).sink(sink).build()?;
        tracing::debug!(
            states = self.states.len(),
            transitions = self.transitions.len(),
            initial = %self.initial,
            "Built machine from definition"
        );
        Ok(machine)
    }
}
