//! Transitions: named edges pointing at a target state.

use crate::core::event::{EventSink, MachineEvent};
use serde::{Deserialize, Serialize};

/// A directed edge to a target state.
///
/// A transition is data: it names its destination and nothing else. Its own
/// identity is the name it is registered under in the machine.
///
/// # Example
///
/// ```rust
/// use lumen::core::{MachineEvent, RecordingSink, Transition};
///
/// let recorder = RecordingSink::new();
/// let to_off = Transition::new("Off");
///
/// let target = to_off.execute("toOff", &mut recorder.clone());
///
/// assert_eq!(target, "Off");
/// assert_eq!(recorder.events(), vec![MachineEvent::transition("toOff", "Off")]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    target: String,
}

impl Transition {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    /// Name of the state this transition leads to
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Emit the move under the registered `name` and return the target.
    pub fn execute(&self, name: &str, sink: &mut dyn EventSink) -> &str {
        sink.emit(MachineEvent::transition(name, &self.target));
        &self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::RecordingSink;

    #[test]
    fn execute_returns_target() {
        let recorder = RecordingSink::new();
        let transition = Transition::new("On");

        assert_eq!(transition.execute("toOn", &mut recorder.clone()), "On");
        assert_eq!(transition.target(), "On");
    }

    #[test]
    fn execute_only_logs_the_move() {
        let recorder = RecordingSink::new();
        Transition::new("Off").execute("toOff", &mut recorder.clone());

        assert_eq!(
            recorder.events(),
            vec![MachineEvent::TransitionFired {
                transition: "toOff".to_string(),
                target: "Off".to_string(),
            }]
        );
    }
}
