//! A light bulb driven by a two-state machine.
//!
//! The bulb keeps no on/off flag of its own. Whether it is lit is read from
//! the machine's active state, so the two can never disagree.

use crate::builder::{BuildError, MachineBuilder};
use crate::core::{EventSink, TracingSink};
use crate::machine::{FiniteStateMachine, FsmError, StepResult};
use crate::status_state;

/// Name of the lit state
pub const ON: &str = "On";
/// Name of the dark state
pub const OFF: &str = "Off";
/// Name of the transition into [`ON`]
pub const TO_ON: &str = "toOn";
/// Name of the transition into [`OFF`]
pub const TO_OFF: &str = "toOff";

status_state! {
    /// Bulb is lit
    pub struct LightOn => "Light is ON";
    /// Bulb is dark
    pub struct LightOff => "Light is OFF";
}

/// Owner of the bulb's state machine.
///
/// # Example
///
/// ```rust
/// use lumen::bulb::LightBulb;
/// use lumen::core::{MachineEvent, RecordingSink};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let recorder = RecordingSink::new();
/// let mut bulb = LightBulb::with_sink(recorder.clone())?;
/// assert!(bulb.is_on());
///
/// bulb.toggle()?;
/// bulb.step()?;
///
/// assert!(!bulb.is_on());
/// assert_eq!(
///     recorder.events(),
///     vec![
///         MachineEvent::transition("toOff", "Off"),
///         MachineEvent::state("Off", "Light is OFF"),
///     ]
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct LightBulb {
    fsm: FiniteStateMachine,
}

impl LightBulb {
    /// Bulb that starts lit and reports through `tracing`.
    pub fn new() -> Result<Self, BuildError> {
        Self::with_sink(TracingSink)
    }

    /// Bulb that starts lit and reports to `sink`.
    pub fn with_sink(sink: impl EventSink + 'static) -> Result<Self, BuildError> {
        let fsm = MachineBuilder::new()
            .state(ON, LightOn)
            .state(OFF, LightOff)
            .transition(TO_ON, ON)
            .transition(TO_OFF, OFF)
            .initial(ON)
            .sink(sink)
            .build()?;

        Ok(Self { fsm })
    }

    /// Whether the active state is [`ON`].
    pub fn is_on(&self) -> bool {
        self.fsm.active_state_name() == Some(ON)
    }

    /// Request the opposite of where the bulb is heading.
    ///
    /// With a transition already pending, the pending target counts as the
    /// current position, so two toggles before a step cancel out.
    pub fn toggle(&mut self) -> Result<(), FsmError> {
        let heading_on = match self.fsm.pending_transition() {
            None => self.is_on(),
            Some(name) => match self.fsm.transition(name) {
                Some(transition) => transition.target() == ON,
                // Pending names are checked on request and never unregistered.
                None => {
                    return Err(FsmError::UnknownTransitionName {
                        name: name.to_string(),
                    })
                }
            },
        };

        if heading_on {
            self.switch_off()
        } else {
            self.switch_on()
        }
    }

    pub fn switch_on(&mut self) -> Result<(), FsmError> {
        self.fsm.request_transition(TO_ON)
    }

    pub fn switch_off(&mut self) -> Result<(), FsmError> {
        self.fsm.request_transition(TO_OFF)
    }

    /// Advance the bulb's machine by one tick.
    pub fn step(&mut self) -> Result<StepResult, FsmError> {
        self.fsm.step()
    }

    pub fn fsm(&self) -> &FiniteStateMachine {
        &self.fsm
    }

    pub fn fsm_mut(&mut self) -> &mut FiniteStateMachine {
        &mut self.fsm
    }

    pub fn into_machine(self) -> FiniteStateMachine {
        self.fsm
    }
}
