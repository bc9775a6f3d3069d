//! Registry-driven finite state machine.

use crate::core::{EventSink, State, StepHistory, TracingSink, Transition, TransitionRecord};
use crate::machine::error::FsmError;
use chrono::Utc;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of a single successful step
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepResult {
    /// A pending transition was applied before the new state ran
    Transitioned {
        transition: String,
        from: String,
        to: String,
    },

    /// No transition was pending; the active state ran again
    Stayed { state: String },
}

impl StepResult {
    /// Name of the state whose action ran in this step
    pub fn state(&self) -> &str {
        match self {
            Self::Transitioned { to, .. } => to,
            Self::Stayed { state } => state,
        }
    }
}

/// Finite state machine holding named states and transitions.
///
/// The machine owns both registries, the name of the active state and at
/// most one pending transition. `step()` applies the pending transition (if
/// any) and then runs the active state, so a requested transition always
/// lands before the next state action is observed.
///
/// # Example
///
/// ```rust
/// use lumen::core::{MachineEvent, RecordingSink, StatusState, Transition};
/// use lumen::machine::FiniteStateMachine;
///
/// # fn main() -> Result<(), lumen::machine::FsmError> {
/// let recorder = RecordingSink::new();
/// let mut fsm = FiniteStateMachine::with_sink(recorder.clone());
///
/// fsm.register_state("On", StatusState::new("Light is ON"));
/// fsm.register_state("Off", StatusState::new("Light is OFF"));
/// fsm.register_transition("toOn", Transition::new("On"))?;
/// fsm.register_transition("toOff", Transition::new("Off"))?;
/// fsm.set_active_state("On")?;
///
/// fsm.request_transition("toOff")?;
/// fsm.step()?;
///
/// assert_eq!(fsm.active_state_name(), Some("Off"));
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
pub struct FiniteStateMachine {
    pub(crate) states: HashMap<String, Arc<dyn State>>,
    pub(crate) transitions: HashMap<String, Transition>,
    pub(crate) active: Option<String>,
    pub(crate) pending: Option<String>,
    pub(crate) validated: bool,
    pub(crate) history: StepHistory,
    pub(crate) step_count: u64,
    sink: Box<dyn EventSink>,
}

impl FiniteStateMachine {
    /// Create an empty machine that reports through `tracing`.
    pub fn new() -> Self {
        Self::with_sink(TracingSink)
    }

    /// Create an empty machine that reports to `sink`.
    pub fn with_sink(sink: impl EventSink + 'static) -> Self {
        Self::with_boxed_sink(Box::new(sink))
    }

    pub(crate) fn with_boxed_sink(sink: Box<dyn EventSink>) -> Self {
        Self {
            states: HashMap::new(),
            transitions: HashMap::new(),
            active: None,
            pending: None,
            validated: false,
            history: StepHistory::new(),
            step_count: 0,
            sink,
        }
    }

    /// Replace the event sink.
    pub fn set_sink(&mut self, sink: impl EventSink + 'static) {
        self.sink = Box::new(sink);
    }

    /// Register `state` under `name`. Last write wins.
    pub fn register_state(&mut self, name: impl Into<String>, state: impl State + 'static) {
        self.register_shared_state(name, Arc::new(state));
    }

    /// Register an already shared state under `name`.
    ///
    /// The same state value may back several names.
    pub fn register_shared_state(&mut self, name: impl Into<String>, state: Arc<dyn State>) {
        let name = name.into();
        if self.states.insert(name.clone(), state).is_some() {
            tracing::debug!(state = %name, "Replaced registered state");
        } else {
            tracing::debug!(state = %name, "Registered state");
        }
    }

    /// Register `transition` under `name`. Last write wins.
    ///
    /// Until the machine has been validated, the target may name a state that
    /// is registered later. Once validated, the target must already exist.
    pub fn register_transition(
        &mut self,
        name: impl Into<String>,
        transition: Transition,
    ) -> Result<(), FsmError> {
        let name = name.into();

        if self.validated && !self.states.contains_key(transition.target()) {
            return Err(FsmError::InvalidTransitionTarget {
                transition: name,
                target: transition.target().to_string(),
            });
        }

        tracing::debug!(
            transition = %name,
            destination = %transition.target(),
            "Registered transition"
        );
        self.transitions.insert(name, transition);
        Ok(())
    }

    /// Make `name` the active state and drop any pending transition.
    ///
    /// On failure the previous active state is kept.
    pub fn set_active_state(&mut self, name: &str) -> Result<(), FsmError> {
        if !self.states.contains_key(name) {
            return Err(FsmError::UnknownStateName {
                name: name.to_string(),
            });
        }

        self.active = Some(name.to_string());
        self.pending = None;
        tracing::debug!(state = %name, "Active state set");
        Ok(())
    }

    /// Mark the transition `name` to be applied by the next `step()`.
    ///
    /// Only one transition can be pending; a second request replaces the
    /// first.
    pub fn request_transition(&mut self, name: &str) -> Result<(), FsmError> {
        if !self.transitions.contains_key(name) {
            return Err(FsmError::UnknownTransitionName {
                name: name.to_string(),
            });
        }

        if let Some(previous) = self.pending.replace(name.to_string()) {
            tracing::warn!(
                replaced = %previous,
                transition = %name,
                "Pending transition overwritten before step"
            );
        } else {
            tracing::debug!(transition = %name, "Transition requested");
        }
        Ok(())
    }

    /// Check every transition target, collecting all offenders.
    pub fn validate_targets(&self) -> Validation<(), NonEmptyVec<FsmError>> {
        let checks: Vec<Validation<(), NonEmptyVec<FsmError>>> = self
            .transition_names()
            .into_iter()
            .filter_map(|name| self.transitions.get(name).map(|t| (name, t)))
            .map(|(name, transition)| {
                if self.states.contains_key(transition.target()) {
                    Validation::success(())
                } else {
                    Validation::fail(FsmError::InvalidTransitionTarget {
                        transition: name.to_string(),
                        target: transition.target().to_string(),
                    })
                }
            })
            .collect();

        if checks.is_empty() {
            return Validation::success(());
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Check every transition target and seal the registries.
    ///
    /// Returns the first offender by transition name. After success,
    /// `register_transition` rejects unknown targets immediately.
    pub fn validate(&mut self) -> Result<(), FsmError> {
        if let Some(error) = self.first_invalid_target() {
            return Err(error);
        }

        if !self.validated {
            tracing::debug!(
                states = self.states.len(),
                transitions = self.transitions.len(),
                "Machine validated"
            );
        }
        self.validated = true;
        Ok(())
    }

    /// Run one tick: apply the pending transition, then run the active state.
    ///
    /// A failed step changes nothing and emits nothing.
    pub fn step(&mut self) -> Result<StepResult, FsmError> {
        let from = self.active.clone().ok_or(FsmError::NotInitialized)?;

        if !self.validated {
            self.validate()?;
        }

        let pending = match self.pending.as_deref() {
            Some(name) => {
                let transition = self.transitions.get(name).cloned().ok_or_else(|| {
                    FsmError::UnknownTransitionName {
                        name: name.to_string(),
                    }
                })?;
                Some((name.to_string(), transition))
            }
            None => None,
        };

        let next = pending
            .as_ref()
            .map_or(from.as_str(), |(_, transition)| transition.target())
            .to_string();

        let state = match self.states.get(&next) {
            Some(state) => Arc::clone(state),
            None => {
                return Err(match pending {
                    Some((transition, _)) => FsmError::InvalidTransitionTarget {
                        transition,
                        target: next,
                    },
                    None => FsmError::UnknownStateName { name: next },
                })
            }
        };

        self.step_count += 1;

        let result = match pending {
            Some((name, transition)) => {
                transition.execute(&name, &mut *self.sink);
                self.pending = None;
                self.active = Some(next.clone());
                self.history.push(TransitionRecord {
                    transition: name.clone(),
                    from: from.clone(),
                    to: next.clone(),
                    timestamp: Utc::now(),
                    step: self.step_count,
                });
                tracing::debug!(
                    transition = %name,
                    from = %from,
                    to = %next,
                    step = self.step_count,
                    "Transition applied"
                );
                StepResult::Transitioned {
                    transition: name,
                    from,
                    to: next.clone(),
                }
            }
            None => StepResult::Stayed { state: from },
        };

        state.execute(&next, &mut *self.sink);
        Ok(result)
    }

    /// Name of the active state, `None` before initialisation
    pub fn active_state_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active_state(&self) -> Option<&Arc<dyn State>> {
        self.active.as_ref().and_then(|name| self.states.get(name))
    }

    /// Name of the transition waiting for the next step
    pub fn pending_transition(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    pub fn has_state(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    pub fn has_transition(&self, name: &str) -> bool {
        self.transitions.contains_key(name)
    }

    pub fn transition(&self, name: &str) -> Option<&Transition> {
        self.transitions.get(name)
    }

    /// Registered state names, sorted
    pub fn state_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.states.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Registered transition names, sorted
    pub fn transition_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.transitions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn history(&self) -> &StepHistory {
        &self.history
    }

    /// Number of successful steps taken
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn is_validated(&self) -> bool {
        self.validated
    }

    fn first_invalid_target(&self) -> Option<FsmError> {
        self.transition_names().into_iter().find_map(|name| {
            let transition = self.transitions.get(name)?;
            (!self.states.contains_key(transition.target())).then(|| {
                FsmError::InvalidTransitionTarget {
                    transition: name.to_string(),
                    target: transition.target().to_string(),
                }
            })
        })
    }
}

impl Default for FiniteStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FiniteStateMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FiniteStateMachine")
            .field("states", &self.state_names())
            .field("transitions", &self.transition_names())
            .field("active", &self.active)
            .field("pending", &self.pending)
            .field("validated", &self.validated)
            .field("step_count", &self.step_count)
            .finish_non_exhaustive()
    }
}
