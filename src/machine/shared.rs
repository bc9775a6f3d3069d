//! Mutex-guarded machine handle for more than one driver.

use crate::machine::error::FsmError;
use crate::machine::fsm::{FiniteStateMachine, StepResult};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cloneable handle onto one machine.
///
/// `request_transition` and `step` each hold the lock for their whole
/// duration, so a request can never interleave with half a step.
///
/// # Example
///
/// ```rust
/// use lumen::bulb::LightBulb;
/// use lumen::core::RecordingSink;
/// use lumen::machine::SharedMachine;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let bulb = LightBulb::with_sink(RecordingSink::new())?;
/// let shared = SharedMachine::new(bulb.into_machine());
///
/// let driver = shared.clone();
/// std::thread::spawn(move || driver.request_transition("toOff"))
///     .join()
///     .expect("driver thread panicked")?;
///
/// shared.step()?;
/// assert_eq!(shared.active_state_name().as_deref(), Some("Off"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct SharedMachine {
    inner: Arc<Mutex<FiniteStateMachine>>,
}

impl SharedMachine {
    pub fn new(machine: FiniteStateMachine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(machine)),
        }
    }

    pub fn request_transition(&self, name: &str) -> Result<(), FsmError> {
        self.lock().request_transition(name)
    }

    pub fn step(&self) -> Result<StepResult, FsmError> {
        self.lock().step()
    }

    pub fn active_state_name(&self) -> Option<String> {
        self.lock().active_state_name().map(str::to_string)
    }

    pub fn pending_transition(&self) -> Option<String> {
        self.lock().pending_transition().map(str::to_string)
    }

    /// Run `f` with exclusive access to the machine.
    pub fn with<R>(&self, f: impl FnOnce(&mut FiniteStateMachine) -> R) -> R {
        f(&mut self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, FiniteStateMachine> {
        // A step either completes or leaves the machine untouched, so the
        // state behind a poisoned lock is still consistent.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
