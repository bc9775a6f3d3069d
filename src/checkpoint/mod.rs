//! Checkpoint and restore of a machine's runtime position.
//!
//! A checkpoint captures where a machine is (active state, pending
//! transition, step count and history), not what it is made of. States are
//! behaviour and are not serialised; a checkpoint is restored onto a machine
//! that already has the same registries.

use crate::core::StepHistory;
use crate::machine::FiniteStateMachine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a machine's runtime position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Active state name, `None` for an uninitialised machine
    pub active_state: Option<String>,

    /// Transition waiting for the next step
    pub pending_transition: Option<String>,

    /// Steps taken so far
    pub step_count: u64,

    /// Applied transitions
    pub history: StepHistory,
}

impl Checkpoint {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json).map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }
}

impl FiniteStateMachine {
    /// Capture the machine's current position.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            active_state: self.active.clone(),
            pending_transition: self.pending.clone(),
            step_count: self.step_count,
            history: self.history.clone(),
        }
    }

    /// Move the machine to the position captured in `checkpoint`.
    ///
    /// The checkpoint must name an active state, and every name in it must
    /// exist in this machine's registries. Nothing changes unless the whole
    /// checkpoint is accepted.
    pub fn restore(&mut self, checkpoint: &Checkpoint) -> Result<(), CheckpointError> {
        if checkpoint.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: checkpoint.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        let state = checkpoint
            .active_state
            .as_deref()
            .ok_or(CheckpointError::NoActiveState)?;
        if !self.has_state(state) {
            return Err(CheckpointError::UnknownState(state.to_string()));
        }

        if let Some(transition) = &checkpoint.pending_transition {
            if !self.has_transition(transition) {
                return Err(CheckpointError::UnknownTransition(transition.clone()));
            }
        }

        self.active = checkpoint.active_state.clone();
        self.pending = checkpoint.pending_transition.clone();
        self.step_count = checkpoint.step_count;
        self.history = checkpoint.history.clone();

        tracing::debug!(
            checkpoint = %checkpoint.id,
            step = checkpoint.step_count,
            "Restored machine from checkpoint"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bulb::LightBulb;
    use crate::core::{MachineEvent, RecordingSink};

    fn stepped_bulb() -> FiniteStateMachine {
        let mut bulb = LightBulb::with_sink(RecordingSink::new()).unwrap();
        bulb.switch_off().unwrap();
        bulb.step().unwrap();
        bulb.switch_on().unwrap();
        bulb.into_machine()
    }

    #[test]
    fn checkpoint_captures_position() {
        let fsm = stepped_bulb();
        let checkpoint = fsm.checkpoint();

        assert_eq!(checkpoint.version, CHECKPOINT_VERSION);
        assert_eq!(checkpoint.active_state.as_deref(), Some("Off"));
        assert_eq!(checkpoint.pending_transition.as_deref(), Some("toOn"));
        assert_eq!(checkpoint.step_count, 1);
        assert_eq!(checkpoint.history.len(), 1);
    }

    #[test]
    fn checkpoint_ids_are_unique() {
        let fsm = stepped_bulb();
        assert_ne!(fsm.checkpoint().id, fsm.checkpoint().id);
    }

    #[test]
    fn restore_resumes_where_checkpoint_left_off() {
        let checkpoint = stepped_bulb().checkpoint();
        let json = checkpoint.to_json().unwrap();

        let recorder = RecordingSink::new();
        let mut fresh = LightBulb::with_sink(recorder.clone())
            .unwrap()
            .into_machine();
        fresh
            .restore(&Checkpoint::from_json(&json).unwrap())
            .unwrap();
        fresh.step().unwrap();

        assert_eq!(fresh.active_state_name(), Some("On"));
        assert_eq!(fresh.step_count(), 2);
        assert_eq!(fresh.history().get_path(), vec!["On", "Off", "On"]);
        assert_eq!(
            recorder.events(),
            vec![
                MachineEvent::transition("toOn", "On"),
                MachineEvent::state("On", "Light is ON"),
            ]
        );
    }

    #[test]
    fn binary_encoding_preserves_checkpoint() {
        let checkpoint = stepped_bulb().checkpoint();
        let bytes = checkpoint.to_bytes().unwrap();

        assert_eq!(Checkpoint::from_bytes(&bytes).unwrap(), checkpoint);
    }

    #[test]
    fn restore_rejects_unsupported_version() {
        let mut checkpoint = stepped_bulb().checkpoint();
        checkpoint.version = 99;

        let mut fsm = stepped_bulb();
        let result = fsm.restore(&checkpoint);

        assert!(matches!(
            result,
            Err(CheckpointError::UnsupportedVersion {
                found: 99,
                supported: 1
            })
        ));
    }

    #[test]
    fn restore_rejects_unknown_names_without_changes() {
        let mut checkpoint = stepped_bulb().checkpoint();
        checkpoint.active_state = Some("Dim".to_string());

        let mut fsm = LightBulb::with_sink(RecordingSink::new())
            .unwrap()
            .into_machine();
        let result = fsm.restore(&checkpoint);

        assert_eq!(result, Err(CheckpointError::UnknownState("Dim".to_string())));
        assert_eq!(fsm.active_state_name(), Some("On"));
        assert_eq!(fsm.step_count(), 0);
    }

    #[test]
    fn restore_rejects_unknown_pending_transition() {
        let mut checkpoint = stepped_bulb().checkpoint();
        checkpoint.pending_transition = Some("toDim".to_string());

        let mut fsm = stepped_bulb();
        let result = fsm.restore(&checkpoint);

        assert_eq!(
            result,
            Err(CheckpointError::UnknownTransition("toDim".to_string()))
        );
        assert_eq!(fsm.pending_transition(), Some("toOn"));
    }

    #[test]
    fn restore_never_clears_active_state() {
        let uninitialised = FiniteStateMachine::with_sink(RecordingSink::new()).checkpoint();
        assert_eq!(uninitialised.active_state, None);

        let recorder = RecordingSink::new();
        let mut fsm = LightBulb::with_sink(recorder.clone())
            .unwrap()
            .into_machine();
        let result = fsm.restore(&uninitialised);

        assert_eq!(result, Err(CheckpointError::NoActiveState));
        assert_eq!(fsm.active_state_name(), Some("On"));
        fsm.step().unwrap();
        assert_eq!(recorder.events(), vec![MachineEvent::state("On", "Light is ON")]);
    }

    #[test]
    fn corrupt_bytes_fail_to_decode() {
        let result = Checkpoint::from_bytes(&[1, 2, 3]);
        assert!(matches!(
            result,
            Err(CheckpointError::DeserializationFailed(_))
        ));
    }
}
