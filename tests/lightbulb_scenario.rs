//! End-to-end driver scenarios against the public API.

use lumen::builder::MachineBuilder;
use lumen::bulb::{LightBulb, OFF, ON, TO_OFF, TO_ON};
use lumen::checkpoint::Checkpoint;
use lumen::config::MachineDefinition;
use lumen::core::{MachineEvent, RecordingSink, StatusState, Transition};
use lumen::{FiniteStateMachine, FsmError, StepResult};

fn registered_machine(recorder: &RecordingSink) -> FiniteStateMachine {
    let mut fsm = FiniteStateMachine::with_sink(recorder.clone());
    fsm.register_state("On", StatusState::new("Light is ON"));
    fsm.register_state("Off", StatusState::new("Light is OFF"));
    fsm.register_transition("toOn", Transition::new("On")).unwrap();
    fsm.register_transition("toOff", Transition::new("Off")).unwrap();
    fsm
}

#[test]
fn on_off_on_scenario() {
    let recorder = RecordingSink::new();
    let mut fsm = registered_machine(&recorder);
    fsm.set_active_state("On").unwrap();

    fsm.step().unwrap();
    assert_eq!(recorder.drain(), vec![MachineEvent::state("On", "Light is ON")]);

    fsm.request_transition("toOff").unwrap();
    fsm.step().unwrap();
    assert_eq!(
        recorder.drain(),
        vec![
            MachineEvent::transition("toOff", "Off"),
            MachineEvent::state("Off", "Light is OFF"),
        ]
    );

    fsm.step().unwrap();
    assert_eq!(recorder.drain(), vec![MachineEvent::state("Off", "Light is OFF")]);
    assert_eq!(fsm.active_state_name(), Some("Off"));
    assert_eq!(fsm.pending_transition(), None);
}

#[test]
fn driver_errors_surface_immediately() {
    let recorder = RecordingSink::new();
    let mut fsm = registered_machine(&recorder);
    fsm.set_active_state("On").unwrap();

    assert_eq!(
        fsm.set_active_state("Unknown"),
        Err(FsmError::UnknownStateName {
            name: "Unknown".to_string()
        })
    );
    assert_eq!(
        fsm.request_transition("toUnknown"),
        Err(FsmError::UnknownTransitionName {
            name: "toUnknown".to_string()
        })
    );
    assert_eq!(fsm.active_state_name(), Some("On"));
    assert!(recorder.is_empty());
}

#[test]
fn error_messages_name_the_offender() {
    let err = FsmError::InvalidTransitionTarget {
        transition: "toDim".to_string(),
        target: "Dim".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Transition 'toDim' targets unregistered state 'Dim'"
    );
}

#[test]
fn bulb_demo_loop_matches_machine() {
    let recorder = RecordingSink::new();
    let mut bulb = LightBulb::with_sink(recorder.clone()).unwrap();

    for step in 1..=10 {
        if step % 3 != 0 {
            bulb.toggle().unwrap();
        }
        let result = bulb.step().unwrap();

        let expected = if bulb.is_on() { ON } else { OFF };
        assert_eq!(result.state(), expected);
        assert_eq!(bulb.fsm().active_state_name(), Some(expected));
    }

    let fired = recorder
        .events()
        .iter()
        .filter(|e| matches!(e, MachineEvent::TransitionFired { .. }))
        .count();
    assert_eq!(fired, 7);
    assert_eq!(bulb.fsm().history().len(), 7);
}

#[test]
fn step_reports_what_happened() {
    let mut bulb = LightBulb::with_sink(RecordingSink::new()).unwrap();

    assert_eq!(
        bulb.step().unwrap(),
        StepResult::Stayed {
            state: ON.to_string()
        }
    );

    bulb.switch_off().unwrap();
    assert_eq!(
        bulb.step().unwrap(),
        StepResult::Transitioned {
            transition: TO_OFF.to_string(),
            from: ON.to_string(),
            to: OFF.to_string(),
        }
    );
}

#[test]
fn configured_machine_behaves_like_bulb() {
    let from_config = RecordingSink::new();
    let from_bulb = RecordingSink::new();

    let json = MachineDefinition::lightbulb().to_json().unwrap();
    let mut configured = MachineDefinition::from_json(&json)
        .unwrap()
        .build(from_config.clone())
        .unwrap();
    let mut bulb = LightBulb::with_sink(from_bulb.clone()).unwrap();

    for name in [TO_OFF, TO_ON, TO_OFF] {
        configured.request_transition(name).unwrap();
        configured.step().unwrap();
        bulb.fsm_mut().request_transition(name).unwrap();
        bulb.step().unwrap();
    }

    assert_eq!(from_config.events(), from_bulb.events());
}

#[test]
fn checkpoint_round_trip_through_bytes_resumes_machine() {
    let mut bulb = LightBulb::with_sink(RecordingSink::new()).unwrap();
    bulb.switch_off().unwrap();
    bulb.step().unwrap();

    let bytes = bulb.fsm().checkpoint().to_bytes().unwrap();

    let recorder = RecordingSink::new();
    let mut resumed = LightBulb::with_sink(recorder.clone()).unwrap();
    resumed
        .fsm_mut()
        .restore(&Checkpoint::from_bytes(&bytes).unwrap())
        .unwrap();

    assert!(!resumed.is_on());
    resumed.step().unwrap();
    assert_eq!(recorder.events(), vec![MachineEvent::state(OFF, "Light is OFF")]);
}

#[test]
fn builder_and_manual_registration_agree() {
    let built_recorder = RecordingSink::new();
    let mut built = MachineBuilder::new()
        .state("On", StatusState::new("Light is ON"))
        .state("Off", StatusState::new("Light is OFF"))
        .transition("toOn", "On")
        .transition("toOff", "Off")
        .initial("Off")
        .sink(built_recorder.clone())
        .build()
        .unwrap();

    let manual_recorder = RecordingSink::new();
    let mut manual = registered_machine(&manual_recorder);
    manual.set_active_state("Off").unwrap();

    for machine in [&mut built, &mut manual] {
        machine.step().unwrap();
        machine.request_transition("toOn").unwrap();
        machine.step().unwrap();
    }

    assert_eq!(built_recorder.events(), manual_recorder.events());
}
