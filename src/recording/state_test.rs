use super::*;

fn run_countdown(controller: &mut SessionController) {
    while controller.status() == SessionStatus::Starting {
        controller.tick_countdown().unwrap();
    }
}

/// Test complete session flow: Idle -> Starting -> Recording -> Stopping -> Processing -> Idle
#[test]
fn test_complete_session_flow() {
    let mut controller = SessionController::new();
    assert_eq!(controller.status(), SessionStatus::Idle);
    assert_eq!(controller.countdown(), None);

    assert_eq!(controller.start_recording().unwrap(), 3);
    assert_eq!(controller.status(), SessionStatus::Starting);
    assert_eq!(controller.countdown(), Some(3));

    assert_eq!(controller.tick_countdown().unwrap(), CountdownTick::Remaining(2));
    assert_eq!(controller.countdown(), Some(2));
    assert_eq!(controller.tick_countdown().unwrap(), CountdownTick::Remaining(1));
    assert_eq!(controller.tick_countdown().unwrap(), CountdownTick::Finished);
    assert_eq!(controller.status(), SessionStatus::Recording);
    assert_eq!(controller.countdown(), None);

    controller.stop_recording().unwrap();
    assert_eq!(controller.status(), SessionStatus::Stopping);

    controller.begin_processing().unwrap();
    assert_eq!(controller.status(), SessionStatus::Processing);

    controller.on_finished().unwrap();
    assert_eq!(controller.status(), SessionStatus::Idle);
}

/// Repeated cycles always end in Idle, and the countdown only exists while Starting
#[test]
fn test_repeated_cycles_end_idle() {
    let mut controller = SessionController::new();
    for cycle in 0..5 {
        controller.start_recording().unwrap();
        while controller.status() == SessionStatus::Starting {
            assert!(controller.countdown().is_some());
            controller.tick_countdown().unwrap();
        }
        assert_eq!(controller.countdown(), None);
        controller.stop_recording().unwrap();
        assert_eq!(controller.countdown(), None);
        // Alternate between the direct and the processing completion paths
        if cycle % 2 == 0 {
            controller.begin_processing().unwrap();
        }
        controller.on_finished().unwrap();
        assert_eq!(controller.countdown(), None);
    }
    assert_eq!(controller.status(), SessionStatus::Idle);
}

#[test]
fn test_start_rejected_when_not_idle() {
    let mut controller = SessionController::new();
    controller.start_recording().unwrap();
    controller.tick_countdown().unwrap();

    let err = controller.start_recording().unwrap_err();
    assert_eq!(
        err,
        SessionStateError::InvalidTransition {
            from: SessionStatus::Starting,
            to: SessionStatus::Starting,
        }
    );
    // Rejected start must not re-arm the countdown
    assert_eq!(controller.countdown(), Some(2));

    run_countdown(&mut controller);
    assert!(controller.start_recording().is_err());
    assert_eq!(controller.status(), SessionStatus::Recording);

    controller.stop_recording().unwrap();
    assert!(controller.start_recording().is_err());
    assert_eq!(controller.status(), SessionStatus::Stopping);
}

#[test]
fn test_stop_rejected_when_not_recording() {
    let mut controller = SessionController::new();
    assert!(controller.stop_recording().is_err());
    assert_eq!(controller.status(), SessionStatus::Idle);

    controller.start_recording().unwrap();
    assert!(controller.stop_recording().is_err());
    assert_eq!(controller.status(), SessionStatus::Starting);
    assert_eq!(controller.countdown(), Some(3));

    run_countdown(&mut controller);
    controller.stop_recording().unwrap();
    assert!(controller.stop_recording().is_err());
    assert_eq!(controller.status(), SessionStatus::Stopping);
}

#[test]
fn test_finished_only_after_stop() {
    let mut controller = SessionController::new();
    assert!(controller.on_finished().is_err());
    assert!(controller.begin_processing().is_err());

    controller.start_recording().unwrap();
    run_countdown(&mut controller);
    assert!(controller.on_finished().is_err());
    assert!(controller.begin_processing().is_err());
    assert_eq!(controller.status(), SessionStatus::Recording);
}

#[test]
fn test_tick_outside_countdown_is_rejected() {
    let mut controller = SessionController::new();
    assert!(controller.tick_countdown().is_err());
    assert_eq!(controller.status(), SessionStatus::Idle);
    assert_eq!(controller.countdown(), None);
}

#[test]
fn test_abort_clears_countdown() {
    let mut controller = SessionController::new();
    assert!(controller.abort().is_err());

    controller.start_recording().unwrap();
    controller.abort().unwrap();
    assert_eq!(controller.status(), SessionStatus::Idle);
    assert_eq!(controller.countdown(), None);

    // A fresh countdown starts from the top
    controller.start_recording().unwrap();
    assert_eq!(controller.countdown(), Some(3));
}

#[test]
fn test_zero_second_countdown_still_ticks_once() {
    let mut controller = SessionController::with_countdown(0);
    controller.start_recording().unwrap();
    assert_eq!(controller.status(), SessionStatus::Starting);
    assert_eq!(controller.tick_countdown().unwrap(), CountdownTick::Finished);
    assert_eq!(controller.status(), SessionStatus::Recording);
}

#[test]
fn test_status_serializes_lowercase() {
    let json = serde_json::to_string(&SessionStatus::Processing).unwrap();
    assert_eq!(json, "\"processing\"");
}
