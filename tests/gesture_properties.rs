use floatball::{
    gesture::{
        BallTransition, GestureConfig, GestureEffect, GestureInterpreter, GestureStateId, Offset,
        OverlayAction, Point, PointerEvent, PointerKind, TimerToken,
    },
    overlay::{HostCall, OverlayController, RecordingHost},
};

const REST: Point = Point::new(40.0, 300.0);

fn config() -> GestureConfig {
    GestureConfig {
        click_timeout_ms: 200,
        long_press_timeout_ms: 400,
        move_slop: 10.0,
        max_distance: 100.0,
        snap_back_duration_ms: 160,
        centered_long_press: Some(OverlayAction::GoHome),
    }
}

fn overlay() -> OverlayController<RecordingHost> {
    let interpreter = GestureInterpreter::new(config())
        .expect("valid config")
        .with_rest_position(REST);
    OverlayController::new(interpreter, RecordingHost::new())
}

fn send(overlay: &mut OverlayController<RecordingHost>, event: PointerEvent) {
    overlay.dispatch(event).expect("event accepted");
}

fn snap_backs(calls: &[HostCall]) -> Vec<Point> {
    calls
        .iter()
        .filter_map(|call| match call {
            HostCall::SetPosition {
                position,
                transition: BallTransition::Animated { .. },
            } => Some(*position),
            _ => None,
        })
        .collect()
}

fn immediate_positions(calls: &[HostCall]) -> Vec<Point> {
    calls
        .iter()
        .filter_map(|call| match call {
            HostCall::SetPosition {
                position,
                transition: BallTransition::Immediate,
            } => Some(*position),
            _ => None,
        })
        .collect()
}

#[test]
fn click_opens_menu_without_moving_overlay() {
    let mut overlay = overlay();
    send(&mut overlay, PointerEvent::down(0.0, 0.0, 0));
    send(&mut overlay, PointerEvent::up(0.0, 0.0, 100));

    let host = overlay.host();
    assert_eq!(host.emitted(), vec![OverlayAction::OpenMenu]);
    assert_eq!(host.count("move_by"), 0);
    assert_eq!(snap_backs(host.calls()), vec![REST]);
}

#[test]
fn slop_gated_drag_moves_overlay_once_and_emits_nothing() {
    let mut overlay = overlay();
    send(&mut overlay, PointerEvent::down(0.0, 0.0, 0));
    send(&mut overlay, PointerEvent::moved(20.0, 0.0, 40));
    assert_eq!(overlay.interpreter().state(), GestureStateId::Dragging);

    send(&mut overlay, PointerEvent::up(20.0, 0.0, 90));
    let host = overlay.host();
    assert_eq!(
        host.calls()
            .iter()
            .filter(|call| matches!(call, HostCall::MoveBy(_)))
            .collect::<Vec<_>>(),
        vec![&HostCall::MoveBy(Offset::new(20.0, 0.0))]
    );
    assert!(host.emitted().is_empty());
    assert_eq!(snap_backs(host.calls()), vec![REST]);
}

#[test]
fn long_press_then_centered_release() {
    let mut overlay = overlay();
    send(&mut overlay, PointerEvent::down(0.0, 0.0, 0));
    overlay.pump(450);
    assert_eq!(overlay.interpreter().state(), GestureStateId::LongPressed);

    send(&mut overlay, PointerEvent::up(0.0, 0.0, 450));
    let host = overlay.host();
    assert_eq!(host.count("vibrate"), 1);
    assert_eq!(host.emitted(), vec![OverlayAction::GoHome]);
    assert_eq!(overlay.counters().centered_long_presses, 1);
    assert_eq!(overlay.counters().directional_actions, 0);
}

#[test]
fn clamped_ball_never_leaves_max_distance() {
    let mut overlay = overlay();
    send(&mut overlay, PointerEvent::down(0.0, 0.0, 0));
    overlay.pump(400);
    send(&mut overlay, PointerEvent::moved(300.0, 0.0, 420));

    let first = immediate_positions(overlay.host().calls())[0];
    let offset = first.offset_from(REST);
    assert!((offset.dx - 100.0).abs() < 1e-3, "offset {offset:?}");
    assert!(offset.dy.abs() < 1e-3, "offset {offset:?}");

    let mut t_ms = 430;
    for (x, y) in [
        (100.0, 0.0),
        (0.0, -100.0),
        (70.71, 70.71),
        (-2_000.0, 5.0),
        (640.0, -480.0),
    ] {
        send(&mut overlay, PointerEvent::moved(x, y, t_ms));
        t_ms += 10;
    }
    for position in immediate_positions(overlay.host().calls()) {
        let length = position.offset_from(REST).length();
        assert!(length <= 100.0 + 1e-3, "ball at {position:?} is {length} from rest");
    }
}

#[test]
fn upward_joystick_goes_home_and_recenters() {
    let mut overlay = overlay();
    send(&mut overlay, PointerEvent::down(0.0, 0.0, 0));
    overlay.pump(400);
    send(&mut overlay, PointerEvent::moved(0.0, -150.0, 420));
    send(&mut overlay, PointerEvent::up(0.0, -150.0, 470));

    let host = overlay.host();
    assert_eq!(host.emitted(), vec![OverlayAction::GoHome]);
    assert_eq!(
        host.calls().last(),
        Some(&HostCall::SetPosition {
            position: REST,
            transition: BallTransition::Animated { duration_ms: 160 },
        })
    );
}

/// Returns a timestamp at which the next event still finds the session in
/// `state`.
fn drive_to(overlay: &mut OverlayController<RecordingHost>, state: GestureStateId) -> u64 {
    send(overlay, PointerEvent::down(0.0, 0.0, 0));
    let next_ms = match state {
        GestureStateId::Pressed => 100,
        GestureStateId::Dragging => {
            send(overlay, PointerEvent::moved(0.0, 50.0, 50));
            100
        }
        GestureStateId::LongPressed => {
            overlay.pump(400);
            420
        }
        GestureStateId::LongDragging => {
            overlay.pump(400);
            send(overlay, PointerEvent::moved(-60.0, 0.0, 420));
            430
        }
        GestureStateId::Idle => unreachable!("idle has no session"),
    };
    assert_eq!(overlay.interpreter().state(), state);
    next_ms
}

#[test]
fn cancel_is_idempotent_across_states() {
    for state in [
        GestureStateId::Pressed,
        GestureStateId::Dragging,
        GestureStateId::LongPressed,
        GestureStateId::LongDragging,
    ] {
        let mut overlay = overlay();
        let t_ms = drive_to(&mut overlay, state);
        send(&mut overlay, PointerEvent::cancel(0.0, 0.0, t_ms));
        overlay.pump(2_000);

        assert!(overlay.interpreter().is_idle(), "from {state:?}");
        assert!(overlay.host().emitted().is_empty(), "from {state:?}");
        assert_eq!(
            overlay.host().count("vibrate"),
            usize::from(matches!(
                state,
                GestureStateId::LongPressed | GestureStateId::LongDragging
            )),
            "from {state:?}"
        );
        assert_eq!(snap_backs(overlay.host().calls()), vec![REST], "from {state:?}");

        let before = overlay.host().calls().len();
        send(&mut overlay, PointerEvent::cancel(0.0, 0.0, 2_010));
        assert_eq!(overlay.host().calls().len(), before, "second cancel from {state:?}");
    }
}

fn pointer(kind: PointerKind, t_ms: u64) -> PointerEvent {
    PointerEvent::new(kind, 3.0, 4.0, t_ms)
}

/// Every (state, event) pair either follows the transition table or leaves the
/// state unchanged.
#[test]
fn every_state_event_pair_is_total() {
    let kinds = [
        PointerKind::Down,
        PointerKind::Move,
        PointerKind::Up,
        PointerKind::Cancel,
    ];
    let states = [
        GestureStateId::Pressed,
        GestureStateId::Dragging,
        GestureStateId::LongPressed,
        GestureStateId::LongDragging,
    ];

    for kind in kinds {
        let mut interpreter = GestureInterpreter::new(config()).expect("valid config");
        interpreter.handle(pointer(kind, 0));
        let expected = if kind == PointerKind::Down {
            GestureStateId::Pressed
        } else {
            GestureStateId::Idle
        };
        assert_eq!(interpreter.state(), expected, "idle + {kind:?}");
    }

    for state in states {
        for kind in kinds {
            let mut overlay = overlay();
            let t_ms = drive_to(&mut overlay, state);
            send(&mut overlay, pointer(kind, t_ms));
            let after = overlay.interpreter().state();
            let allowed: &[GestureStateId] = match kind {
                PointerKind::Up | PointerKind::Cancel => &[GestureStateId::Idle],
                // (3, 4) is inside the slop, so a move escalates nothing.
                PointerKind::Move | PointerKind::Down => &[state],
            };
            assert!(
                allowed.contains(&after),
                "{state:?} + {kind:?} ended in {after:?}"
            );
        }
    }
}

#[test]
fn late_timer_never_acts_after_state_moved_on() {
    let mut interpreter = GestureInterpreter::new(config()).expect("valid config");
    let output = interpreter.handle(PointerEvent::down(0.0, 0.0, 0));
    let token: TimerToken = output
        .effects
        .iter()
        .find_map(|effect| match effect {
            GestureEffect::ScheduleLongPress { token, .. } => Some(*token),
            _ => None,
        })
        .expect("press schedules a timer");

    interpreter.handle(PointerEvent::moved(40.0, 0.0, 100));
    let late = interpreter.long_press_elapsed(token, 400);
    assert!(late.effects.is_empty());
    assert_eq!(interpreter.state(), GestureStateId::Dragging);

    interpreter.handle(PointerEvent::up(40.0, 0.0, 450));
    let after_release = interpreter.long_press_elapsed(token, 460);
    assert!(after_release.effects.is_empty());
    assert!(interpreter.is_idle());
}

#[test]
fn sticky_slop_blocks_click_after_wandering_back() {
    let mut overlay = overlay();
    send(&mut overlay, PointerEvent::down(0.0, 0.0, 0));
    send(&mut overlay, PointerEvent::moved(15.0, 0.0, 20));
    send(&mut overlay, PointerEvent::moved(0.0, 0.0, 40));
    send(&mut overlay, PointerEvent::up(0.0, 0.0, 60));

    assert!(overlay.host().emitted().is_empty());
    assert_eq!(overlay.counters().clicks, 0);
}

#[test]
fn sessions_are_independent() {
    let mut overlay = overlay();
    send(&mut overlay, PointerEvent::down(0.0, 0.0, 0));
    overlay.pump(400);
    send(&mut overlay, PointerEvent::moved(120.0, 0.0, 420));
    send(&mut overlay, PointerEvent::up(120.0, 0.0, 440));

    send(&mut overlay, PointerEvent::down(0.0, 0.0, 1_000));
    send(&mut overlay, PointerEvent::up(0.0, 0.0, 1_050));

    assert_eq!(
        overlay.host().emitted(),
        vec![OverlayAction::NavigateRecent, OverlayAction::OpenMenu]
    );
    assert_eq!(overlay.counters().sessions, 2);
    assert_eq!(overlay.host().count("vibrate"), 1);
}

#[test]
fn ball_tracks_every_move_once_long_pressed() {
    let mut overlay = overlay();
    send(&mut overlay, PointerEvent::down(0.0, 0.0, 0));
    overlay.pump(400);
    send(&mut overlay, PointerEvent::moved(4.0, 3.0, 410));
    assert_eq!(overlay.interpreter().state(), GestureStateId::LongPressed);
    send(&mut overlay, PointerEvent::moved(0.0, 60.0, 420));
    assert_eq!(overlay.interpreter().state(), GestureStateId::LongDragging);

    assert_eq!(
        immediate_positions(overlay.host().calls()),
        vec![
            REST.offset_by(Offset::new(4.0, 3.0)),
            REST.offset_by(Offset::new(0.0, 60.0)),
        ]
    );
}
