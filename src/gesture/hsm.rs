use statig::prelude::*;

use super::{
    config::GestureConfig,
    direction::classify_direction,
    geometry::clamped_ball_position,
    session::GestureSession,
    timer::{LongPressSlot, TimerToken},
    trace::GestureTraceSample,
    types::{
        Direction, EffectBuffer, GestureEffect, GestureStateId, Offset, Point, PointerEvent,
        PointerKind,
    },
};

mod release;

#[derive(Clone, Copy, Debug)]
pub(super) enum GestureHsmEvent {
    Pointer(PointerEvent),
    LongPressElapsed { token: TimerToken, now_ms: u64 },
    SetRestPosition(Point),
}

#[derive(Debug, Default)]
pub(super) struct DispatchContext {
    pub(super) effects: EffectBuffer,
    pub(super) rest_position_applied: bool,
}

pub(super) struct GestureHsm {
    config: GestureConfig,
    rest_position: Point,
    long_press: LongPressSlot,
    session: Option<GestureSession>,
    state_id: GestureStateId,
    last_session: u32,
    last_displacement: Offset,
    last_direction: Option<Direction>,
}

impl GestureHsm {
    pub(super) fn new(config: GestureConfig) -> Self {
        Self {
            config,
            rest_position: Point::ORIGIN,
            long_press: LongPressSlot::default(),
            session: None,
            state_id: GestureStateId::Idle,
            last_session: 0,
            last_displacement: Offset::ZERO,
            last_direction: None,
        }
    }

    pub(super) fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub(super) fn state_id(&self) -> GestureStateId {
        self.state_id
    }

    pub(super) fn rest_position(&self) -> Point {
        self.rest_position
    }

    pub(super) fn pending_long_press(&self) -> Option<TimerToken> {
        self.long_press.pending_token()
    }

    pub(super) fn trace(&self, now_ms: u64) -> GestureTraceSample {
        GestureTraceSample {
            now_ms,
            state_id: self.state_id,
            session: self.last_session,
            displacement: self.last_displacement,
            direction: self.last_direction,
            moved_beyond_slop: self
                .session
                .is_some_and(|session| session.moved_beyond_slop),
        }
    }

    fn transition(&mut self, next: GestureStateId) -> Outcome<State> {
        log::debug!(
            "gesture: session={} state={} -> {}",
            self.last_session,
            self.state_id.label(),
            next.label()
        );
        self.state_id = next;
        match next {
            GestureStateId::Idle => Transition(State::idle()),
            GestureStateId::Pressed => Transition(State::pressed()),
            GestureStateId::Dragging => Transition(State::dragging()),
            GestureStateId::LongPressed => Transition(State::long_pressed()),
            GestureStateId::LongDragging => Transition(State::long_dragging()),
        }
    }

    fn ignore(&self, event: &GestureHsmEvent) {
        log::trace!(
            "gesture: ignored state={} event={:?}",
            self.state_id.label(),
            event
        );
    }

    fn begin_press(&mut self, context: &mut DispatchContext, pointer: &PointerEvent) {
        let (token, deadline_ms) = self
            .long_press
            .arm(pointer.t_ms, self.config.long_press_timeout_ms);
        self.session = Some(GestureSession::begin(token, pointer, self.rest_position));
        self.last_session = token.session();
        self.last_displacement = Offset::ZERO;
        self.last_direction = None;
        context
            .effects
            .push(GestureEffect::ScheduleLongPress { token, deadline_ms });
        log::debug!(
            "gesture: press session={} x={} y={} t_ms={} long_press_at={}",
            token.session(),
            pointer.x,
            pointer.y,
            pointer.t_ms,
            deadline_ms
        );
    }

    fn disarm_long_press(&mut self, context: &mut DispatchContext) {
        if let Some(token) = self.long_press.disarm() {
            context
                .effects
                .push(GestureEffect::CancelLongPress { token });
        }
    }

    fn observe_move(&mut self, pointer: &PointerEvent) -> Offset {
        let move_slop = self.config.move_slop;
        let displacement = self
            .session
            .as_mut()
            .map_or(Offset::ZERO, |session| session.observe(pointer.point(), move_slop));
        self.last_displacement = displacement;
        displacement
    }

    fn moved_beyond_slop(&self) -> bool {
        self.session.is_some_and(|session| session.moved_beyond_slop)
    }

    fn drag_overlay(&mut self, context: &mut DispatchContext, pointer: &PointerEvent) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let delta = session.step_to(pointer.point());
        if !delta.is_zero() {
            context.effects.push(GestureEffect::MoveOverlayBy(delta));
        }
    }

    /// Joystick mode: the ball follows the finger up to the clamp radius and
    /// the latest direction replaces any earlier one.
    fn steer_ball(&mut self, context: &mut DispatchContext, displacement: Offset) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let direction = classify_direction(displacement, self.config.move_slop);
        session.armed_direction = direction;
        self.last_direction = direction;

        let position = clamped_ball_position(
            session.rest_position(),
            displacement,
            self.config.max_distance,
        );
        context.effects.push(GestureEffect::SetBallPosition(position));
    }
}

#[state_machine(initial = "State::idle()")]
impl GestureHsm {
    #[state]
    fn idle(&mut self, context: &mut DispatchContext, event: &GestureHsmEvent) -> Outcome<State> {
        match event {
            GestureHsmEvent::Pointer(pointer) => match pointer.kind {
                PointerKind::Down => {
                    self.begin_press(context, pointer);
                    self.transition(GestureStateId::Pressed)
                }
                PointerKind::Move | PointerKind::Up | PointerKind::Cancel => {
                    self.ignore(event);
                    Handled
                }
            },
            GestureHsmEvent::SetRestPosition(position) => {
                self.rest_position = *position;
                context.rest_position_applied = true;
                Handled
            }
            GestureHsmEvent::LongPressElapsed { .. } => {
                self.ignore(event);
                Handled
            }
        }
    }

    #[state(superstate = "engaged")]
    fn pressed(&mut self, context: &mut DispatchContext, event: &GestureHsmEvent) -> Outcome<State> {
        match event {
            GestureHsmEvent::Pointer(pointer) => match pointer.kind {
                PointerKind::Move => {
                    self.observe_move(pointer);
                    if self.moved_beyond_slop() {
                        self.disarm_long_press(context);
                        self.drag_overlay(context, pointer);
                        return self.transition(GestureStateId::Dragging);
                    }
                    Handled
                }
                PointerKind::Down | PointerKind::Up | PointerKind::Cancel => Super,
            },
            GestureHsmEvent::LongPressElapsed { token, now_ms } => {
                // Only the deadline armed by this press counts; anything else
                // is a late callback from an earlier session.
                if self.long_press.fire(*token) {
                    log::debug!(
                        "gesture: long_press session={} t_ms={}",
                        token.session(),
                        now_ms
                    );
                    context.effects.push(GestureEffect::Vibrate);
                    return self.transition(GestureStateId::LongPressed);
                }
                log::warn!(
                    "gesture: stale long-press session={} current={}",
                    token.session(),
                    self.last_session
                );
                Super
            }
            GestureHsmEvent::SetRestPosition(_) => Super,
        }
    }

    #[state(superstate = "engaged")]
    fn dragging(
        &mut self,
        context: &mut DispatchContext,
        event: &GestureHsmEvent,
    ) -> Outcome<State> {
        match event {
            GestureHsmEvent::Pointer(pointer) => match pointer.kind {
                PointerKind::Move => {
                    self.observe_move(pointer);
                    self.drag_overlay(context, pointer);
                    Handled
                }
                PointerKind::Down | PointerKind::Up | PointerKind::Cancel => Super,
            },
            GestureHsmEvent::LongPressElapsed { .. } | GestureHsmEvent::SetRestPosition(_) => {
                Super
            }
        }
    }

    #[state(superstate = "engaged")]
    fn long_pressed(
        &mut self,
        context: &mut DispatchContext,
        event: &GestureHsmEvent,
    ) -> Outcome<State> {
        match event {
            GestureHsmEvent::Pointer(pointer) => match pointer.kind {
                PointerKind::Move => {
                    // The ball follows the finger at once; leaving the slop
                    // is what arms a direction.
                    let displacement = self.observe_move(pointer);
                    self.steer_ball(context, displacement);
                    if self.moved_beyond_slop() {
                        return self.transition(GestureStateId::LongDragging);
                    }
                    Handled
                }
                PointerKind::Down | PointerKind::Up | PointerKind::Cancel => Super,
            },
            GestureHsmEvent::LongPressElapsed { .. } | GestureHsmEvent::SetRestPosition(_) => {
                Super
            }
        }
    }

    #[state(superstate = "engaged")]
    fn long_dragging(
        &mut self,
        context: &mut DispatchContext,
        event: &GestureHsmEvent,
    ) -> Outcome<State> {
        match event {
            GestureHsmEvent::Pointer(pointer) => match pointer.kind {
                PointerKind::Move => {
                    let displacement = self.observe_move(pointer);
                    self.steer_ball(context, displacement);
                    Handled
                }
                PointerKind::Down | PointerKind::Up | PointerKind::Cancel => Super,
            },
            GestureHsmEvent::LongPressElapsed { .. } | GestureHsmEvent::SetRestPosition(_) => {
                Super
            }
        }
    }

    /// Every live session ends here: release resolves the outcome of the state
    /// it left, cancel only snaps back.
    #[superstate]
    fn engaged(&mut self, context: &mut DispatchContext, event: &GestureHsmEvent) -> Outcome<State> {
        match event {
            GestureHsmEvent::Pointer(pointer) => match pointer.kind {
                PointerKind::Up => {
                    let outcome = self.release_outcome(self.state_id, pointer.t_ms);
                    self.end_session(context, outcome);
                    self.transition(GestureStateId::Idle)
                }
                PointerKind::Cancel => {
                    log::debug!(
                        "gesture: cancel session={} state={}",
                        self.last_session,
                        self.state_id.label()
                    );
                    self.end_session(context, None);
                    self.transition(GestureStateId::Idle)
                }
                PointerKind::Down | PointerKind::Move => {
                    self.ignore(event);
                    Handled
                }
            },
            GestureHsmEvent::LongPressElapsed { .. } | GestureHsmEvent::SetRestPosition(_) => {
                self.ignore(event);
                Handled
            }
        }
    }
}
