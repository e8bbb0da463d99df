use crate::gesture::{BallTransition, GestureEffect, Offset, OverlayAction, Point};

/// Moves the whole overlay window. Screen-edge handling is the implementor's.
pub trait OverlayPositioner {
    fn move_by(&mut self, delta: Offset);
}

/// Places the ball surface inside the anchor.
pub trait BallRenderer {
    fn set_position(&mut self, position: Point, transition: BallTransition);
}

pub trait Haptics {
    fn vibrate(&mut self);
}

/// Receives at most one action per gesture.
pub trait ActionSink {
    fn emit(&mut self, action: OverlayAction);
}

/// Everything the controller needs from the platform.
pub trait OverlayHost: OverlayPositioner + BallRenderer + Haptics + ActionSink {}

impl<T> OverlayHost for T where T: OverlayPositioner + BallRenderer + Haptics + ActionSink {}

/// Builds an [`OverlayHost`] out of four independent platform wrappers.
#[derive(Clone, Debug, Default)]
pub struct Collaborators<P, R, H, A> {
    pub positioner: P,
    pub renderer: R,
    pub haptics: H,
    pub actions: A,
}

impl<P, R, H, A> Collaborators<P, R, H, A> {
    pub fn new(positioner: P, renderer: R, haptics: H, actions: A) -> Self {
        Self {
            positioner,
            renderer,
            haptics,
            actions,
        }
    }
}

impl<P: OverlayPositioner, R, H, A> OverlayPositioner for Collaborators<P, R, H, A> {
    fn move_by(&mut self, delta: Offset) {
        self.positioner.move_by(delta);
    }
}

impl<P, R: BallRenderer, H, A> BallRenderer for Collaborators<P, R, H, A> {
    fn set_position(&mut self, position: Point, transition: BallTransition) {
        self.renderer.set_position(position, transition);
    }
}

impl<P, R, H: Haptics, A> Haptics for Collaborators<P, R, H, A> {
    fn vibrate(&mut self) {
        self.haptics.vibrate();
    }
}

impl<P, R, H, A: ActionSink> ActionSink for Collaborators<P, R, H, A> {
    fn emit(&mut self, action: OverlayAction) {
        self.actions.emit(action);
    }
}

/// Forwards one interpreter effect to the host. Timer bookkeeping effects are
/// not host calls; returns `false` for those.
pub fn deliver<H: OverlayHost + ?Sized>(host: &mut H, effect: GestureEffect) -> bool {
    match effect {
        GestureEffect::MoveOverlayBy(delta) => host.move_by(delta),
        GestureEffect::SetBallPosition(position) => {
            host.set_position(position, BallTransition::Immediate)
        }
        GestureEffect::SnapBack {
            position,
            duration_ms,
        } => host.set_position(position, BallTransition::Animated { duration_ms }),
        GestureEffect::Vibrate => host.vibrate(),
        GestureEffect::Emit { action, .. } => host.emit(action),
        GestureEffect::ScheduleLongPress { .. } | GestureEffect::CancelLongPress { .. } => {
            return false
        }
    }
    true
}
