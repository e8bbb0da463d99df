use core::fmt;

use super::host::{ActionSink, BallRenderer, Haptics, OverlayPositioner};
use crate::gesture::{BallTransition, Offset, OverlayAction, Point};

/// One collaborator call as seen by a [`RecordingHost`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostCall {
    MoveBy(Offset),
    SetPosition {
        position: Point,
        transition: BallTransition,
    },
    Vibrate,
    Emit(OverlayAction),
}

impl HostCall {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::MoveBy(_) => "move_by",
            Self::SetPosition {
                transition: BallTransition::Immediate,
                ..
            } => "set_position",
            Self::SetPosition {
                transition: BallTransition::Animated { .. },
                ..
            } => "snap_back",
            Self::Vibrate => "vibrate",
            Self::Emit(_) => "emit",
        }
    }
}

/// `label[,fields...]`, the replay tool's output line without the `call,`
/// prefix.
impl fmt::Display for HostCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoveBy(delta) => write!(f, "{},{},{}", self.label(), delta.dx, delta.dy),
            Self::SetPosition {
                position,
                transition: BallTransition::Immediate,
            } => write!(f, "{},{},{}", self.label(), position.x, position.y),
            Self::SetPosition {
                position,
                transition: BallTransition::Animated { duration_ms },
            } => write!(
                f,
                "{},{},{},{}",
                self.label(),
                position.x,
                position.y,
                duration_ms
            ),
            Self::Vibrate => f.write_str(self.label()),
            Self::Emit(action) => write!(f, "{},{}", self.label(), action.label()),
        }
    }
}

/// Host that remembers every call in order. Used by tests and the replay tool.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordingHost {
    calls: Vec<HostCall>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<HostCall> {
        core::mem::take(&mut self.calls)
    }

    pub fn emitted(&self) -> Vec<OverlayAction> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::Emit(action) => Some(*action),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, label: &str) -> usize {
        self.calls.iter().filter(|call| call.label() == label).count()
    }
}

impl OverlayPositioner for RecordingHost {
    fn move_by(&mut self, delta: Offset) {
        self.calls.push(HostCall::MoveBy(delta));
    }
}

impl BallRenderer for RecordingHost {
    fn set_position(&mut self, position: Point, transition: BallTransition) {
        self.calls.push(HostCall::SetPosition {
            position,
            transition,
        });
    }
}

impl Haptics for RecordingHost {
    fn vibrate(&mut self) {
        self.calls.push(HostCall::Vibrate);
    }
}

impl ActionSink for RecordingHost {
    fn emit(&mut self, action: OverlayAction) {
        self.calls.push(HostCall::Emit(action));
    }
}
