//! Floating-ball overlay gestures.
//!
//! [`gesture`] turns a single-pointer stream into overlay drags, joystick
//! ball placement and discrete actions. [`overlay`] is the host-facing side:
//! an ordered input queue that owns the long-press deadline and forwards
//! effects to platform collaborators.

pub mod gesture;
pub mod overlay;

pub use gesture::{
    active_config, GestureConfig, GestureEffect, GestureInterpreter, GestureOutput,
    GestureStateId, OverlayAction, PointerEvent, PointerKind,
};
pub use overlay::{OverlayController, OverlayError, OverlayHost, RecordingHost};
