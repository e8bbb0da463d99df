//! Gesture interpreter for the floating ball.
//!
//! One pointer stream in; overlay drags, joystick ball placement, haptics and
//! at most one discrete action per press out. The long-press deadline is a
//! request to the host (`ScheduleLongPress`) that comes back through
//! [`GestureInterpreter::long_press_elapsed`] on the same queue as pointer
//! events.

pub mod config;
pub mod direction;
pub mod engine;
pub mod geometry;
mod hsm;
mod session;
pub mod timer;
pub mod trace;
pub mod types;


pub use config::{active_config, ConfigError, GestureConfig};
pub use direction::classify_direction;
pub use engine::{GestureInterpreter, GestureOutput};
pub use geometry::{clamp_offset, clamped_ball_position};
pub use timer::TimerToken;
pub use trace::GestureTraceSample;
pub use types::{
    ActionOrigin, BallTransition, Direction, EffectBuffer, GestureEffect, GestureStateId, Offset,
    OverlayAction, Point, PointerEvent, PointerKind,
};
