//! Glue between the platform and the gesture interpreter: a single ordered
//! input queue, the long-press deadline, and the collaborator seams effects are
//! delivered through.

mod controller;
mod counters;
mod host;
mod recording;


pub use controller::{OverlayController, OverlayError, INPUT_QUEUE_CAPACITY};
pub use counters::GestureCounters;
pub use host::{
    deliver, ActionSink, BallRenderer, Collaborators, Haptics, OverlayHost, OverlayPositioner,
};
pub use recording::{HostCall, RecordingHost};
