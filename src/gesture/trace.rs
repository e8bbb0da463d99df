use super::types::{Direction, GestureStateId, Offset};

/// Snapshot of the interpreter after one event.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureTraceSample {
    pub now_ms: u64,
    pub state_id: GestureStateId,
    /// Press sequence number, 0 before the first press.
    pub session: u32,
    pub displacement: Offset,
    pub direction: Option<Direction>,
    pub moved_beyond_slop: bool,
}
