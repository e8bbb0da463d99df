use super::{
    geometry::exceeds,
    timer::TimerToken,
    types::{Direction, Offset, Point, PointerEvent},
};

/// State owned by one press-to-release cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct GestureSession {
    pub(crate) token: TimerToken,
    press_ms: u64,
    press_origin: Point,
    rest_position: Point,
    last_pointer: Point,
    pub(crate) moved_beyond_slop: bool,
    pub(crate) armed_direction: Option<Direction>,
}

impl GestureSession {
    pub(crate) fn begin(token: TimerToken, press: &PointerEvent, rest_position: Point) -> Self {
        Self {
            token,
            press_ms: press.t_ms,
            press_origin: press.point(),
            rest_position,
            last_pointer: press.point(),
            moved_beyond_slop: false,
            armed_direction: None,
        }
    }

    pub(crate) fn rest_position(&self) -> Point {
        self.rest_position
    }

    pub(crate) fn displacement_to(&self, pointer: Point) -> Offset {
        pointer.offset_from(self.press_origin)
    }

    /// Records a move and returns the press-relative displacement. The slop
    /// flag latches for the rest of the session.
    pub(crate) fn observe(&mut self, pointer: Point, move_slop: f32) -> Offset {
        let displacement = self.displacement_to(pointer);
        if exceeds(displacement, move_slop) {
            self.moved_beyond_slop = true;
        }
        displacement
    }

    /// Delta since the previous pointer sample; advances the sample.
    pub(crate) fn step_to(&mut self, pointer: Point) -> Offset {
        let delta = pointer.offset_from(self.last_pointer);
        self.last_pointer = pointer;
        delta
    }

    pub(crate) fn elapsed_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.press_ms)
    }
}
