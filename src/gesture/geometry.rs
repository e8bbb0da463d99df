use super::types::{Offset, Point};

/// Limits `displacement` to `max_distance` while keeping its direction.
pub fn clamp_offset(displacement: Offset, max_distance: f32) -> Offset {
    let distance = displacement.length();
    let ratio = if distance <= max_distance || distance == 0.0 {
        1.0
    } else {
        max_distance / distance
    };
    displacement.scale(ratio)
}

pub fn clamped_ball_position(rest: Point, displacement: Offset, max_distance: f32) -> Point {
    rest.offset_by(clamp_offset(displacement, max_distance))
}

pub(crate) fn exceeds(displacement: Offset, threshold: f32) -> bool {
    displacement.length() > threshold
}
