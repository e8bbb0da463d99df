use super::{
    geometry::exceeds,
    types::{Direction, Offset},
};

/// Classifies the unclamped press-relative displacement by its dominant axis.
/// Displacement inside the slop arms nothing.
pub fn classify_direction(displacement: Offset, move_slop: f32) -> Option<Direction> {
    if !exceeds(displacement, move_slop) {
        return None;
    }

    let Offset { dx, dy } = displacement;
    if dx.abs() >= dy.abs() {
        if dx >= 0.0 {
            Some(Direction::Right)
        } else {
            Some(Direction::Left)
        }
    } else if dy >= 0.0 {
        Some(Direction::Down)
    } else {
        Some(Direction::Up)
    }
}
