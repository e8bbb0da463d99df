use core::fmt;

use super::types::OverlayAction;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    /// Release earlier than this (without leaving the slop) opens the menu.
    pub click_timeout_ms: u64,
    pub long_press_timeout_ms: u64,
    /// Displacement that turns a press into movement.
    pub move_slop: f32,
    /// Joystick radius: the ball never renders farther than this from rest.
    pub max_distance: f32,
    pub snap_back_duration_ms: u32,
    /// Action for a long-press released without a directional drag.
    pub centered_long_press: Option<OverlayAction>,
}

include!(concat!(env!("OUT_DIR"), "/gesture_config.rs"));

pub fn active_config() -> &'static GestureConfig {
    &GESTURE_CONFIG
}

impl Default for GestureConfig {
    fn default() -> Self {
        *active_config()
    }
}

impl GestureConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.click_timeout_ms == 0 {
            return Err(ConfigError::ZeroClickTimeout);
        }
        if self.long_press_timeout_ms == 0 {
            return Err(ConfigError::ZeroLongPressTimeout);
        }
        if !self.move_slop.is_finite() || self.move_slop < 0.0 {
            return Err(ConfigError::InvalidMoveSlop(self.move_slop));
        }
        if !self.max_distance.is_finite() || self.max_distance <= 0.0 {
            return Err(ConfigError::InvalidMaxDistance(self.max_distance));
        }
        if self.max_distance <= self.move_slop {
            return Err(ConfigError::MaxDistanceWithinSlop {
                move_slop: self.move_slop,
                max_distance: self.max_distance,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    ZeroClickTimeout,
    ZeroLongPressTimeout,
    InvalidMoveSlop(f32),
    InvalidMaxDistance(f32),
    MaxDistanceWithinSlop { move_slop: f32, max_distance: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroClickTimeout => write!(f, "click_timeout_ms must be > 0"),
            Self::ZeroLongPressTimeout => write!(f, "long_press_timeout_ms must be > 0"),
            Self::InvalidMoveSlop(value) => {
                write!(f, "move_slop must be a finite value >= 0, got {value}")
            }
            Self::InvalidMaxDistance(value) => {
                write!(f, "max_distance must be a finite value > 0, got {value}")
            }
            Self::MaxDistanceWithinSlop {
                move_slop,
                max_distance,
            } => write!(
                f,
                "max_distance ({max_distance}) must be > move_slop ({move_slop})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
