//! Tilt input sources
//!
//! Two producers feed the same vector: four directional keys, each a fixed
//! half-strength tilt, and device acceleration with the X axis inverted.

use serde::{Deserialize, Serialize};

use crate::consts::{KEY_TILT, MAX_TILT};

/// Tilt intensity per axis in `[-10, 10]`; the sign is the direction
/// (positive x is right, positive y is down)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TiltInput {
    pub x: f32,
    pub y: f32,
}

impl TiltInput {
    pub const LEVEL: TiltInput = TiltInput { x: 0.0, y: 0.0 };

    /// Tilt clamped to the valid range; NaN reads as level
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: clamp_axis(x),
            y: clamp_axis(y),
        }
    }

    /// Tilt from raw device acceleration. Devices report X with the opposite
    /// sign to screen space.
    pub fn from_acceleration(ax: f32, ay: f32) -> Self {
        Self::new(-ax, ay)
    }

    pub fn is_level(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

fn clamp_axis(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(-MAX_TILT, MAX_TILT)
    }
}

/// Discrete directional signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Left,
    Down,
    Right,
}

impl Direction {
    /// Map a key name (DOM `KeyboardEvent.key` style) to a direction
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "w" | "W" => Some(Direction::Up),
            "ArrowLeft" | "a" | "A" => Some(Direction::Left),
            "ArrowDown" | "s" | "S" => Some(Direction::Down),
            "ArrowRight" | "d" | "D" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn tilt(&self) -> TiltInput {
        match self {
            Direction::Up => TiltInput::new(0.0, -KEY_TILT),
            Direction::Left => TiltInput::new(-KEY_TILT, 0.0),
            Direction::Down => TiltInput::new(0.0, KEY_TILT),
            Direction::Right => TiltInput::new(KEY_TILT, 0.0),
        }
    }
}

impl From<Direction> for TiltInput {
    fn from(direction: Direction) -> Self {
        direction.tilt()
    }
}
