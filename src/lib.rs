//! Tilt Maze - a branching maze carver with a rolling body
//!
//! Core modules:
//! - `sim`: Maze lattice, carving, body physics and the session that ties them together
//! - `renderer`: Renderer contract plus text and recording implementations
//! - `platform`: Input translation (keys, device acceleration) into tilt vectors
//! - `settings`: Construction-time configuration and validation

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Difficulty, MazeSettings, SettingsError};

use glam::Vec2;

/// Simulation constants
pub mod consts {
    /// Default pseudo-gravity (scaled by 1/1000 per millisecond)
    pub const GRAVITY: f32 = 9.81;
    /// Gap between input events after which velocity restarts from rest (ms)
    pub const STALE_INPUT_MS: f64 = 50.0;

    /// Tilt vectors are clamped to this magnitude per axis
    pub const MAX_TILT: f32 = 10.0;
    /// Tilt produced by a single directional key
    pub const KEY_TILT: f32 = 5.0;

    /// Maze defaults
    pub const DEFAULT_WIDTH: usize = 21;
    pub const DEFAULT_HEIGHT: usize = 21;
    pub const MIN_DIMENSION: usize = 5;
    pub const DEFAULT_STEP_SIZE: f32 = 20.0;
    pub const DEFAULT_BODY_DIAMETER: f32 = 12.0;
    /// Pause between carving steps when the reveal is animated
    pub const DEFAULT_REVEAL_DELAY_MS: u64 = 10;

    /// Fraction of the per-event speed limit (corridor slack or body size,
    /// whichever is smaller) a body may actually reach
    pub const MAX_SPEED_FRACTION: f32 = 0.9;
}

/// Pixel coordinate of the top-left corner of a cell
#[inline]
pub fn cell_to_px(x: i32, y: i32, step_size: f32) -> Vec2 {
    Vec2::new(x as f32 * step_size, y as f32 * step_size)
}

/// Slack when mapping pixels to cells, so a position snapped onto a cell
/// boundary maps to the intended side despite rounding
pub const EDGE_EPSILON: f32 = 1e-3;

/// Cell index containing a pixel coordinate (floor division)
#[inline]
pub fn px_to_cell(px: f32, step_size: f32) -> i32 {
    ((px + EDGE_EPSILON) / step_size).floor() as i32
}

/// Cell index for a far (right/bottom) edge; the edge itself is exclusive,
/// so an edge lying exactly on a cell boundary maps to the cell before it
#[inline]
pub fn far_edge_to_cell(px: f32, step_size: f32) -> i32 {
    ((px - EDGE_EPSILON) / step_size).ceil() as i32 - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_px_to_cell() {
        assert_eq!(px_to_cell(0.0, 20.0), 0);
        assert_eq!(px_to_cell(19.9, 20.0), 0);
        assert_eq!(px_to_cell(20.0, 20.0), 1);
        assert_eq!(px_to_cell(-0.5, 20.0), -1);
    }

    #[test]
    fn test_far_edge_is_exclusive() {
        assert_eq!(far_edge_to_cell(20.0, 20.0), 0);
        assert_eq!(far_edge_to_cell(20.5, 20.0), 1);
        assert_eq!(far_edge_to_cell(39.0, 20.0), 1);
    }

    #[test]
    fn test_cell_to_px() {
        assert_eq!(cell_to_px(3, 2, 10.0), Vec2::new(30.0, 20.0));
    }
}
