//! Tilt-driven body
//!
//! Each tilt event accelerates the body along both axes, moves it by its
//! velocity and clips the result against the carved cells. Velocity is in
//! pixels per event, so the body's speed depends on how often the input
//! source fires, not on wall-clock time alone.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{BodyGeometry, CornerResolution, resolve_corners};
use super::grid::Grid;
use crate::consts::{MAX_SPEED_FRACTION, MAX_TILT, STALE_INPUT_MS};
use crate::platform::TiltInput;

/// Position (top-left of the bounding square), velocity and input clock
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyState {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Timestamp of the previous tilt event; `None` until the first one
    pub last_update_ms: Option<f64>,
}

impl BodyState {
    /// At rest at `pos`, no input seen yet
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            last_update_ms: None,
        }
    }

    /// State after one tilt event at `timestamp_ms`
    ///
    /// The first event only starts the clock. After that, an axis whose tilt
    /// is zero, or any event more than `STALE_INPUT_MS` after the previous
    /// one, restarts that axis from rest.
    pub fn advance(
        &self,
        timestamp_ms: f64,
        tilt: TiltInput,
        grid: &Grid,
        geometry: &BodyGeometry,
        gravity: f32,
    ) -> BodyState {
        let Some(last) = self.last_update_ms else {
            return BodyState {
                last_update_ms: Some(timestamp_ms),
                ..*self
            };
        };

        let elapsed = timestamp_ms - last;
        let cap = max_speed(geometry);
        let vel = Vec2::new(
            integrate_axis(self.vel.x, tilt.x, elapsed, gravity, cap),
            integrate_axis(self.vel.y, tilt.y, elapsed, gravity, cap),
        );

        let CornerResolution {
            pos,
            stop_x,
            stop_y,
        } = resolve_corners(grid, geometry, self.pos + vel);

        BodyState {
            pos,
            vel: Vec2::new(
                if stop_x { 0.0 } else { vel.x },
                if stop_y { 0.0 } else { vel.y },
            ),
            last_update_ms: Some(timestamp_ms),
        }
    }
}

/// Largest per-event displacement on one axis. Kept below the corridor
/// slack and below the body's own size, so after any event the body still
/// overlaps the cells it covered before and at most one new row or column.
pub fn max_speed(geometry: &BodyGeometry) -> f32 {
    let slack = geometry.step_size - geometry.diameter;
    slack.min(geometry.diameter) * MAX_SPEED_FRACTION
}

fn integrate_axis(vel: f32, tilt: f32, elapsed_ms: f64, gravity: f32, cap: f32) -> f32 {
    // A clock running backwards is treated like a stale gap
    if tilt == 0.0 || !(0.0..=STALE_INPUT_MS).contains(&elapsed_ms) {
        return 0.0;
    }
    let accel = gravity / 1000.0 * (tilt / MAX_TILT);
    (vel + elapsed_ms as f32 * accel).clamp(-cap, cap)
}

/// Outcome of a tilt event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyStep {
    /// The body already arrived; input is no longer accepted
    Ignored,
    Moved(Vec2),
    /// The body reached the exit on this event
    Arrived(Vec2),
}

/// Stateful wrapper around `BodyState` that tracks arrival
#[derive(Debug, Clone)]
pub struct BodyPhysics {
    state: BodyState,
    geometry: BodyGeometry,
    gravity: f32,
    /// Pixel origin of the exit cell
    exit_px: Vec2,
    arrived: bool,
}

impl BodyPhysics {
    /// Body centered in the entrance of `grid`
    pub fn new(grid: &Grid, geometry: BodyGeometry, gravity: f32) -> Self {
        let exit = grid.exit();
        Self {
            state: BodyState::at(geometry.centered_in(grid.entrance())),
            geometry,
            gravity,
            exit_px: crate::cell_to_px(exit.x, exit.y, geometry.step_size),
            arrived: false,
        }
    }

    pub fn state(&self) -> &BodyState {
        &self.state
    }

    pub fn position(&self) -> Vec2 {
        self.state.pos
    }

    pub fn geometry(&self) -> &BodyGeometry {
        &self.geometry
    }

    pub fn has_arrived(&self) -> bool {
        self.arrived
    }

    /// Move the body to `pos` at rest and restart the input clock
    pub fn place(&mut self, pos: Vec2) {
        self.state = BodyState::at(pos);
        self.arrived = false;
    }

    pub fn apply_tilt(&mut self, tilt: TiltInput, timestamp_ms: f64, grid: &Grid) -> BodyStep {
        if self.arrived {
            return BodyStep::Ignored;
        }

        self.state = self
            .state
            .advance(timestamp_ms, tilt, grid, &self.geometry, self.gravity);

        let pos = self.state.pos;
        if pos.x >= self.exit_px.x && pos.y >= self.exit_px.y {
            self.arrived = true;
            self.state.vel = Vec2::ZERO;
            return BodyStep::Arrived(pos);
        }
        BodyStep::Moved(pos)
    }
}
