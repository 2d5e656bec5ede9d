//! Maze simulation
//!
//! Everything here is renderer- and platform-agnostic:
//! - Seeded RNG only, so a seed reproduces a maze
//! - The grid is written by the carver alone, read by the body
//! - Drawing happens through the `Renderer` passed into each call

pub mod body;
pub mod carve;
pub mod collision;
pub mod grid;
pub mod neighbors;
pub mod session;

pub use body::{BodyPhysics, BodyState, BodyStep};
pub use carve::{Branch, GenerationStats, MazeGenerator, fork_path};
pub use collision::{BodyGeometry, CornerResolution, Corners, Side, resolve_corners};
pub use grid::{Cell, CellPos, Grid};
pub use neighbors::{
    Turn, classify_direction, front_left_of, front_of, front_right_of, pick_subset,
    valid_directions,
};
pub use session::{MazeSession, SessionEvent, SessionPhase};
