//! Corner collision resolution
//!
//! The body is an axis-aligned square. Each of its four corners maps to a
//! lattice cell; a corner is "in" when that cell exists and is carved. A
//! tentative position is clipped in three passes:
//!
//! 1. Clamp to the maze rectangle.
//! 2. If exactly one corner is out, push back along the axis that
//!    penetrates least, so a grazing body slides along the wall.
//! 3. For each side (left, right, top, bottom) whose two corners are out,
//!    snap flush to that side's boundary. These run after step 2, in that
//!    order, each on the position left by the previous one; a side pair is
//!    authoritative over a corner nudge.
//!
//! Any axis that was snapped has its velocity cancelled by the caller.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::{CellPos, Grid};
use crate::{far_edge_to_cell, px_to_cell};

/// Pixel dimensions shared by the body and the maze
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyGeometry {
    /// Pixels per cell
    pub step_size: f32,
    /// Side of the body's bounding square
    pub diameter: f32,
    /// Maze extent in pixels
    pub maze_px: Vec2,
}

impl BodyGeometry {
    pub fn new(step_size: f32, diameter: f32, grid: &Grid) -> Self {
        Self {
            step_size,
            diameter,
            maze_px: Vec2::new(
                grid.width() as f32 * step_size,
                grid.height() as f32 * step_size,
            ),
        }
    }

    /// Largest top-left position that keeps the body inside the maze
    pub fn max_pos(&self) -> Vec2 {
        self.maze_px - Vec2::splat(self.diameter)
    }

    /// Top-left position that centers the body in a cell
    pub fn centered_in(&self, cell: CellPos) -> Vec2 {
        let inset = (self.step_size - self.diameter) / 2.0;
        crate::cell_to_px(cell.x, cell.y, self.step_size) + Vec2::splat(inset)
    }
}

/// Columns and rows covered by the body's corners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellSpan {
    left: i32,
    right: i32,
    top: i32,
    bottom: i32,
}

impl CellSpan {
    fn of(pos: Vec2, geometry: &BodyGeometry) -> Self {
        let s = geometry.step_size;
        let d = geometry.diameter;
        Self {
            left: px_to_cell(pos.x, s),
            right: far_edge_to_cell(pos.x + d, s),
            top: px_to_cell(pos.y, s),
            bottom: far_edge_to_cell(pos.y + d, s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

/// Whether each corner sits in a carved cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corners {
    pub top_left: bool,
    pub top_right: bool,
    pub bottom_left: bool,
    pub bottom_right: bool,
}

impl Corners {
    pub fn probe(grid: &Grid, geometry: &BodyGeometry, pos: Vec2) -> Self {
        let span = CellSpan::of(pos, geometry);
        Self {
            top_left: grid.is_path_at(CellPos::new(span.left, span.top)),
            top_right: grid.is_path_at(CellPos::new(span.right, span.top)),
            bottom_left: grid.is_path_at(CellPos::new(span.left, span.bottom)),
            bottom_right: grid.is_path_at(CellPos::new(span.right, span.bottom)),
        }
    }

    pub fn all_in(&self) -> bool {
        self.top_left && self.top_right && self.bottom_left && self.bottom_right
    }

    /// Both corners on `side` are out
    pub fn side_out(&self, side: Side) -> bool {
        match side {
            Side::Left => !self.top_left && !self.bottom_left,
            Side::Right => !self.top_right && !self.bottom_right,
            Side::Top => !self.top_left && !self.top_right,
            Side::Bottom => !self.bottom_left && !self.bottom_right,
        }
    }

    pub fn out_count(&self) -> usize {
        [
            self.top_left,
            self.top_right,
            self.bottom_left,
            self.bottom_right,
        ]
        .iter()
        .filter(|inside| !**inside)
        .count()
    }
}

/// Clipped position and which velocity axes the clip cancelled
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerResolution {
    pub pos: Vec2,
    pub stop_x: bool,
    pub stop_y: bool,
}

impl CornerResolution {
    fn snap_x(&mut self, x: f32) {
        self.pos.x = x;
        self.stop_x = true;
    }

    fn snap_y(&mut self, y: f32) {
        self.pos.y = y;
        self.stop_y = true;
    }
}

/// Clip a tentative body position against the carved cells
pub fn resolve_corners(grid: &Grid, geometry: &BodyGeometry, tentative: Vec2) -> CornerResolution {
    let s = geometry.step_size;
    let d = geometry.diameter;
    let mut out = CornerResolution {
        pos: tentative,
        stop_x: false,
        stop_y: false,
    };

    // 1. Maze bounds
    let max = geometry.max_pos();
    let x = tentative.x.clamp(0.0, max.x);
    if x != tentative.x {
        out.snap_x(x);
    }
    let y = tentative.y.clamp(0.0, max.y);
    if y != tentative.y {
        out.snap_y(y);
    }

    // 2. One corner out: back off along the shallower axis
    let corners = Corners::probe(grid, geometry, out.pos);
    if corners.out_count() == 1 {
        let span = CellSpan::of(out.pos, geometry);
        let p = out.pos;
        let wall_left = (span.left + 1) as f32 * s;
        let wall_right = span.right as f32 * s - d;
        let wall_top = (span.top + 1) as f32 * s;
        let wall_bottom = span.bottom as f32 * s - d;

        if !corners.top_left {
            let depth_x = wall_left - p.x;
            let depth_y = wall_top - p.y;
            if depth_x < depth_y {
                out.snap_x(wall_left);
            } else {
                out.snap_y(wall_top);
            }
        }
        if !corners.bottom_left {
            let depth_x = wall_left - p.x;
            let depth_y = p.y + d - span.bottom as f32 * s;
            if depth_x < depth_y {
                out.snap_x(wall_left);
            } else {
                out.snap_y(wall_bottom);
            }
        }
        if !corners.bottom_right {
            let depth_x = p.x + d - span.right as f32 * s;
            let depth_y = p.y + d - span.bottom as f32 * s;
            if depth_x < depth_y {
                out.snap_x(wall_right);
            } else {
                out.snap_y(wall_bottom);
            }
        }
        if !corners.top_right {
            let depth_x = p.x + d - span.right as f32 * s;
            let depth_y = wall_top - p.y;
            if depth_x < depth_y {
                out.snap_x(wall_right);
            } else {
                out.snap_y(wall_top);
            }
        }
    }

    // 3. Whole side out: sit flush against it. Each check sees the
    // position left by the one before it.
    for side in [Side::Left, Side::Right, Side::Top, Side::Bottom] {
        let corners = Corners::probe(grid, geometry, out.pos);
        if !corners.side_out(side) {
            continue;
        }
        let span = CellSpan::of(out.pos, geometry);
        match side {
            Side::Left => out.snap_x((span.left + 1) as f32 * s),
            Side::Right => out.snap_x(span.right as f32 * s - d),
            Side::Top => out.snap_y((span.top + 1) as f32 * s),
            Side::Bottom => out.snap_y(span.bottom as f32 * s - d),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 7x7 maze: a corridor along row 1 and a spur down column 1
    fn corridor_grid() -> Grid {
        let mut grid = Grid::new(7, 7);
        for pos in [(1, 0), (1, 1), (2, 1), (3, 1), (4, 1), (5, 1), (1, 2), (1, 3)] {
            grid.carve(CellPos::new(pos.0, pos.1));
        }
        grid
    }

    fn geometry(grid: &Grid) -> BodyGeometry {
        BodyGeometry::new(10.0, 6.0, grid)
    }

    #[test]
    fn test_valid_position_is_unchanged() {
        let grid = corridor_grid();
        let geom = geometry(&grid);
        for pos in [Vec2::new(12.0, 12.0), Vec2::new(27.0, 13.0), Vec2::new(12.0, 31.0)] {
            let once = resolve_corners(&grid, &geom, pos);
            assert_eq!(once.pos, pos);
            assert!(!once.stop_x && !once.stop_y);

            let twice = resolve_corners(&grid, &geom, once.pos);
            assert_eq!(twice, once);
        }
    }

    #[test]
    fn test_head_on_wall_snaps_flush() {
        let grid = corridor_grid();
        let geom = geometry(&grid);
        // Right edge at 62 would enter the border column
        let result = resolve_corners(&grid, &geom, Vec2::new(56.0, 12.0));
        assert_eq!(result.pos, Vec2::new(54.0, 12.0));
        assert!(result.stop_x);
        assert!(!result.stop_y);
    }

    #[test]
    fn test_single_corner_slides_along_shallow_axis() {
        let grid = corridor_grid();
        let geom = geometry(&grid);
        // Bottom-right corner pokes 3px right and 2px down into (2, 2)
        let result = resolve_corners(&grid, &geom, Vec2::new(17.0, 16.0));
        assert_eq!(result.pos, Vec2::new(17.0, 14.0));
        assert!(result.stop_y);
        assert!(!result.stop_x);
        assert!(Corners::probe(&grid, &geom, result.pos).all_in());
    }

    #[test]
    fn test_single_corner_prefers_x_when_shallower() {
        let grid = corridor_grid();
        let geom = geometry(&grid);
        // Bottom-right corner pokes 1px right and 4px down into (2, 2)
        let result = resolve_corners(&grid, &geom, Vec2::new(15.0, 18.0));
        assert_eq!(result.pos, Vec2::new(14.0, 18.0));
        assert!(result.stop_x);
        assert!(!result.stop_y);
    }

    #[test]
    fn test_top_pair_out_snaps_down() {
        let grid = corridor_grid();
        let geom = geometry(&grid);
        let result = resolve_corners(&grid, &geom, Vec2::new(28.0, 8.0));
        assert_eq!(result.pos, Vec2::new(28.0, 10.0));
        assert!(result.stop_y);
    }

    #[test]
    fn test_clamp_then_side_pair() {
        let grid = corridor_grid();
        let geom = geometry(&grid);
        let result = resolve_corners(&grid, &geom, Vec2::new(-3.0, 12.0));
        assert_eq!(result.pos, Vec2::new(10.0, 12.0));
        assert!(result.stop_x);
        assert!(Corners::probe(&grid, &geom, result.pos).all_in());
    }

    #[test]
    fn test_absent_cells_count_as_out() {
        let grid = corridor_grid();
        let geom = geometry(&grid);
        // In the entrance, pushing above the grid
        let result = resolve_corners(&grid, &geom, Vec2::new(12.0, -4.0));
        assert_eq!(result.pos, Vec2::new(12.0, 0.0));
        assert!(result.stop_y);
        assert!(Corners::probe(&grid, &geom, result.pos).all_in());
    }

    #[test]
    fn test_centered_in_cell() {
        let grid = Grid::new(5, 5);
        let geom = geometry(&grid);
        assert_eq!(geom.centered_in(CellPos::new(1, 0)), Vec2::new(12.0, 2.0));
        assert_eq!(geom.max_pos(), Vec2::new(44.0, 44.0));
    }
}
