//! Geometric queries over the lattice
//!
//! Everything here is pure: positions in, positions (or `None` for cells
//! outside the grid) out. Headings are read from the offset between two
//! cells, in screen coordinates (y grows downward), so "left" of a heading
//! is the direction a viewer facing that way on screen would call left.

use rand::Rng;
use rand::seq::SliceRandom;

use super::grid::{CellPos, Grid};

/// Up, right, down, left
const ORTHOGONAL: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Where a candidate lies relative to the current heading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Front,
    Left,
    Right,
}

/// Unit heading from `prev` to `current`
#[inline]
fn heading(prev: CellPos, current: CellPos) -> (i32, i32) {
    let (dx, dy) = current.delta_from(prev);
    (dx.signum(), dy.signum())
}

/// Unit vector 90° to the left of an axis-aligned heading
#[inline]
fn left_of(h: (i32, i32)) -> (i32, i32) {
    (h.1, -h.0)
}

#[inline]
fn right_of(h: (i32, i32)) -> (i32, i32) {
    (-h.1, h.0)
}

#[inline]
fn within(grid: &Grid, pos: CellPos) -> Option<CellPos> {
    grid.in_bounds(pos).then_some(pos)
}

/// `current` reflected away from `prev`: one more step straight ahead
pub fn front_of(grid: &Grid, prev: CellPos, current: CellPos) -> Option<CellPos> {
    let (dx, dy) = current.delta_from(prev);
    within(grid, current.offset(dx, dy))
}

/// The straight-ahead cell nudged one cell to the left of the heading.
/// Horizontal headings perturb `y`, vertical headings perturb `x`; a
/// diagonal heading has no defined side and yields `None`.
pub fn front_left_of(grid: &Grid, prev: CellPos, current: CellPos) -> Option<CellPos> {
    front_side_of(grid, prev, current, Turn::Left)
}

pub fn front_right_of(grid: &Grid, prev: CellPos, current: CellPos) -> Option<CellPos> {
    front_side_of(grid, prev, current, Turn::Right)
}

fn front_side_of(grid: &Grid, prev: CellPos, current: CellPos, side: Turn) -> Option<CellPos> {
    let (dx, dy) = current.delta_from(prev);
    if (dx == 0) == (dy == 0) {
        return None;
    }
    let h = (dx.signum(), dy.signum());
    let (nx, ny) = match side {
        Turn::Left => left_of(h),
        Turn::Right => right_of(h),
        Turn::Front => (0, 0),
    };
    within(grid, current.offset(dx + nx, dy + ny))
}

/// Classify `c` relative to the heading `a -> b`, pivoting on `b`.
/// Returns `None` when `c` is not straight ahead, left or right of `b`
/// (behind, diagonal, or `b` itself).
pub fn classify_direction(a: CellPos, b: CellPos, c: CellPos) -> Option<Turn> {
    let h = heading(a, b);
    let to_c = heading(b, c);
    if h == (0, 0) || to_c == (0, 0) || (h.0 != 0 && h.1 != 0) {
        return None;
    }
    // Only orthogonal offsets from the pivot qualify
    let (cx, cy) = c.delta_from(b);
    if cx != 0 && cy != 0 {
        return None;
    }
    if to_c == h {
        Some(Turn::Front)
    } else if to_c == left_of(h) {
        Some(Turn::Left)
    } else if to_c == right_of(h) {
        Some(Turn::Right)
    } else {
        None
    }
}

/// Orthogonal neighbors of `(x, y)` that may be carved next.
///
/// The exit short-circuits the scan: when it is adjacent and uncarved it is
/// the only direction returned. Any other neighbor qualifies when it is in
/// bounds, not wall, not path, and the junction one more stride beyond it
/// exists and is not path. That last check is what keeps the carved
/// corridors free of loops.
pub fn valid_directions(grid: &Grid, x: i32, y: i32) -> Vec<CellPos> {
    let origin = CellPos::new(x, y);
    let mut out = Vec::with_capacity(ORTHOGONAL.len());

    for (dx, dy) in ORTHOGONAL {
        let next = origin.offset(dx, dy);
        let Some(cell) = grid.cell_at(next) else {
            continue;
        };

        if cell.is_exit {
            if !cell.is_path {
                return vec![next];
            }
            continue;
        }

        if cell.is_wall || cell.is_path {
            continue;
        }

        match front_of(grid, origin, next) {
            Some(beyond) if !grid.is_path_at(beyond) => out.push(next),
            _ => {}
        }
    }

    out
}

/// Shuffle `candidates` and keep the first `branch_factor + 1`
pub fn pick_subset<T, R>(mut candidates: Vec<T>, branch_factor: usize, rng: &mut R) -> Vec<T>
where
    R: Rng + ?Sized,
{
    candidates.shuffle(rng);
    candidates.truncate(branch_factor + 1);
    candidates
}
