//! Maze lattice
//!
//! A fixed-size grid of cells. The border is wall except for the entrance at
//! `(1, 0)` and the exit at `(w - 2, h - 1)`. Cells start uncarved; only the
//! carver flips `is_path`, and never back.

use serde::{Deserialize, Serialize};

/// Signed lattice position (signed so "one step outside" is representable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPos {
    pub x: i32,
    pub y: i32,
}

impl CellPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset from `other` to `self`
    #[inline]
    pub fn delta_from(self, other: CellPos) -> (i32, i32) {
        (self.x - other.x, self.y - other.y)
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> CellPos {
        CellPos::new(self.x + dx, self.y + dy)
    }
}

/// One lattice cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
    pub is_wall: bool,
    pub is_entrance: bool,
    pub is_exit: bool,
    pub is_path: bool,
}

impl Cell {
    pub fn pos(&self) -> CellPos {
        CellPos::new(self.x as i32, self.y as i32)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Row-major
    cells: Vec<Cell>,
}

impl Grid {
    /// Allocate a `width x height` lattice. Dimensions are expected to be odd
    /// and at least 5 (see `MazeSettings::validate`).
    pub fn new(width: usize, height: usize) -> Self {
        debug_assert!(width >= 3 && height >= 3);

        let entrance = (1, 0);
        let exit = (width - 2, height - 1);

        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let is_entrance = (x, y) == entrance;
                let is_exit = (x, y) == exit;
                let on_border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
                cells.push(Cell {
                    x,
                    y,
                    is_wall: on_border && !is_entrance && !is_exit,
                    is_entrance,
                    is_exit,
                    is_path: false,
                });
            }
        }

        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, pos: CellPos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Cell at unsigned coordinates
    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        if x < self.width && y < self.height {
            self.cells.get(y * self.width + x)
        } else {
            None
        }
    }

    /// Cell at a signed position; absent outside the grid
    pub fn cell_at(&self, pos: CellPos) -> Option<&Cell> {
        if self.in_bounds(pos) {
            self.cell(pos.x as usize, pos.y as usize)
        } else {
            None
        }
    }

    /// Absent cells are not path
    #[inline]
    pub fn is_path_at(&self, pos: CellPos) -> bool {
        self.cell_at(pos).is_some_and(|c| c.is_path)
    }

    /// Absent cells behave like walls
    #[inline]
    pub fn is_wall_at(&self, pos: CellPos) -> bool {
        self.cell_at(pos).is_none_or(|c| c.is_wall)
    }

    pub fn entrance(&self) -> CellPos {
        CellPos::new(1, 0)
    }

    pub fn exit(&self) -> CellPos {
        CellPos::new(self.width as i32 - 2, self.height as i32 - 1)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn path_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|c| c.is_path)
    }

    pub fn path_count(&self) -> usize {
        self.path_cells().count()
    }

    /// Carved orthogonal neighbors of `pos`
    pub fn path_neighbors(&self, pos: CellPos) -> impl Iterator<Item = CellPos> + '_ {
        [(0, -1), (1, 0), (0, 1), (-1, 0)]
            .into_iter()
            .map(move |(dx, dy)| pos.offset(dx, dy))
            .filter(|n| self.is_path_at(*n))
    }

    /// Mark a cell as carved. Returns false if the cell is absent or was
    /// already path.
    pub(crate) fn carve(&mut self, pos: CellPos) -> bool {
        if !self.in_bounds(pos) {
            return false;
        }
        let idx = pos.y as usize * self.width + pos.x as usize;
        let cell = &mut self.cells[idx];
        let fresh = !cell.is_path;
        cell.is_path = true;
        fresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_border_is_wall_except_entrance_exit() {
        let grid = Grid::new(7, 9);
        for cell in grid.cells() {
            let on_border = cell.x == 0 || cell.y == 0 || cell.x == 6 || cell.y == 8;
            if cell.is_entrance || cell.is_exit {
                assert!(!cell.is_wall);
            } else {
                assert_eq!(cell.is_wall, on_border, "cell ({}, {})", cell.x, cell.y);
            }
            assert!(!cell.is_path);
        }
    }

    #[test]
    fn test_entrance_and_exit_positions() {
        let grid = Grid::new(11, 5);
        assert_eq!(grid.entrance(), CellPos::new(1, 0));
        assert_eq!(grid.exit(), CellPos::new(9, 4));
        assert!(grid.cell(1, 0).unwrap().is_entrance);
        assert!(grid.cell(9, 4).unwrap().is_exit);
        assert_eq!(grid.cells().filter(|c| c.is_entrance).count(), 1);
        assert_eq!(grid.cells().filter(|c| c.is_exit).count(), 1);
    }

    #[test]
    fn test_out_of_bounds_lookups() {
        let grid = Grid::new(5, 5);
        assert!(grid.cell_at(CellPos::new(-1, 0)).is_none());
        assert!(grid.cell_at(CellPos::new(5, 2)).is_none());
        assert!(grid.cell(2, 5).is_none());
        assert!(grid.is_wall_at(CellPos::new(1, -1)));
        assert!(!grid.is_path_at(CellPos::new(1, -1)));
    }

    #[test]
    fn test_carve_is_monotonic() {
        let mut grid = Grid::new(5, 5);
        let pos = CellPos::new(1, 1);
        assert!(grid.carve(pos));
        assert!(!grid.carve(pos));
        assert!(grid.is_path_at(pos));
        assert_eq!(grid.path_count(), 1);
        assert!(!grid.carve(CellPos::new(9, 9)));
    }
}
