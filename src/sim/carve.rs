//! Branching corridor carver
//!
//! Carving advances in two-cell strides: a connector cell, then the junction
//! beyond it. Each junction offers up to three directions; `fork_path`
//! decides which of them become new branches. Branches are queued FIFO and
//! run one at a time, so a caller can pace the reveal by calling `step` on a
//! timer, or carve everything at once with `run`.

use std::collections::VecDeque;

use rand::Rng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::grid::{CellPos, Grid};
use super::neighbors::{
    Turn, classify_direction, front_left_of, front_of, front_right_of, pick_subset,
    valid_directions,
};
use crate::renderer::{Color, Renderer};

/// A pending branch: carve `current`, then stride on away from `prev`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Branch {
    pub prev: CellPos,
    pub current: CellPos,
}

/// Counters reported when carving completes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenerationStats {
    /// Branches that carved at least one cell
    pub branches_run: u32,
    /// Branches that ended with no valid direction
    pub dead_ends: u32,
    /// Branches dropped because their target was carved while they waited
    pub dropped: u32,
    /// Times carving resumed from an existing junction after the queue drained
    pub reopenings: u32,
    pub cells_carved: u32,
    pub exit_reached: bool,
}

pub struct MazeGenerator<R: Rng = Pcg32> {
    rng: R,
    branch_factor: usize,
    queue: VecDeque<Branch>,
    /// Junctions in the order they were carved
    junctions: Vec<CellPos>,
    /// Junctions before this index have no carvable direction left
    reopen_cursor: usize,
    stats: GenerationStats,
    finished: bool,
}

impl<R: Rng> MazeGenerator<R> {
    /// Prepare carving for `grid`, starting from the cell behind the entrance
    pub fn new(grid: &Grid, branch_factor: usize, rng: R) -> Self {
        let entrance = grid.entrance();
        let mut queue = VecDeque::new();
        queue.push_back(Branch {
            prev: entrance.offset(0, -1),
            current: entrance,
        });

        Self {
            rng,
            branch_factor,
            queue,
            junctions: Vec::new(),
            reopen_cursor: 0,
            stats: GenerationStats::default(),
            finished: false,
        }
    }

    pub fn stats(&self) -> GenerationStats {
        self.stats
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Run one queued branch. Returns false once carving is complete.
    pub fn step(&mut self, grid: &mut Grid, renderer: &mut dyn Renderer) -> bool {
        if self.finished {
            return false;
        }
        if self.queue.is_empty() && !self.reopen(grid) {
            self.finish(grid);
            return false;
        }
        if let Some(branch) = self.queue.pop_front() {
            self.run_branch(branch, grid, renderer);
        }
        true
    }

    /// Carve until every branch has ended
    pub fn run(&mut self, grid: &mut Grid, renderer: &mut dyn Renderer) -> GenerationStats {
        while self.step(grid, renderer) {}
        self.stats
    }

    fn run_branch(&mut self, branch: Branch, grid: &mut Grid, renderer: &mut dyn Renderer) {
        let Branch { prev, current } = branch;

        let Some(cell) = grid.cell_at(current) else {
            self.stats.dropped += 1;
            return;
        };
        let is_exit = cell.is_exit;
        let fwd = if is_exit {
            None
        } else {
            front_of(grid, prev, current)
        };

        // Another branch may have claimed this corridor since we were queued
        let stale = cell.is_path || (!is_exit && fwd.is_none_or(|f| grid.is_path_at(f)));
        if stale {
            log::trace!("Dropping stale branch at ({}, {})", current.x, current.y);
            self.stats.dropped += 1;
            return;
        }

        self.stats.branches_run += 1;
        self.carve(grid, renderer, current);

        if is_exit {
            self.stats.exit_reached = true;
            log::debug!("Exit reached at ({}, {})", current.x, current.y);
            return;
        }

        let Some(fwd) = fwd else {
            return;
        };
        self.carve(grid, renderer, fwd);
        self.junctions.push(fwd);

        let candidates = valid_directions(grid, fwd.x, fwd.y);
        if candidates.is_empty() {
            self.stats.dead_ends += 1;
            return;
        }

        let chosen = fork_path(
            grid,
            current,
            fwd,
            candidates,
            self.branch_factor,
            &mut self.rng,
        );
        for next in chosen {
            self.queue.push_back(Branch {
                prev: fwd,
                current: next,
            });
        }
    }

    fn carve(&mut self, grid: &mut Grid, renderer: &mut dyn Renderer, pos: CellPos) {
        if grid.carve(pos) {
            self.stats.cells_carved += 1;
        }
        if let Some(cell) = grid.cell_at(pos) {
            renderer.paint_cell(cell.x, cell.y, Color::for_cell(cell));
        }
    }

    /// Resume from the earliest junction that can still grow, as long as the
    /// exit has not been carved
    fn reopen(&mut self, grid: &Grid) -> bool {
        if grid.is_path_at(grid.exit()) {
            return false;
        }

        while self.reopen_cursor < self.junctions.len() {
            let junction = self.junctions[self.reopen_cursor];
            let candidates = valid_directions(grid, junction.x, junction.y);
            if candidates.is_empty() {
                self.reopen_cursor += 1;
                continue;
            }

            let pick = self.rng.random_range(0..candidates.len());
            let next = candidates[pick];
            log::debug!(
                "Reopening at junction ({}, {}) toward ({}, {})",
                junction.x,
                junction.y,
                next.x,
                next.y
            );
            self.stats.reopenings += 1;
            self.queue.push_back(Branch {
                prev: junction,
                current: next,
            });
            return true;
        }

        log::warn!("Carving ended without reaching the exit");
        false
    }

    fn finish(&mut self, grid: &Grid) {
        self.finished = true;
        log::info!(
            "Maze {}x{} carved: {} cells, {} branches, {} dead ends, {} dropped, {} reopenings",
            grid.width(),
            grid.height(),
            self.stats.cells_carved,
            self.stats.branches_run,
            self.stats.dead_ends,
            self.stats.dropped,
            self.stats.reopenings
        );
    }
}

/// Choose which of `candidates` (directions out of `current`, reached from
/// `prev`) to carve.
///
/// Geometry decides when it can: with a wall straight ahead, or with the
/// junction beyond the next connector already carved, every candidate is
/// taken. A side whose deep cell (the diagonal ahead, continued one more
/// stride) is already carved is forced, as is the exit. Only when nothing is
/// forced does `branch_factor` limit a random draw from the pool.
pub fn fork_path<R>(
    grid: &Grid,
    prev: CellPos,
    current: CellPos,
    candidates: Vec<CellPos>,
    branch_factor: usize,
    rng: &mut R,
) -> Vec<CellPos>
where
    R: Rng + ?Sized,
{
    let Some(ahead) = front_of(grid, prev, current).filter(|a| !grid.is_wall_at(*a)) else {
        return candidates;
    };
    if front_of(grid, current, ahead).is_some_and(|aa| grid.is_path_at(aa)) {
        return candidates;
    }

    let mut front = None;
    let mut pool = Vec::with_capacity(candidates.len());
    let mut forced = Vec::new();

    for candidate in candidates {
        if grid.cell_at(candidate).is_some_and(|c| c.is_exit) {
            forced.push(candidate);
            continue;
        }

        let diagonal = match classify_direction(prev, current, candidate) {
            Some(Turn::Left) => front_left_of(grid, prev, current),
            Some(Turn::Right) => front_right_of(grid, prev, current),
            Some(Turn::Front) => {
                front = Some(candidate);
                pool.push(candidate);
                continue;
            }
            None => {
                pool.push(candidate);
                continue;
            }
        };

        let deep = diagonal.and_then(|d| front_of(grid, current, d));
        if deep.is_some_and(|d| grid.is_path_at(d)) {
            log::trace!(
                "Forced branch toward ({}, {}) from ({}, {})",
                candidate.x,
                candidate.y,
                current.x,
                current.y
            );
            forced.push(candidate);
        } else {
            pool.push(candidate);
        }
    }

    if forced.is_empty() {
        return pick_subset(pool, branch_factor, rng);
    }

    if let Some(front) = front {
        forced.push(front);
    }
    forced
}
