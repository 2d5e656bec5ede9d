//! Renderer contract
//!
//! The simulation never draws. It issues two kinds of commands: paint a
//! lattice cell, and place the body at a pixel position. Anything that
//! implements `Renderer` can consume them (a canvas, a terminal, a test).

pub mod text;

pub use text::TextRenderer;

use glam::Vec2;

use crate::sim::grid::{Cell, Grid};

/// Cell and body colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Wall,
    /// Interior cell not carved (yet)
    Unvisited,
    Path,
    Entrance,
    Exit,
    Body,
}

impl Color {
    /// RGBA in 0-1 range
    pub fn rgba(&self) -> [f32; 4] {
        match self {
            Color::Wall => [0.12, 0.12, 0.16, 1.0],
            Color::Unvisited => [0.22, 0.22, 0.28, 1.0],
            Color::Path => [0.92, 0.92, 0.88, 1.0],
            Color::Entrance => [0.3, 0.8, 0.4, 1.0],
            Color::Exit => [0.95, 0.45, 0.2, 1.0],
            Color::Body => [0.2, 0.45, 1.0, 1.0],
        }
    }

    /// Color a cell should currently be painted with
    pub fn for_cell(cell: &Cell) -> Self {
        if cell.is_entrance {
            Color::Entrance
        } else if cell.is_exit {
            Color::Exit
        } else if cell.is_path {
            Color::Path
        } else if cell.is_wall {
            Color::Wall
        } else {
            Color::Unvisited
        }
    }
}

pub trait Renderer {
    /// Paint lattice cell `(x, y)`; scaling by the step size is the renderer's job
    fn paint_cell(&mut self, x: usize, y: usize, color: Color);

    /// Place the body's top-left corner at pixel coordinates
    fn set_body_position(&mut self, pos: Vec2);
}

/// Discards every command
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn paint_cell(&mut self, _x: usize, _y: usize, _color: Color) {}

    fn set_body_position(&mut self, _pos: Vec2) {}
}

/// A recorded renderer command
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    PaintCell { x: usize, y: usize, color: Color },
    BodyPosition(Vec2),
}

/// Keeps every command in order, for forwarding or inspection
#[derive(Debug, Default, Clone)]
pub struct CommandRecorder {
    pub commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn cell_paints(&self) -> impl Iterator<Item = (usize, usize, Color)> + '_ {
        self.commands.iter().filter_map(|c| match *c {
            DrawCommand::PaintCell { x, y, color } => Some((x, y, color)),
            DrawCommand::BodyPosition(_) => None,
        })
    }

    pub fn last_body_position(&self) -> Option<Vec2> {
        self.commands.iter().rev().find_map(|c| match *c {
            DrawCommand::BodyPosition(pos) => Some(pos),
            DrawCommand::PaintCell { .. } => None,
        })
    }

    /// Hand the recorded commands over, leaving the recorder empty
    pub fn drain(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Renderer for CommandRecorder {
    fn paint_cell(&mut self, x: usize, y: usize, color: Color) {
        self.commands.push(DrawCommand::PaintCell { x, y, color });
    }

    fn set_body_position(&mut self, pos: Vec2) {
        self.commands.push(DrawCommand::BodyPosition(pos));
    }
}

/// Paint every cell of `grid` with its current color
pub fn paint_grid(grid: &Grid, renderer: &mut dyn Renderer) {
    for cell in grid.cells() {
        renderer.paint_cell(cell.x, cell.y, Color::for_cell(cell));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_for_cell() {
        let mut grid = Grid::new(5, 5);
        assert_eq!(Color::for_cell(grid.cell(0, 0).unwrap()), Color::Wall);
        assert_eq!(Color::for_cell(grid.cell(2, 2).unwrap()), Color::Unvisited);
        assert_eq!(Color::for_cell(grid.cell(1, 0).unwrap()), Color::Entrance);
        assert_eq!(Color::for_cell(grid.cell(3, 4).unwrap()), Color::Exit);

        grid.carve(crate::sim::grid::CellPos::new(2, 2));
        assert_eq!(Color::for_cell(grid.cell(2, 2).unwrap()), Color::Path);
    }

    #[test]
    fn test_recorder_keeps_order() {
        let mut recorder = CommandRecorder::default();
        recorder.paint_cell(1, 2, Color::Path);
        recorder.set_body_position(Vec2::new(3.0, 4.0));
        recorder.paint_cell(2, 2, Color::Exit);

        assert_eq!(recorder.cell_paints().count(), 2);
        assert_eq!(recorder.last_body_position(), Some(Vec2::new(3.0, 4.0)));
        assert_eq!(recorder.drain().len(), 3);
        assert!(recorder.commands.is_empty());
    }

    #[test]
    fn test_paint_grid_covers_every_cell() {
        let grid = Grid::new(7, 5);
        let mut recorder = CommandRecorder::default();
        paint_grid(&grid, &mut recorder);
        assert_eq!(recorder.cell_paints().count(), 35);
    }
}
