//! Terminal renderer
//!
//! One character per lattice cell; the body is drawn over the cell that
//! contains its center.

use glam::Vec2;

use super::{Color, Renderer};

#[derive(Debug, Clone)]
pub struct TextRenderer {
    width: usize,
    height: usize,
    step_size: f32,
    body_diameter: f32,
    cells: Vec<Color>,
    body: Option<Vec2>,
}

impl TextRenderer {
    pub fn new(width: usize, height: usize, step_size: f32, body_diameter: f32) -> Self {
        Self {
            width,
            height,
            step_size,
            body_diameter,
            cells: vec![Color::Unvisited; width * height],
            body: None,
        }
    }

    fn glyph(color: Color) -> char {
        match color {
            Color::Wall => '#',
            Color::Unvisited => '+',
            Color::Path => ' ',
            Color::Entrance => 'S',
            Color::Exit => 'E',
            Color::Body => 'o',
        }
    }

    /// Cell under the body's center, if the body is on the canvas
    fn body_cell(&self) -> Option<(usize, usize)> {
        let center = self.body? + Vec2::splat(self.body_diameter / 2.0);
        let x = (center.x / self.step_size).floor();
        let y = (center.y / self.step_size).floor();
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        (x < self.width && y < self.height).then_some((x, y))
    }

    /// Current canvas, one line per row
    pub fn render(&self) -> String {
        let body = self.body_cell();
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let color = if body == Some((x, y)) {
                    Color::Body
                } else {
                    self.cells[y * self.width + x]
                };
                out.push(Self::glyph(color));
            }
            out.push('\n');
        }
        out
    }
}

impl Renderer for TextRenderer {
    fn paint_cell(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = color;
        }
    }

    fn set_body_position(&mut self, pos: Vec2) {
        self.body = Some(pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::paint_grid;
    use crate::sim::grid::Grid;

    #[test]
    fn test_render_fresh_grid() {
        let grid = Grid::new(5, 5);
        let mut text = TextRenderer::new(5, 5, 10.0, 6.0);
        paint_grid(&grid, &mut text);
        let lines: Vec<_> = text.render().lines().map(str::to_owned).collect();
        assert_eq!(lines[0], "#S###");
        assert_eq!(lines[2], "#+++#");
        assert_eq!(lines[4], "###E#");
    }

    #[test]
    fn test_body_drawn_at_center_cell() {
        let mut text = TextRenderer::new(5, 5, 10.0, 6.0);
        text.paint_cell(1, 1, Color::Path);
        text.set_body_position(Vec2::new(12.0, 12.0));
        let lines: Vec<_> = text.render().lines().map(str::to_owned).collect();
        assert_eq!(lines[1].chars().nth(1), Some('o'));
    }

    #[test]
    fn test_out_of_range_paint_ignored() {
        let mut text = TextRenderer::new(3, 3, 10.0, 6.0);
        text.paint_cell(7, 7, Color::Path);
        text.set_body_position(Vec2::new(-50.0, 0.0));
        assert_eq!(text.render().lines().count(), 3);
    }
}
