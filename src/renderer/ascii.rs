//! Text rasterizer for terminals and logs
//!
//! Snaps every primitive to the maze cell under its centre:
//!
//! | glyph | drawn as                    |
//! |-------|-----------------------------|
//! | `#`   | wall                        |
//! | `.`   | pellet                      |
//! | `o`   | power pellet                |
//! | `G`   | chasing pursuer             |
//! | `g`   | vulnerable pursuer          |
//! | `C`   | player                      |

use glam::Vec2;

use super::{Color, Renderer};
use crate::consts::PELLET_RADIUS;

/// Character grid, one glyph per cell
#[derive(Debug, Clone)]
pub struct AsciiRenderer {
    cell_size: f32,
    columns: usize,
    cells: Vec<Vec<char>>,
}

impl AsciiRenderer {
    pub fn new(columns: usize, rows: usize, cell_size: f32) -> Self {
        Self {
            cell_size,
            columns,
            cells: vec![vec![' '; columns]; rows],
        }
    }

    fn plot(&mut self, pos: Vec2, glyph: char) {
        if pos.x < 0.0 || pos.y < 0.0 {
            return;
        }
        let column = (pos.x / self.cell_size) as usize;
        let row = (pos.y / self.cell_size) as usize;
        if let Some(cell) = self.cells.get_mut(row).and_then(|r| r.get_mut(column)) {
            *cell = glyph;
        }
    }

    /// The grid as newline-separated rows
    pub fn render(&self) -> String {
        self.cells
            .iter()
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Renderer for AsciiRenderer {
    fn clear(&mut self) {
        for row in &mut self.cells {
            row.iter_mut().for_each(|c| *c = ' ');
        }
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let glyph = match color {
            Color::Gold => 'C',
            Color::Red => 'G',
            Color::Blue => 'g',
            Color::White if radius > PELLET_RADIUS => 'o',
            Color::White => '.',
        };
        self.plot(center, glyph);
    }

    fn draw_rect(&mut self, origin: Vec2, size: Vec2, _color: Color) {
        let columns = (size.x / self.cell_size).round().max(1.0) as usize;
        let rows = (size.y / self.cell_size).round().max(1.0) as usize;
        for dy in 0..rows {
            for dx in 0..columns.min(self.columns) {
                let pos = origin
                    + Vec2::new(
                        (dx as f32 + 0.5) * self.cell_size,
                        (dy as f32 + 0.5) * self.cell_size,
                    );
                self.plot(pos, '#');
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::draw_session;
    use crate::settings::Settings;
    use crate::sim::grid::DEFAULT_MAZE;
    use crate::sim::session::Session;

    #[test]
    fn test_fresh_game_matches_maze_text() {
        let mut session = Session::with_seed(Settings::default(), 5);
        session.start();
        let mut ascii = AsciiRenderer::new(19, 21, session.cell_size());
        draw_session(&session, &mut ascii);

        let frame = ascii.render();
        let lines: Vec<&str> = frame.lines().collect();
        assert_eq!(lines.len(), 21);
        // Walls and pellets line up with the source map
        assert_eq!(lines[0], "###################");
        assert_eq!(lines[1], DEFAULT_MAZE[1].replace('-', "#"));
        // Pursuers stacked on the spawn, player on its start cell
        assert_eq!(lines[9].chars().nth(9), Some('G'));
        assert_eq!(lines[11].chars().nth(9), Some('C'));
    }

    #[test]
    fn test_off_grid_is_ignored() {
        let mut ascii = AsciiRenderer::new(2, 2, 10.0);
        ascii.draw_circle(Vec2::new(-5.0, 5.0), 3.0, Color::Gold);
        ascii.draw_circle(Vec2::new(50.0, 5.0), 3.0, Color::Gold);
        assert_eq!(ascii.render(), "  \n  ");
        ascii.draw_circle(Vec2::new(15.0, 5.0), 8.0, Color::White);
        assert_eq!(ascii.render(), " o\n  ");
        ascii.clear();
        assert_eq!(ascii.render(), "  \n  ");
    }
}
