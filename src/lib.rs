//! Maze Chase - simulation core for a maze-chase arcade game
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (maze, collisions, agents, session state)
//! - `renderer`: Draw-primitive collaborator and entity colours
//! - `platform`: Directional input and clock abstraction
//! - `hud`: Score and outcome display collaborator
//! - `settings`: Canvas-derived sizing and player-tunable parameters
//! - `game`: Per-frame host callback tying the pieces together

pub mod game;
pub mod hud;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Maze dimensions in cells
    pub const MAZE_ROWS: u32 = 21;
    pub const MAZE_COLUMNS: u32 = 19;
    /// Largest cell edge in world units
    pub const MAX_CELL_SIZE: u32 = 40;

    /// Extra leeway subtracted from the wall inflation distance
    pub const WALL_MARGIN: f32 = 2.0;

    /// Player spawn cell (column, row)
    pub const PLAYER_START_CELL: (u32, u32) = (9, 11);
    /// Where eaten pursuers come back (column, row)
    pub const PURSUER_RESPAWN_CELL: (u32, u32) = (9, 9);

    /// Pickup sizes
    pub const PELLET_RADIUS: f32 = 2.0;
    pub const POWER_PELLET_RADIUS: f32 = 8.0;

    /// Score awards
    pub const PELLET_SCORE: u64 = 100;
    pub const POWER_PELLET_SCORE: u64 = 200;
    pub const PURSUER_SCORE: u64 = 300;

    /// Each pursuer waits `index * ACTIVATION_DELAY_MS` before moving
    pub const ACTIVATION_DELAY_MS: f64 = 5000.0;
    /// How long a power pellet keeps pursuers vulnerable
    pub const VULNERABLE_DURATION_MS: f64 = 6000.0;

    /// Pursuer count bounds
    pub const MIN_PURSUERS: u8 = 2;
    pub const MAX_PURSUERS: u8 = 6;
    pub const DEFAULT_PURSUERS: u8 = 3;
    pub const DEFAULT_PURSUER_SPEED: u32 = 3;

    /// Canvas height used when the host does not report one
    pub const DEFAULT_CANVAS_HEIGHT: u32 = 840;
}

/// Centre of the grid cell at (column, row) for a given cell size
#[inline]
pub fn cell_center(column: u32, row: u32, cell_size: f32) -> Vec2 {
    Vec2::new(
        column as f32 * cell_size + cell_size / 2.0,
        row as f32 * cell_size + cell_size / 2.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_center() {
        assert_eq!(cell_center(0, 0, 40.0), Vec2::new(20.0, 20.0));
        assert_eq!(cell_center(9, 11, 40.0), Vec2::new(380.0, 460.0));
    }
}
