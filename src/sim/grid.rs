//! Maze grid loading
//!
//! A maze is a list of text rows, one character per cell:
//!
//! | char | cell            |
//! |------|-----------------|
//! | `-`  | wall            |
//! | `.`  | pellet          |
//! | `o`  | power pellet    |
//! | `g`  | pursuer spawn   |
//! | ` `  | empty           |
//!
//! Anything else loads as an empty cell.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Wall;
use super::state::{Pickup, PickupKind};
use crate::cell_center;
use crate::consts::{PELLET_RADIUS, PLAYER_START_CELL, POWER_PELLET_RADIUS};

/// The built-in 19 x 21 maze
pub const DEFAULT_MAZE: [&str; 21] = [
    "-------------------",
    "-........-........-",
    "-o--.---.-.---.--o-",
    "-.................-",
    "-.--.-.-----.-.--.-",
    "-....-...-...-....-",
    "----.--- - ---.----",
    "----.-       -.----",
    "----.- ----- -.----",
    "----.-   g   -.----",
    "----.- ----- -.----",
    "-....         ....-",
    "-.--.--- - ---.--.-",
    "-........-........-",
    "-.--.---.-.---.--.-",
    "-.................-",
    "--.-.-.-----.-.-.--",
    "-....-...-...-....-",
    "-o------.-.------o-",
    "-........-........-",
    "-------------------",
];

/// One maze cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    Wall,
    Empty,
    Pellet,
    PowerPellet,
    PursuerSpawn,
}

impl Token {
    /// Map a maze character to its token; unknown symbols are empty
    pub fn from_char(c: char) -> Self {
        match c {
            '-' => Token::Wall,
            '.' => Token::Pellet,
            'o' => Token::PowerPellet,
            'g' => Token::PursuerSpawn,
            ' ' => Token::Empty,
            other => {
                log::debug!("Unknown maze token {:?} treated as empty", other);
                Token::Empty
            }
        }
    }
}

/// Parsed maze tokens, row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maze {
    rows: Vec<Vec<Token>>,
}

impl Default for Maze {
    fn default() -> Self {
        Self::parse(&DEFAULT_MAZE)
    }
}

impl Maze {
    /// Parse a maze from text rows
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Self {
        let rows = rows
            .iter()
            .map(|row| row.as_ref().chars().map(Token::from_char).collect())
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row
    pub fn columns(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Token at (column, row); outside the maze reads as empty
    pub fn token(&self, column: usize, row: usize) -> Token {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .copied()
            .unwrap_or(Token::Empty)
    }

    /// Iterate over `(column, row, token)` for every cell
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, Token)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, tokens)| {
            tokens
                .iter()
                .enumerate()
                .map(move |(column, token)| (column as u32, row as u32, *token))
        })
    }

    /// Build world geometry for a given cell size and pursuer count
    pub fn load(&self, cell_size: f32, pursuer_count: u8) -> Layout {
        let mut layout = Layout {
            walls: Vec::new(),
            pellets: Vec::new(),
            power_pellets: Vec::new(),
            pursuer_spawns: Vec::new(),
            player_start: cell_center(PLAYER_START_CELL.0, PLAYER_START_CELL.1, cell_size),
        };

        for (column, row, token) in self.cells() {
            let center = cell_center(column, row, cell_size);
            match token {
                Token::Wall => layout.walls.push(Wall::new(
                    Vec2::new(column as f32 * cell_size, row as f32 * cell_size),
                    cell_size,
                )),
                Token::Pellet => layout.pellets.push(Pickup {
                    kind: PickupKind::Pellet,
                    pos: center,
                    radius: PELLET_RADIUS,
                }),
                Token::PowerPellet => layout.power_pellets.push(Pickup {
                    kind: PickupKind::PowerPellet,
                    pos: center,
                    radius: POWER_PELLET_RADIUS,
                }),
                Token::PursuerSpawn => layout
                    .pursuer_spawns
                    .extend(std::iter::repeat_n(center, pursuer_count as usize)),
                Token::Empty => {}
            }
        }

        log::debug!(
            "Loaded maze: {} walls, {} pellets, {} power pellets, {} pursuers",
            layout.walls.len(),
            layout.pellets.len(),
            layout.power_pellets.len(),
            layout.pursuer_spawns.len()
        );
        layout
    }
}

/// World geometry and spawn points produced from a maze
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub walls: Vec<Wall>,
    pub pellets: Vec<Pickup>,
    pub power_pellets: Vec<Pickup>,
    /// One entry per pursuer to spawn
    pub pursuer_spawns: Vec<Vec2>,
    pub player_start: Vec2,
}
