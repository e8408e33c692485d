//! Entity types and core simulation state shapes
//!
//! The session (see `session.rs`) owns collections of these; everything here
//! is plain data plus the two capability traits the collision oracle and the
//! renderer work against.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::renderer::Color;

/// One of the four orthogonal movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Order in which walls are probed and candidates are listed
    pub const PROBE_ORDER: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Down,
        Direction::Up,
    ];

    /// Unit vector in world space (y grows downward)
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }

    /// Velocity of the given magnitude along this direction
    pub fn velocity(self, speed: f32) -> Vec2 {
        self.unit() * speed
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Direction a velocity is heading, horizontal component first
    pub fn from_velocity(velocity: Vec2) -> Option<Self> {
        if velocity.x > 0.0 {
            Some(Direction::Right)
        } else if velocity.x < 0.0 {
            Some(Direction::Left)
        } else if velocity.y > 0.0 {
            Some(Direction::Down)
        } else if velocity.y < 0.0 {
            Some(Direction::Up)
        } else {
            None
        }
    }

    fn bit(self) -> u8 {
        match self {
            Direction::Right => 1,
            Direction::Left => 1 << 1,
            Direction::Down => 1 << 2,
            Direction::Up => 1 << 3,
        }
    }
}

/// Small set of directions, iterated in probe order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DirectionSet(u8);

impl DirectionSet {
    pub const EMPTY: Self = Self(0);

    pub fn insert(&mut self, dir: Direction) {
        self.0 |= dir.bit();
    }

    pub fn remove(&mut self, dir: Direction) {
        self.0 &= !dir.bit();
    }

    pub fn contains(self, dir: Direction) -> bool {
        self.0 & dir.bit() != 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Directions in `self` that are not in `other`
    pub fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Directions not in this set
    pub fn complement(self) -> Self {
        Self(!self.0 & 0b1111)
    }

    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::PROBE_ORDER
            .into_iter()
            .filter(move |dir| self.contains(*dir))
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for dir in iter {
            set.insert(dir);
        }
        set
    }
}

/// Anything drawn as a circle: position, radius, colour
pub trait Shape {
    fn position(&self) -> Vec2;
    fn radius(&self) -> f32;
    fn color(&self) -> Color;
}

/// Bodies that carry a velocity and integrate it once per tick
pub trait Steppable: Shape {
    fn integrate(&mut self);
}

/// The player-controlled body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Player {
    /// New player heading left, as at every game start
    pub fn new(pos: Vec2, radius: f32, speed: f32) -> Self {
        Self {
            pos,
            vel: Direction::Left.velocity(speed),
            radius,
        }
    }
}

impl Shape for Player {
    fn position(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
    fn color(&self) -> Color {
        Color::Gold
    }
}

impl Steppable for Player {
    fn integrate(&mut self) {
        self.pos += self.vel;
    }
}

/// Pursuer behaviour mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PursuerMode {
    /// Lethal to the player
    #[default]
    Chasing,
    /// Can be eaten by the player
    Vulnerable,
}

/// An autonomous pursuer ("ghost")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pursuer {
    /// Stable identity used by scheduled events
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub mode: PursuerMode,
    /// Moves (and can capture) only once active
    pub active: bool,
    /// Activation event already queued
    #[serde(default)]
    pub activation_scheduled: bool,
    /// Memoized wall-probe result (blocked directions) used to spot junctions
    #[serde(default)]
    pub last_blocked: DirectionSet,
    /// Bumped on every scare so only the latest reversion applies
    #[serde(default)]
    pub scare_window: u32,
}

impl Pursuer {
    /// Fresh inactive pursuer heading right
    pub fn new(id: u32, pos: Vec2, radius: f32, speed: f32) -> Self {
        Self {
            id,
            pos,
            vel: Direction::Right.velocity(speed),
            radius,
            mode: PursuerMode::Chasing,
            active: false,
            activation_scheduled: false,
            last_blocked: DirectionSet::EMPTY,
            scare_window: 0,
        }
    }

    pub fn is_vulnerable(&self) -> bool {
        self.mode == PursuerMode::Vulnerable
    }
}

impl Shape for Pursuer {
    fn position(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
    fn color(&self) -> Color {
        match self.mode {
            PursuerMode::Chasing => Color::Red,
            PursuerMode::Vulnerable => Color::Blue,
        }
    }
}

impl Steppable for Pursuer {
    fn integrate(&mut self) {
        self.pos += self.vel;
    }
}

/// Pickup variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    Pellet,
    PowerPellet,
}

/// A collectible point on the maze
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: PickupKind,
    pub pos: Vec2,
    pub radius: f32,
}

impl Shape for Pickup {
    fn position(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
    fn color(&self) -> Color {
        Color::White
    }
}

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// No game running
    #[default]
    Idle,
    /// Frames are being simulated
    Running,
    /// Every pellet eaten
    Won,
    /// Caught by a chasing pursuer
    Lost,
}

/// How a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Won,
    Lost,
}

impl GameResult {
    /// Banner text shown to the player
    pub fn phrase(self) -> &'static str {
        match self {
            GameResult::Won => "You Won!",
            GameResult::Lost => "You Lose!",
        }
    }
}

/// Recorded end of a game, kept for display after the session is cleared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub result: GameResult,
    pub final_score: u64,
}

/// Things that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PelletEaten { pos: Vec2 },
    PowerPelletEaten { pos: Vec2 },
    PursuerActivated { id: u32 },
    PursuerScared { id: u32 },
    PursuerRecovered { id: u32 },
    PursuerEaten { id: u32, replacement: u32 },
    DirectionChosen { id: u32, direction: Direction },
    GameOver(Outcome),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_velocity_prefers_horizontal() {
        assert_eq!(
            Direction::from_velocity(Vec2::new(3.0, -3.0)),
            Some(Direction::Right)
        );
        assert_eq!(
            Direction::from_velocity(Vec2::new(0.0, -3.0)),
            Some(Direction::Up)
        );
        assert_eq!(Direction::from_velocity(Vec2::ZERO), None);
    }

    #[test]
    fn test_direction_set_ops() {
        let mut set: DirectionSet = [Direction::Up, Direction::Left].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(Direction::Up));
        assert!(!set.contains(Direction::Down));

        set.insert(Direction::Right);
        // Iteration follows probe order
        let dirs: Vec<_> = set.iter().collect();
        assert_eq!(dirs, vec![Direction::Right, Direction::Left, Direction::Up]);

        let other: DirectionSet = [Direction::Left].into_iter().collect();
        let diff = set.difference(other);
        assert_eq!(diff.len(), 2);
        assert!(!diff.contains(Direction::Left));

        assert_eq!(set.complement().iter().collect::<Vec<_>>(), vec![Direction::Down]);
        set.remove(Direction::Up);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_pursuer_color_follows_mode() {
        let mut pursuer = Pursuer::new(1, Vec2::ZERO, 15.0, 3.0);
        assert_eq!(pursuer.color(), Color::Red);
        pursuer.mode = PursuerMode::Vulnerable;
        assert_eq!(pursuer.color(), Color::Blue);
    }

    #[test]
    fn test_player_integrates_velocity() {
        let mut player = Player::new(Vec2::new(100.0, 100.0), 15.0, 4.0);
        player.integrate();
        assert_eq!(player.pos, Vec2::new(96.0, 100.0));
    }
}
