//! Frame-stepped simulation
//!
//! All gameplay logic lives here. Nothing in this module draws or reads the
//! keyboard directly:
//! - Time enters as a per-frame millisecond stamp
//! - Pursuer randomness comes from the session's seeded RNG
//! - Collections are iterated in list order and compacted after each pass

pub mod capture;
pub mod collision;
pub mod grid;
pub mod pickup;
pub mod player;
pub mod pursuer;
pub mod schedule;
pub mod session;
pub mod state;
pub mod tick;

pub use collision::{Wall, circle_collides_with, collides_with_any};
pub use grid::{DEFAULT_MAZE, Layout, Maze, Token};
pub use schedule::{Scheduler, TimedEvent};
pub use session::Session;
pub use state::{
    Direction, DirectionSet, GameEvent, GamePhase, GameResult, Outcome, Pickup, PickupKind,
    Player, Pursuer, PursuerMode, Shape, Steppable,
};
pub use tick::tick;
