//! Keyboard state normalized to directional intent
//!
//! The host forwards key-down / key-up events; the simulation reads four
//! held flags and the most recently pressed direction once per tick.

use serde::{Deserialize, Serialize};

use crate::sim::state::{Direction, DirectionSet};

/// What a key event asks the host to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Directional state changed
    Steer(Direction),
    /// Start (or restart) a game
    Start,
    /// Not a game key
    Ignored,
}

/// Held directions plus the last one pressed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    held: DirectionSet,
    last_pressed: Option<Direction>,
}

impl InputState {
    /// Direction key went down
    pub fn press(&mut self, dir: Direction) {
        self.held.insert(dir);
        self.last_pressed = Some(dir);
    }

    /// Direction key went up; the last-pressed marker is kept
    pub fn release(&mut self, dir: Direction) {
        self.held.remove(dir);
    }

    pub fn is_held(&self, dir: Direction) -> bool {
        self.held.contains(dir)
    }

    pub fn last_pressed(&self) -> Option<Direction> {
        self.last_pressed
    }

    /// The direction that is both held and most recently pressed
    pub fn intent(&self) -> Option<Direction> {
        self.last_pressed.filter(|dir| self.held.contains(*dir))
    }

    /// Forget everything (e.g. on focus loss)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Feed a DOM-style key name (`"ArrowUp"`, `" "`, ...)
    pub fn handle_key(&mut self, key: &str, pressed: bool) -> KeyAction {
        let dir = match key {
            "ArrowUp" => Direction::Up,
            "ArrowDown" => Direction::Down,
            "ArrowLeft" => Direction::Left,
            "ArrowRight" => Direction::Right,
            " " if pressed => return KeyAction::Start,
            _ => return KeyAction::Ignored,
        };
        if pressed {
            self.press(dir);
        } else {
            self.release(dir);
        }
        KeyAction::Steer(dir)
    }
}
