//! Game settings
//!
//! Everything the session reads at map-load time: the canvas-derived cell
//! size and speeds, plus the pursuer count/speed the player can tune between
//! games.

use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("pursuer count {0} outside 2..=6")]
    PursuerCount(u8),
    #[error("pursuer speed {speed} outside {min}..={max} for cell size {cell_size}")]
    PursuerSpeed {
        speed: u32,
        min: u32,
        max: u32,
        cell_size: u32,
    },
    #[error("canvas height {0} is too small for a 21-row maze")]
    CanvasTooSmall(u32),
    #[error("pickup tolerance {0} must be a non-negative number")]
    PickupTolerance(f32),
}

/// What a pursuer does when it runs out of candidate directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DeadEndPolicy {
    /// Keep the current velocity (the wall sweep will stop it)
    #[default]
    Keep,
    /// Turn back the way it came
    Reverse,
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Host canvas height in pixels; the cell size is derived from it
    pub canvas_height: u32,
    /// Number of pursuers spawned per `g` cell
    pub pursuer_count: u8,
    /// Pursuer speed in world units per tick
    pub pursuer_speed: u32,
    /// Max centre distance at which a pickup is collected; `None` derives it
    /// from the player speed, `Some(0.0)` demands exact hits
    pub pickup_tolerance: Option<f32>,
    /// Pursuer behaviour when no candidate direction is left
    pub dead_end: DeadEndPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            pursuer_count: DEFAULT_PURSUERS,
            pursuer_speed: DEFAULT_PURSUER_SPEED,
            pickup_tolerance: None,
            dead_end: DeadEndPolicy::Keep,
        }
    }
}

impl Settings {
    /// Settings for a given canvas height, other values at their defaults
    pub fn for_canvas_height(canvas_height: u32) -> Self {
        let mut settings = Self {
            canvas_height,
            ..Self::default()
        };
        settings.reset_for_canvas(canvas_height);
        settings
    }

    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Check that the tunable values are inside their bounds
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.cell_size() == 0 {
            return Err(SettingsError::CanvasTooSmall(self.canvas_height));
        }
        if !(MIN_PURSUERS..=MAX_PURSUERS).contains(&self.pursuer_count) {
            return Err(SettingsError::PursuerCount(self.pursuer_count));
        }
        let range = self.pursuer_speed_range();
        if !range.contains(&self.pursuer_speed) {
            return Err(SettingsError::PursuerSpeed {
                speed: self.pursuer_speed,
                min: *range.start(),
                max: *range.end(),
                cell_size: self.cell_size(),
            });
        }
        if let Some(tolerance) = self.pickup_tolerance {
            if tolerance.is_nan() || tolerance < 0.0 {
                return Err(SettingsError::PickupTolerance(tolerance));
            }
        }
        Ok(())
    }

    /// Edge length of one maze cell: rows fitted to the canvas, even, capped
    pub fn cell_size(&self) -> u32 {
        let fitted = self.canvas_height / MAZE_ROWS;
        let even = fitted - fitted % 2;
        even.min(MAX_CELL_SIZE)
    }

    /// Canvas width that fits the maze columns exactly
    pub fn canvas_width(&self) -> u32 {
        MAZE_COLUMNS * self.cell_size()
    }

    /// Radius shared by the player and pursuers
    pub fn body_radius(&self) -> f32 {
        (self.cell_size() as f32 * 0.75 / 2.0).floor()
    }

    /// Player speed tier for the current cell size
    pub fn player_speed(&self) -> u32 {
        match self.cell_size() {
            size if size < 30 => 2,
            size if size < 40 => 3,
            _ => 4,
        }
    }

    /// Centre distance at which the player collects a pickup.
    ///
    /// The player moves in whole speed steps, so when the speed does not
    /// divide the cell size it passes a pellet up to half a step off along its
    /// axis. Turns go through while the body is less than `WALL_MARGIN` off
    /// the cell centre line, which leaves up to one unit of offset across it.
    pub fn pickup_reach(&self) -> f32 {
        match self.pickup_tolerance {
            Some(tolerance) => tolerance,
            None => (self.player_speed() / 2) as f32 + (WALL_MARGIN - 1.0),
        }
    }

    /// Allowed pursuer speeds for the current cell size
    pub fn pursuer_speed_range(&self) -> RangeInclusive<u32> {
        if self.cell_size() < 40 { 2..=3 } else { 2..=5 }
    }

    /// Recompute size-derived values after the canvas changed
    pub fn reset_for_canvas(&mut self, canvas_height: u32) {
        self.canvas_height = canvas_height;
        let range = self.pursuer_speed_range();
        self.pursuer_speed = self.pursuer_speed.clamp(*range.start(), *range.end());
    }

    /// Add a pursuer (capped); returns the new count
    pub fn increase_pursuers(&mut self) -> u8 {
        if self.pursuer_count < MAX_PURSUERS {
            self.pursuer_count += 1;
        }
        self.pursuer_count
    }

    /// Remove a pursuer (floored); returns the new count
    pub fn decrease_pursuers(&mut self) -> u8 {
        if self.pursuer_count > MIN_PURSUERS {
            self.pursuer_count -= 1;
        }
        self.pursuer_count
    }

    /// Speed pursuers up (capped); returns the new speed
    pub fn increase_pursuer_speed(&mut self) -> u32 {
        if self.pursuer_speed < *self.pursuer_speed_range().end() {
            self.pursuer_speed += 1;
        }
        self.pursuer_speed
    }

    /// Slow pursuers down (floored); returns the new speed
    pub fn decrease_pursuer_speed(&mut self) -> u32 {
        if self.pursuer_speed > *self.pursuer_speed_range().start() {
            self.pursuer_speed -= 1;
        }
        self.pursuer_speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_size_is_even_and_capped() {
        assert_eq!(Settings::for_canvas_height(840).cell_size(), 40);
        assert_eq!(Settings::for_canvas_height(2000).cell_size(), 40);
        // 700 / 21 = 33 -> 32
        assert_eq!(Settings::for_canvas_height(700).cell_size(), 32);
        // 600 / 21 = 28
        assert_eq!(Settings::for_canvas_height(600).cell_size(), 28);
    }

    #[test]
    fn test_speed_tiers() {
        let small = Settings::for_canvas_height(600);
        assert_eq!(small.player_speed(), 2);
        assert_eq!(small.pursuer_speed_range(), 2..=3);

        let medium = Settings::for_canvas_height(700);
        assert_eq!(medium.player_speed(), 3);
        assert_eq!(medium.pursuer_speed_range(), 2..=3);

        let large = Settings::for_canvas_height(840);
        assert_eq!(large.player_speed(), 4);
        assert_eq!(large.pursuer_speed_range(), 2..=5);
        assert_eq!(large.body_radius(), 15.0);
        assert_eq!(large.canvas_width(), 760);
    }

    #[test]
    fn test_pickup_reach_covers_off_centre_steps() {
        // Speed 4 on 40-unit cells lands on every centre; the reach is slack
        assert_eq!(Settings::for_canvas_height(840).pickup_reach(), 3.0);
        // Speed 3 on 32-unit cells passes centres one unit off on each axis
        assert_eq!(Settings::for_canvas_height(700).pickup_reach(), 2.0);
        assert_eq!(Settings::for_canvas_height(600).pickup_reach(), 2.0);

        let exact = Settings {
            pickup_tolerance: Some(0.0),
            ..Settings::for_canvas_height(700)
        };
        assert_eq!(exact.pickup_reach(), 0.0);
        assert!(exact.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_pickup_tolerance() {
        for tolerance in [-0.5, f32::NAN] {
            let settings = Settings {
                pickup_tolerance: Some(tolerance),
                ..Settings::default()
            };
            assert!(matches!(
                settings.validate(),
                Err(SettingsError::PickupTolerance(_))
            ));
        }
    }

    #[test]
    fn test_pursuer_count_bounds() {
        let mut settings = Settings::default();
        for _ in 0..10 {
            settings.increase_pursuers();
        }
        assert_eq!(settings.pursuer_count, MAX_PURSUERS);
        for _ in 0..10 {
            settings.decrease_pursuers();
        }
        assert_eq!(settings.pursuer_count, MIN_PURSUERS);
    }

    #[test]
    fn test_pursuer_speed_bounds_follow_cell_size() {
        let mut settings = Settings::for_canvas_height(840);
        for _ in 0..10 {
            settings.increase_pursuer_speed();
        }
        assert_eq!(settings.pursuer_speed, 5);

        // Shrinking the canvas pulls the speed back into the smaller range
        settings.reset_for_canvas(600);
        assert_eq!(settings.pursuer_speed, 3);
        assert_eq!(settings.decrease_pursuer_speed(), 2);
        assert_eq!(settings.decrease_pursuer_speed(), 2);
    }

    #[test]
    fn test_from_json_defaults_missing_fields() {
        let settings = Settings::from_json(r#"{ "pursuer_count": 5 }"#).unwrap();
        assert_eq!(settings.pursuer_count, 5);
        assert_eq!(settings.canvas_height, DEFAULT_CANVAS_HEIGHT);
        assert_eq!(settings.dead_end, DeadEndPolicy::Keep);
    }

    #[test]
    fn test_from_json_rejects_out_of_range() {
        assert!(matches!(
            Settings::from_json(r#"{ "pursuer_count": 9 }"#),
            Err(SettingsError::PursuerCount(9))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "canvas_height": 600, "pursuer_speed": 5 }"#),
            Err(SettingsError::PursuerSpeed { speed: 5, .. })
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "canvas_height": 10 }"#),
            Err(SettingsError::CanvasTooSmall(10))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "pickup_tolerance": -1.0 }"#),
            Err(SettingsError::PickupTolerance(_))
        ));
        assert!(matches!(
            Settings::from_json("not json"),
            Err(SettingsError::Parse(_))
        ));
    }
}
