//! Score and outcome display
//!
//! The session pushes numbers; a [`Hud`] decides how to show them.

use crate::settings::Settings;
use crate::sim::state::Outcome;

/// Display collaborator for the numbers around the maze
pub trait Hud {
    fn show_score(&mut self, score: u64);
    fn show_outcome(&mut self, outcome: &Outcome);
    /// Settings panel refresh (pursuer count / speed)
    fn show_settings(&mut self, _settings: &Settings) {}
}

/// Writes HUD changes to the log
#[derive(Debug, Default)]
pub struct LogHud {
    last_score: Option<u64>,
}

impl Hud for LogHud {
    fn show_score(&mut self, score: u64) {
        if self.last_score != Some(score) {
            log::debug!("Score: {}", score);
            self.last_score = Some(score);
        }
    }

    fn show_outcome(&mut self, outcome: &Outcome) {
        log::info!(
            "{} Final score: {}",
            outcome.result.phrase(),
            outcome.final_score
        );
    }

    fn show_settings(&mut self, settings: &Settings) {
        log::info!(
            "Pursuers: {}, pursuer speed: {}",
            settings.pursuer_count,
            settings.pursuer_speed
        );
    }
}

/// Keeps the current HUD text, the way a page would show it
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TextHud {
    pub score: String,
    pub banner: Option<String>,
    pub settings: Option<String>,
}

impl Hud for TextHud {
    fn show_score(&mut self, score: u64) {
        self.score = score.to_string();
    }

    fn show_outcome(&mut self, outcome: &Outcome) {
        self.banner = Some(format!(
            "{} Score: {}",
            outcome.result.phrase(),
            outcome.final_score
        ));
    }

    fn show_settings(&mut self, settings: &Settings) {
        self.settings = Some(format!(
            "{} pursuers @ {}",
            settings.pursuer_count, settings.pursuer_speed
        ));
    }
}
