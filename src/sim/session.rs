//! Game session: everything that lives between `start()` and `stop()`

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::collision::Wall;
use super::grid::Maze;
use super::schedule::Scheduler;
use super::state::{GamePhase, GameResult, Outcome, Pickup, Player, Pursuer};
use crate::cell_center;
use crate::consts::PURSUER_RESPAWN_CELL;
use crate::settings::Settings;

/// Complete session state
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    /// Seed the direction RNG was created from
    pub seed: u64,
    /// Direction RNG shared by all pursuers
    #[serde(skip)]
    pub(crate) rng: Pcg32,
    settings: Settings,
    #[serde(skip)]
    maze: Maze,
    /// Current phase
    pub phase: GamePhase,
    pub score: u64,
    /// Last finished game, kept after the session is cleared
    pub outcome: Option<Outcome>,
    /// Bumped on every stop; timers from older generations are ignored
    pub generation: u32,
    /// Ticks simulated in the current game
    pub time_ticks: u64,
    pub walls: Vec<Wall>,
    pub pellets: Vec<Pickup>,
    pub power_pellets: Vec<Pickup>,
    pub pursuers: Vec<Pursuer>,
    pub player: Option<Player>,
    #[serde(skip)]
    pub scheduler: Scheduler,
    next_id: u32,
}

impl Session {
    /// Idle session over the given maze
    pub fn new(settings: Settings, maze: Maze, seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            settings,
            maze,
            phase: GamePhase::Idle,
            score: 0,
            outcome: None,
            generation: 0,
            time_ticks: 0,
            walls: Vec::new(),
            pellets: Vec::new(),
            power_pellets: Vec::new(),
            pursuers: Vec::new(),
            player: None,
            scheduler: Scheduler::new(),
            next_id: 1,
        }
    }

    /// Idle session over the built-in maze
    pub fn with_seed(settings: Settings, seed: u64) -> Self {
        Self::new(settings, Maze::default(), seed)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Settings can only change between games
    pub fn settings_mut(&mut self) -> Option<&mut Settings> {
        if self.is_running() {
            None
        } else {
            Some(&mut self.settings)
        }
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Cell size for the current settings, in world units
    pub fn cell_size(&self) -> f32 {
        self.settings.cell_size() as f32
    }

    /// Load the maze and spawn the player and pursuers.
    ///
    /// A running game is stopped first.
    pub fn start(&mut self) {
        self.stop();

        let cell_size = self.cell_size();
        let radius = self.settings.body_radius();
        let layout = self
            .maze
            .load(cell_size, self.settings.pursuer_count);

        self.walls = layout.walls;
        self.pellets = layout.pellets;
        self.power_pellets = layout.power_pellets;
        self.player = Some(Player::new(
            layout.player_start,
            radius,
            self.settings.player_speed() as f32,
        ));
        for pos in layout.pursuer_spawns {
            let pursuer = self.spawn_pursuer(pos);
            self.pursuers.push(pursuer);
        }

        self.outcome = None;
        self.phase = GamePhase::Running;
        log::info!(
            "Game started: {} pellets, {} pursuers, cell size {}",
            self.pellets.len(),
            self.pursuers.len(),
            cell_size
        );
    }

    /// Clear the session back to idle.
    ///
    /// Safe to call at any time, including when nothing is running.
    pub fn stop(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.walls.clear();
        self.pellets.clear();
        self.power_pellets.clear();
        self.pursuers.clear();
        self.player = None;
        self.score = 0;
        self.time_ticks = 0;
        self.outcome = None;
        self.phase = GamePhase::Idle;
        let canvas_height = self.settings.canvas_height;
        self.settings.reset_for_canvas(canvas_height);
        log::debug!("Session stopped (generation {})", self.generation);
    }

    /// End the game, recording the result and the score it ended with
    pub fn game_over(&mut self, result: GameResult) -> Outcome {
        let outcome = Outcome {
            result,
            final_score: self.score,
        };
        self.stop();
        self.phase = match result {
            GameResult::Won => GamePhase::Won,
            GameResult::Lost => GamePhase::Lost,
        };
        self.outcome = Some(outcome);
        log::info!("{} Final score: {}", result.phrase(), outcome.final_score);
        outcome
    }

    /// Fresh pursuer at `pos` with a new ID
    pub fn spawn_pursuer(&mut self, pos: Vec2) -> Pursuer {
        let id = self.next_entity_id();
        Pursuer::new(
            id,
            pos,
            self.settings.body_radius(),
            self.settings.pursuer_speed as f32,
        )
    }

    /// Where eaten pursuers come back
    pub fn respawn_point(&self) -> Vec2 {
        cell_center(
            PURSUER_RESPAWN_CELL.0,
            PURSUER_RESPAWN_CELL.1,
            self.cell_size(),
        )
    }

    /// JSON dump of the visible session state
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
