//! Frame host
//!
//! Glue between a host's animation callback and the session: it forwards
//! keys, stamps each frame from a [`Clock`], ticks, draws and refreshes the
//! HUD. A stopped game requests no more frames.

use crate::hud::Hud;
use crate::platform::input::{InputState, KeyAction};
use crate::platform::time::{Clock, SystemClock};
use crate::renderer::{Renderer, draw_session};
use crate::settings::Settings;
use crate::sim::session::Session;
use crate::sim::state::{GameEvent, GamePhase};
use crate::sim::tick::tick;

/// Game instance holding all state
pub struct Game<C: Clock = SystemClock> {
    pub session: Session,
    pub input: InputState,
    clock: C,
    // FPS tracking
    frame_times: [f64; 60],
    frame_index: usize,
    fps: u32,
    last_phase: GamePhase,
}

impl<C: Clock> Game<C> {
    pub fn new(session: Session, clock: C) -> Self {
        let last_phase = session.phase;
        Self {
            session,
            input: InputState::default(),
            clock,
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
            last_phase,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }

    /// Frames per second over the last 60 frames
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Begin a new game, discarding any running one
    pub fn start(&mut self) {
        self.session.start();
        log::info!("Game started (seed {})", self.session.seed);
    }

    pub fn stop(&mut self) {
        self.session.stop();
    }

    /// Forward a key event; space starts a game
    pub fn handle_key(&mut self, key: &str, pressed: bool) -> KeyAction {
        let action = self.input.handle_key(key, pressed);
        if action == KeyAction::Start {
            self.start();
        }
        action
    }

    /// Change settings between games. Returns false while a game runs.
    pub fn configure(&mut self, hud: &mut impl Hud, change: impl FnOnce(&mut Settings)) -> bool {
        let Some(settings) = self.session.settings_mut() else {
            log::debug!("Settings are locked while a game is running");
            return false;
        };
        change(settings);
        hud.show_settings(settings);
        true
    }

    /// The host canvas changed size; takes effect at the next start
    pub fn resize(&mut self, canvas_height: u32) -> bool {
        match self.session.settings_mut() {
            Some(settings) => {
                settings.reset_for_canvas(canvas_height);
                true
            }
            None => false,
        }
    }

    /// Run one animation frame. Returns the tick's events; empty when idle.
    pub fn frame(
        &mut self,
        renderer: &mut impl Renderer,
        hud: &mut impl Hud,
    ) -> Vec<GameEvent> {
        if !self.is_running() {
            return Vec::new();
        }

        let now = self.clock.now_ms();
        let events = tick(&mut self.session, &self.input, now);
        self.track_fps(now);

        draw_session(&self.session, renderer);
        hud.show_score(self.session.score);
        for event in &events {
            if let GameEvent::GameOver(outcome) = event {
                hud.show_outcome(outcome);
            }
        }

        let current_phase = self.session.phase;
        if current_phase != self.last_phase {
            log::debug!("Phase {:?} -> {:?}", self.last_phase, current_phase);
            self.last_phase = current_phase;
        }
        events
    }

    fn track_fps(&mut self, time: f64) {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % 60;

        // Oldest to newest frame
        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let elapsed = time - oldest_time;
            if elapsed > 0.0 {
                self.fps = (60000.0 / elapsed).round() as u32;
            }
        }
    }
}
