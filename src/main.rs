//! Maze Chase headless runner
//!
//! Plays one game with a simple autopilot on a fixed-rate clock, then
//! reports the outcome. Handy for soak-testing the simulation and for
//! eyeballing frames without a browser.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use env_logger::{Builder, Env};
use log::LevelFilter;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use maze_chase::consts::{DEFAULT_CANVAS_HEIGHT, MAZE_COLUMNS, MAZE_ROWS};
use maze_chase::hud::LogHud;
use maze_chase::platform::ManualClock;
use maze_chase::renderer::{AsciiRenderer, DrawList, draw_session};
use maze_chase::sim::{Direction, Session, collides_with_any};
use maze_chase::{Game, Settings, SettingsError};

#[derive(Parser, Debug)]
#[command(name = "maze-chase", version, about = "Run a maze-chase game headless")]
struct Args {
    /// RNG seed for pursuer decisions (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many frames if the game has not ended
    #[arg(long, default_value_t = 36_000)]
    max_frames: u64,

    /// Milliseconds between frames
    #[arg(long, default_value_t = 1000.0 / 60.0)]
    frame_ms: f64,

    /// Number of pursuers (2-6)
    #[arg(long)]
    pursuers: Option<u8>,

    /// Pursuer speed in units per frame
    #[arg(long)]
    speed: Option<u32>,

    /// Canvas height the maze is fitted to
    #[arg(long)]
    canvas_height: Option<u32>,

    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the board every N frames
    #[arg(long)]
    dump_every: Option<u64>,

    /// Print the final session state as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initializes the global logger.
///
/// `RUST_LOG` wins over the `--verbose` default when set.
fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    let _ = Builder::from_env(env).try_init();
}

fn load_settings(args: &Args) -> Result<Settings, SettingsError> {
    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::for_canvas_height(DEFAULT_CANVAS_HEIGHT),
    };
    if let Some(height) = args.canvas_height {
        settings.reset_for_canvas(height);
    }
    if let Some(count) = args.pursuers {
        settings.pursuer_count = count;
    }
    if let Some(speed) = args.speed {
        settings.pursuer_speed = speed;
    }
    settings.validate()?;
    Ok(settings)
}

/// Picks a random open direction whenever the player stops or reaches a
/// new junction, never doubling back unless it has to
struct Autopilot {
    rng: Pcg32,
    last_cell: Option<(i32, i32)>,
}

impl Autopilot {
    fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            last_cell: None,
        }
    }

    fn steer(&mut self, game: &mut Game<ManualClock>) {
        let session = &game.session;
        let Some(player) = session.player.as_ref() else {
            return;
        };
        let speed = session.settings().player_speed() as f32;
        let cell_size = session.cell_size();
        let cell = (
            (player.pos.x / cell_size).floor() as i32,
            (player.pos.y / cell_size).floor() as i32,
        );

        let open: Vec<Direction> = Direction::PROBE_ORDER
            .into_iter()
            .filter(|dir| !collides_with_any(player, dir.velocity(speed), &session.walls))
            .collect();
        let heading = Direction::from_velocity(player.vel);

        let stuck = heading.is_none_or(|dir| !open.contains(&dir));
        let new_junction = open.len() >= 3 && self.last_cell != Some(cell);
        if !stuck && !new_junction {
            return;
        }
        self.last_cell = Some(cell);

        let forward: Vec<Direction> = open
            .iter()
            .copied()
            .filter(|dir| heading.is_none_or(|h| *dir != h.opposite()))
            .collect();
        let options = if forward.is_empty() { &open } else { &forward };
        let Some(&choice) = options.choose(&mut self.rng) else {
            return;
        };

        if game.input.intent() != Some(choice) {
            log::trace!("Autopilot heads {:?} at {:?}", choice, cell);
            game.input.clear();
            game.input.press(choice);
        }
    }
}

fn print_board(session: &Session) {
    let mut ascii = AsciiRenderer::new(
        MAZE_COLUMNS as usize,
        MAZE_ROWS as usize,
        session.cell_size(),
    );
    draw_session(session, &mut ascii);
    println!("{}\nScore: {}\n", ascii.render(), session.score);
}

/// Take the JSON snapshot (if asked for) and stop a game cut off by the
/// frame limit. The snapshot comes first so it still shows the board.
fn finish(
    game: &mut Game<ManualClock>,
    want_json: bool,
) -> Result<Option<String>, serde_json::Error> {
    let snapshot = if want_json {
        Some(game.session.to_json()?)
    } else {
        None
    };

    if game.is_running() {
        log::info!(
            "Frame limit reached at score {} with {} pellets left",
            game.session.score,
            game.session.pellets.len()
        );
        print_board(&game.session);
        game.stop();
    }
    Ok(snapshot)
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let settings = match load_settings(&args) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    log::info!("Maze Chase starting with seed {}", seed);
    log::debug!("Settings: {:?}", settings);

    let session = Session::with_seed(settings, seed);
    let mut game = Game::new(session, ManualClock::new(0.0));
    let mut autopilot = Autopilot::new(seed.rotate_left(17));
    let mut frame_list = DrawList::default();
    let mut hud = LogHud::default();

    game.handle_key(" ", true);
    let mut frames = 0;
    while game.is_running() && frames < args.max_frames {
        autopilot.steer(&mut game);
        game.clock().advance(args.frame_ms);
        game.frame(&mut frame_list, &mut hud);
        frames += 1;

        if let Some(every) = args.dump_every.filter(|n| *n > 0) {
            if frames % every == 0 && game.is_running() {
                print_board(&game.session);
            }
        }
    }

    let snapshot = match finish(&mut game, args.json) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            log::error!("Failed to serialize session: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match game.session.outcome {
        Some(outcome) => println!(
            "{} Final score: {} ({} frames)",
            outcome.result.phrase(),
            outcome.final_score,
            frames
        ),
        None => println!("No result after {} frames", frames),
    }

    if let Some(json) = snapshot {
        println!("{}", json);
    }

    ExitCode::SUCCESS
}
