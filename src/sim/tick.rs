//! Per-frame simulation tick
//!
//! One call advances a running session by exactly one frame. Order within a
//! frame matters and is fixed:
//!
//! 1. fire due timers (activation, vulnerability reversion)
//! 2. player steering from input
//! 3. wall sweep: any body whose committed velocity hits a wall stops
//! 4. pellets, then the win check
//! 5. power pellets
//! 6. pursuers: activation scheduling, movement, capture, steering
//! 7. player movement

use glam::Vec2;

use super::capture::{self, Capture};
use super::collision::collides_with_any;
use super::pickup;
use super::player;
use super::pursuer;
use super::schedule::TimedEvent;
use super::session::Session;
use super::state::{GameEvent, GameResult, Steppable};
use crate::consts::*;
use crate::platform::input::InputState;

/// Advance the session by one frame stamped `now_ms`.
///
/// Returns what happened, in order. Does nothing unless a game is running.
pub fn tick(session: &mut Session, input: &InputState, now_ms: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !session.is_running() {
        return events;
    }
    session.time_ticks += 1;

    fire_timers(session, now_ms, &mut events);

    let player_speed = session.settings().player_speed() as f32;
    if let Some(player) = session.player.as_mut() {
        player::steer(player, input, &session.walls, player_speed);
    }

    sweep_walls(session);

    collect_pellets(session, &mut events);
    if session.pellets.is_empty() {
        let outcome = session.game_over(GameResult::Won);
        events.push(GameEvent::GameOver(outcome));
        return events;
    }

    collect_power_pellets(session, now_ms, &mut events);

    if !update_pursuers(session, now_ms, &mut events) {
        let outcome = session.game_over(GameResult::Lost);
        events.push(GameEvent::GameOver(outcome));
        return events;
    }

    if let Some(player) = session.player.as_mut() {
        player.integrate();
    }

    events
}

fn fire_timers(session: &mut Session, now_ms: f64, events: &mut Vec<GameEvent>) {
    for event in session.scheduler.drain_due(now_ms, session.generation) {
        match event {
            TimedEvent::Activate { pursuer: id } => {
                if let Some(pursuer) = session.pursuers.iter_mut().find(|p| p.id == id) {
                    if !pursuer.active {
                        pursuer.active = true;
                        log::debug!("Pursuer {} activated", id);
                        events.push(GameEvent::PursuerActivated { id });
                    }
                }
            }
            TimedEvent::Recover { pursuer: id, window } => {
                if pickup::recover(&mut session.pursuers, id, window) {
                    log::debug!("Pursuer {} recovered", id);
                    events.push(GameEvent::PursuerRecovered { id });
                }
            }
        }
    }
}

/// Stop every body whose current velocity runs into a wall
fn sweep_walls(session: &mut Session) {
    let walls = &session.walls;
    if let Some(player) = session.player.as_mut() {
        if collides_with_any(&*player, player.vel, walls) {
            player.vel = Vec2::ZERO;
        }
    }
    for pursuer in session.pursuers.iter_mut() {
        if collides_with_any(&*pursuer, pursuer.vel, walls) {
            pursuer.vel = Vec2::ZERO;
        }
    }
}

fn collect_pellets(session: &mut Session, events: &mut Vec<GameEvent>) {
    let Some(player_pos) = session.player.as_ref().map(|p| p.pos) else {
        return;
    };
    let tolerance = session.settings().pickup_reach();
    for pos in pickup::collect(player_pos, &mut session.pellets, tolerance) {
        session.score += PELLET_SCORE;
        events.push(GameEvent::PelletEaten { pos });
    }
}

fn collect_power_pellets(session: &mut Session, now_ms: f64, events: &mut Vec<GameEvent>) {
    let Some(player_pos) = session.player.as_ref().map(|p| p.pos) else {
        return;
    };
    let tolerance = session.settings().pickup_reach();
    for pos in pickup::collect(player_pos, &mut session.power_pellets, tolerance) {
        session.score += POWER_PELLET_SCORE;
        events.push(GameEvent::PowerPelletEaten { pos });
        log::debug!("Power pellet eaten at {:?}", pos);
        pickup::scare(
            &mut session.pursuers,
            &mut session.scheduler,
            now_ms,
            session.generation,
            events,
        );
    }
}

/// Move, resolve and steer every pursuer. Returns false if the player was
/// caught.
fn update_pursuers(session: &mut Session, now_ms: f64, events: &mut Vec<GameEvent>) -> bool {
    let speed = session.settings().pursuer_speed as f32;
    let dead_end = session.settings().dead_end;
    let generation = session.generation;
    let Some(player) = session.player.as_ref() else {
        return true;
    };

    let mut eaten: Vec<u32> = Vec::new();
    for (index, pursuer) in session.pursuers.iter_mut().enumerate() {
        // First sighting: queue activation, staggered by list position
        if !pursuer.activation_scheduled {
            pursuer.activation_scheduled = true;
            session.scheduler.schedule(
                now_ms,
                index as f64 * ACTIVATION_DELAY_MS,
                generation,
                TimedEvent::Activate {
                    pursuer: pursuer.id,
                },
            );
        }

        if pursuer.active {
            pursuer.integrate();
        }

        match capture::check(player, pursuer) {
            Capture::PlayerCaught => {
                log::debug!("Player caught by pursuer {}", pursuer.id);
                return false;
            }
            Capture::PursuerEaten => {
                session.score += PURSUER_SCORE;
                eaten.push(pursuer.id);
                continue;
            }
            Capture::Miss => {}
        }

        if let Some(direction) =
            pursuer::steer(pursuer, &session.walls, speed, dead_end, &mut session.rng)
        {
            events.push(GameEvent::DirectionChosen {
                id: pursuer.id,
                direction,
            });
        }
    }

    if !eaten.is_empty() {
        session.pursuers.retain(|p| !eaten.contains(&p.id));
        let respawn = session.respawn_point();
        for id in eaten {
            let replacement = session.spawn_pursuer(respawn);
            log::debug!("Pursuer {} eaten, respawning as {}", id, replacement.id);
            events.push(GameEvent::PursuerEaten {
                id,
                replacement: replacement.id,
            });
            session.pursuers.push(replacement);
        }
    }
    true
}
