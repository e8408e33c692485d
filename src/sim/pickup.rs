//! Pellet and power-pellet collection, and the vulnerable window it opens

use glam::Vec2;

use super::schedule::{Scheduler, TimedEvent};
use super::state::{GameEvent, Pickup, PursuerMode, Pursuer};
use crate::consts::VULNERABLE_DURATION_MS;

/// Remove every pickup within `tolerance` of the player's centre.
///
/// With a tolerance of zero only exact centre hits count. Returns the
/// positions collected, in list order. The list is compacted in one pass
/// after all hits are known.
pub fn collect(player_pos: Vec2, pickups: &mut Vec<Pickup>, tolerance: f32) -> Vec<Vec2> {
    let hits: Vec<bool> = pickups
        .iter()
        .map(|pickup| player_pos.distance(pickup.pos) <= tolerance)
        .collect();
    if !hits.contains(&true) {
        return Vec::new();
    }

    let collected = pickups
        .iter()
        .zip(&hits)
        .filter(|(_, hit)| **hit)
        .map(|(pickup, _)| pickup.pos)
        .collect();
    let mut flags = hits.into_iter();
    pickups.retain(|_| !flags.next().unwrap_or(false));
    collected
}

/// Make every pursuer vulnerable and (re)start its recovery timer.
///
/// Pursuers that were chasing switch mode; pursuers already vulnerable keep
/// their mode but get a fresh window, so windows never stack.
pub fn scare(
    pursuers: &mut [Pursuer],
    scheduler: &mut Scheduler,
    now_ms: f64,
    generation: u32,
    events: &mut Vec<GameEvent>,
) {
    for pursuer in pursuers.iter_mut() {
        if pursuer.mode == PursuerMode::Chasing {
            pursuer.mode = PursuerMode::Vulnerable;
            events.push(GameEvent::PursuerScared { id: pursuer.id });
        }
        pursuer.scare_window += 1;
        scheduler.schedule(
            now_ms,
            VULNERABLE_DURATION_MS,
            generation,
            TimedEvent::Recover {
                pursuer: pursuer.id,
                window: pursuer.scare_window,
            },
        );
    }
}

/// End a vulnerable window if it is still the pursuer's latest one.
///
/// Returns true when the pursuer went back to chasing.
pub fn recover(pursuers: &mut [Pursuer], id: u32, window: u32) -> bool {
    let Some(pursuer) = pursuers.iter_mut().find(|p| p.id == id) else {
        return false;
    };
    if pursuer.scare_window != window || pursuer.mode != PursuerMode::Vulnerable {
        return false;
    }
    pursuer.mode = PursuerMode::Chasing;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::PickupKind;

    fn pellet(x: f32, y: f32) -> Pickup {
        Pickup {
            kind: PickupKind::Pellet,
            pos: Vec2::new(x, y),
            radius: 2.0,
        }
    }

    #[test]
    fn test_collect_exact_hit_only() {
        let mut pellets = vec![pellet(20.0, 20.0), pellet(60.0, 20.0), pellet(100.0, 20.0)];

        assert!(collect(Vec2::new(59.0, 20.0), &mut pellets, 0.0).is_empty());
        assert_eq!(pellets.len(), 3);

        let got = collect(Vec2::new(60.0, 20.0), &mut pellets, 0.0);
        assert_eq!(got, vec![Vec2::new(60.0, 20.0)]);
        assert_eq!(pellets, vec![pellet(20.0, 20.0), pellet(100.0, 20.0)]);

        // Already gone
        assert!(collect(Vec2::new(60.0, 20.0), &mut pellets, 0.0).is_empty());
    }

    #[test]
    fn test_collect_with_tolerance() {
        let mut pellets = vec![pellet(20.0, 20.0), pellet(23.0, 20.0)];
        let got = collect(Vec2::new(21.0, 20.0), &mut pellets, 2.0);
        assert_eq!(got.len(), 2);
        assert!(pellets.is_empty());
    }

    #[test]
    fn test_scare_then_recover() {
        let mut pursuers = vec![
            Pursuer::new(1, Vec2::ZERO, 15.0, 3.0),
            Pursuer::new(2, Vec2::ZERO, 15.0, 3.0),
        ];
        let mut scheduler = Scheduler::new();
        let mut events = Vec::new();

        scare(&mut pursuers, &mut scheduler, 0.0, 1, &mut events);
        assert!(pursuers.iter().all(Pursuer::is_vulnerable));
        assert_eq!(events.len(), 2);

        assert!(scheduler.drain_due(5999.0, 1).is_empty());
        for event in scheduler.drain_due(6000.0, 1) {
            if let TimedEvent::Recover { pursuer, window } = event {
                assert!(recover(&mut pursuers, pursuer, window));
            }
        }
        assert!(pursuers.iter().all(|p| p.mode == PursuerMode::Chasing));
    }

    #[test]
    fn test_second_scare_restarts_window() {
        let mut pursuers = vec![Pursuer::new(1, Vec2::ZERO, 15.0, 3.0)];
        let mut scheduler = Scheduler::new();
        let mut events = Vec::new();

        scare(&mut pursuers, &mut scheduler, 0.0, 1, &mut events);
        scare(&mut pursuers, &mut scheduler, 4000.0, 1, &mut events);
        // Mode switched once only
        assert_eq!(events.len(), 1);

        // First window's timer is stale
        let first = scheduler.drain_due(6000.0, 1);
        assert_eq!(first.len(), 1);
        if let TimedEvent::Recover { pursuer, window } = first[0] {
            assert!(!recover(&mut pursuers, pursuer, window));
        }
        assert!(pursuers[0].is_vulnerable());

        let second = scheduler.drain_due(10000.0, 1);
        if let TimedEvent::Recover { pursuer, window } = second[0] {
            assert!(recover(&mut pursuers, pursuer, window));
        }
        assert!(!pursuers[0].is_vulnerable());
    }

    #[test]
    fn test_recover_unknown_pursuer() {
        let mut pursuers = vec![Pursuer::new(1, Vec2::ZERO, 15.0, 3.0)];
        assert!(!recover(&mut pursuers, 99, 1));
    }
}
