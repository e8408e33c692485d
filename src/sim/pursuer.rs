//! Pursuer steering
//!
//! Pursuers have no map knowledge. Every tick they probe the four directions
//! against the walls and remember the blocked set. While the probe matches
//! the memo they keep going straight. When it changes (a side opened up, or
//! the way ahead closed) they pick uniformly among directions that were
//! blocked before and are open now, plus the direction they were already
//! travelling. That never includes the way back, so they wander the maze
//! without immediate backtracking.

use rand::Rng;
use rand::seq::IndexedRandom;

use super::collision::{Wall, collides_with_any};
use super::state::{Direction, DirectionSet, Pursuer};
use crate::settings::DeadEndPolicy;

/// Directions in which a step at `speed` would hit a wall
pub fn blocked_directions(pursuer: &Pursuer, walls: &[Wall], speed: f32) -> DirectionSet {
    Direction::PROBE_ORDER
        .into_iter()
        .filter(|dir| collides_with_any(pursuer, dir.velocity(speed), walls))
        .collect()
}

/// Fold a fresh probe into the junction memo.
///
/// Returns `None` while the surroundings are unchanged, otherwise the
/// directions to choose from. The memo only widens on its own; after a
/// decision it is cleared so the next probe re-seeds it.
pub fn junction_candidates(
    memo: &mut DirectionSet,
    blocked: DirectionSet,
    heading: Option<Direction>,
) -> Option<DirectionSet> {
    if blocked.len() > memo.len() {
        *memo = blocked;
    }
    if blocked == *memo {
        return None;
    }

    if let Some(dir) = heading {
        memo.insert(dir);
    }
    let candidates = memo.difference(blocked);
    *memo = DirectionSet::EMPTY;
    Some(candidates)
}

/// The only way out of a dead end, if the pursuer is in one and not
/// already heading that way
fn dead_end_exit(blocked: DirectionSet, heading: Option<Direction>) -> Option<Direction> {
    let open = blocked.complement();
    if open.len() != 1 {
        return None;
    }
    open.iter().next().filter(|exit| Some(*exit) != heading)
}

/// Run one tick of direction choice for a pursuer.
///
/// Returns the new direction when the velocity was changed.
pub fn steer<R: Rng + ?Sized>(
    pursuer: &mut Pursuer,
    walls: &[Wall],
    speed: f32,
    dead_end: DeadEndPolicy,
    rng: &mut R,
) -> Option<Direction> {
    let blocked = blocked_directions(pursuer, walls, speed);
    let heading = Direction::from_velocity(pursuer.vel);

    let choice = match junction_candidates(&mut pursuer.last_blocked, blocked, heading) {
        Some(candidates) => {
            let options: Vec<Direction> = candidates.iter().collect();
            let picked = options.choose(rng).copied();
            if picked.is_none() {
                log::debug!("Pursuer {} has no candidate direction", pursuer.id);
            }
            picked
        }
        None => None,
    };

    let choice = match (choice, dead_end) {
        (None, DeadEndPolicy::Reverse) => dead_end_exit(blocked, heading),
        (choice, _) => choice,
    };

    if let Some(dir) = choice {
        log::trace!("Pursuer {} turns {:?}", pursuer.id, dir);
        pursuer.vel = dir.velocity(speed);
    }
    choice
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::sim::grid::Maze;

    const SPEED: f32 = 4.0;

    fn set(dirs: &[Direction]) -> DirectionSet {
        dirs.iter().copied().collect()
    }

    fn pursuer_at(pos: Vec2, memo: DirectionSet) -> Pursuer {
        let mut pursuer = Pursuer::new(1, pos, 15.0, SPEED);
        pursuer.last_blocked = memo;
        pursuer
    }

    #[test]
    fn test_memo_widens_then_matches() {
        let mut memo = DirectionSet::EMPTY;
        let blocked = set(&[Direction::Down, Direction::Up]);
        assert_eq!(junction_candidates(&mut memo, blocked, Some(Direction::Right)), None);
        assert_eq!(memo, blocked);
    }

    #[test]
    fn test_candidates_exclude_blocked_and_reverse() {
        let mut memo = set(&[Direction::Down, Direction::Up]);
        let blocked = set(&[Direction::Up]);
        let candidates =
            junction_candidates(&mut memo, blocked, Some(Direction::Right)).unwrap();
        assert_eq!(candidates, set(&[Direction::Right, Direction::Down]));
        assert!(!candidates.contains(Direction::Left));
        assert!(memo.is_empty());
    }

    #[test]
    fn test_corridor_goes_straight() {
        let walls = Maze::parse(&["-----", "-   -", "-----"]).load(40.0, 2).walls;
        let mut pursuer = pursuer_at(Vec2::new(100.0, 60.0), DirectionSet::EMPTY);
        let mut rng = Pcg32::seed_from_u64(1);

        assert_eq!(
            steer(&mut pursuer, &walls, SPEED, DeadEndPolicy::Keep, &mut rng),
            None
        );
        assert_eq!(pursuer.vel, Vec2::new(SPEED, 0.0));
        assert_eq!(pursuer.last_blocked, set(&[Direction::Down, Direction::Up]));
    }

    #[test]
    fn test_corner_forces_the_only_turn() {
        let walls = Maze::parse(&["----", "-  -", "-- -", "-- -", "----"])
            .load(40.0, 2)
            .walls;
        let mut pursuer = pursuer_at(
            Vec2::new(100.0, 60.0),
            set(&[Direction::Down, Direction::Up]),
        );
        let mut rng = Pcg32::seed_from_u64(7);

        let turn = steer(&mut pursuer, &walls, SPEED, DeadEndPolicy::Keep, &mut rng);
        assert_eq!(turn, Some(Direction::Down));
        assert_eq!(pursuer.vel, Vec2::new(0.0, SPEED));
        assert!(pursuer.last_blocked.is_empty());
    }

    #[test]
    fn test_junction_picks_open_forward_option() {
        let walls = Maze::parse(&["-----", "-   -", "-- --", "-- --", "-----"])
            .load(40.0, 2)
            .walls;
        for seed in 0..16 {
            let mut pursuer = pursuer_at(
                Vec2::new(100.0, 60.0),
                set(&[Direction::Down, Direction::Up]),
            );
            let mut rng = Pcg32::seed_from_u64(seed);
            let turn = steer(&mut pursuer, &walls, SPEED, DeadEndPolicy::Keep, &mut rng);
            assert!(matches!(turn, Some(Direction::Right | Direction::Down)));
            assert_ne!(pursuer.vel, Vec2::new(-SPEED, 0.0));
        }
    }

    #[test]
    fn test_dead_end_keeps_velocity() {
        let walls = Maze::parse(&["-----", "-   -", "-----"]).load(40.0, 2).walls;
        let mut pursuer = pursuer_at(
            Vec2::new(140.0, 60.0),
            set(&[Direction::Down, Direction::Up]),
        );
        let mut rng = Pcg32::seed_from_u64(3);

        let turn = steer(&mut pursuer, &walls, SPEED, DeadEndPolicy::Keep, &mut rng);
        assert_eq!(turn, None);
        assert_eq!(pursuer.vel, Vec2::new(SPEED, 0.0));
    }

    #[test]
    fn test_dead_end_reverse_policy() {
        let walls = Maze::parse(&["-----", "-   -", "-----"]).load(40.0, 2).walls;
        let mut pursuer = pursuer_at(
            Vec2::new(140.0, 60.0),
            set(&[Direction::Down, Direction::Up]),
        );
        let mut rng = Pcg32::seed_from_u64(3);

        let turn = steer(&mut pursuer, &walls, SPEED, DeadEndPolicy::Reverse, &mut rng);
        assert_eq!(turn, Some(Direction::Left));
        assert_eq!(pursuer.vel, Vec2::new(-SPEED, 0.0));
    }

    #[test]
    fn test_empty_candidates_yield_no_choice() {
        let mut rng = Pcg32::seed_from_u64(0);
        let options: Vec<Direction> = DirectionSet::EMPTY.iter().collect();
        assert_eq!(options.choose(&mut rng), None);
        assert_eq!(dead_end_exit(set(&[Direction::Up]), None), None);
    }
}
