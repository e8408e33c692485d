//! Player steering
//!
//! Turns the held + last-pressed direction into a velocity on one axis per
//! tick. The other axis is left alone, so pressing a perpendicular direction
//! early does not stop the player before the turn is possible.

use super::collision::{Wall, collides_with_any};
use super::state::{Direction, Player};
use crate::platform::input::InputState;

/// Apply directional intent for this tick
pub fn steer(player: &mut Player, input: &InputState, walls: &[Wall], speed: f32) {
    let Some(dir) = input.intent() else {
        return;
    };

    let candidate = dir.velocity(speed);
    let blocked = collides_with_any(player, candidate, walls);
    let axis_speed = if blocked { 0.0 } else { speed };

    match dir {
        Direction::Right => player.vel.x = axis_speed,
        Direction::Left => player.vel.x = -axis_speed,
        Direction::Down => player.vel.y = axis_speed,
        Direction::Up => player.vel.y = -axis_speed,
    }

    if blocked {
        log::trace!("Player blocked moving {:?}", dir);
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::sim::grid::Maze;

    fn corridor() -> (Vec<Wall>, Player) {
        // Horizontal corridor with a downward opening at column 2
        let layout = Maze::parse(&["-----", "-...-", "--.--", "--.--"]).load(40.0, 2);
        let player = Player::new(Vec2::new(60.0, 60.0), 15.0, 4.0);
        (layout.walls, player)
    }

    #[test]
    fn test_no_intent_keeps_velocity() {
        let (walls, mut player) = corridor();
        steer(&mut player, &InputState::default(), &walls, 4.0);
        assert_eq!(player.vel, Vec2::new(-4.0, 0.0));
    }

    #[test]
    fn test_blocked_direction_zeroes_axis() {
        let (walls, mut player) = corridor();
        let mut input = InputState::default();
        input.press(Direction::Left);

        steer(&mut player, &input, &walls, 4.0);
        assert_eq!(player.vel.x, 0.0);
    }

    #[test]
    fn test_open_direction_sets_axis_only() {
        let (walls, mut player) = corridor();
        player.vel = Vec2::new(0.0, 0.0);
        let mut input = InputState::default();
        input.press(Direction::Right);

        steer(&mut player, &input, &walls, 4.0);
        assert_eq!(player.vel, Vec2::new(4.0, 0.0));
    }

    #[test]
    fn test_perpendicular_press_leaves_other_axis() {
        let (walls, mut player) = corridor();
        player.vel = Vec2::new(4.0, 0.0);
        let mut input = InputState::default();
        input.press(Direction::Right);
        input.press(Direction::Down);

        // Down is blocked from column 1; x velocity stays as it was
        steer(&mut player, &input, &walls, 4.0);
        assert_eq!(player.vel, Vec2::new(4.0, 0.0));

        // At the opening the turn goes through; x is still untouched
        player.pos = Vec2::new(100.0, 60.0);
        steer(&mut player, &input, &walls, 4.0);
        assert_eq!(player.vel, Vec2::new(4.0, 4.0));
    }

    #[test]
    fn test_released_key_is_ignored() {
        let (walls, mut player) = corridor();
        let mut input = InputState::default();
        input.press(Direction::Right);
        input.release(Direction::Right);

        steer(&mut player, &input, &walls, 4.0);
        assert_eq!(player.vel, Vec2::new(-4.0, 0.0));
    }
}
