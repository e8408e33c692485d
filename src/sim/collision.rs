//! Collision oracle for circular bodies against square wall cells
//!
//! Bodies are tested with a *candidate* velocity so a direction can be tried
//! before it is committed. The wall box is inflated by
//! `size / 2 - radius - WALL_MARGIN`, which leaves a small gap around a body
//! centred in a one-cell corridor so it slides along without snagging on
//! wall seams.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Shape;
use crate::consts::WALL_MARGIN;

/// A static, axis-aligned square wall cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    /// Top-left corner
    pub pos: Vec2,
    /// Edge length
    pub size: f32,
}

impl Wall {
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self { pos, size }
    }

    /// How far the wall box is grown for a body of the given radius
    #[inline]
    pub fn inflation(&self, radius: f32) -> f32 {
        self.size / 2.0 - radius - WALL_MARGIN
    }
}

/// Would a circle at `center` moved by `velocity` overlap `wall`?
pub fn circle_collides_with(center: Vec2, radius: f32, velocity: Vec2, wall: &Wall) -> bool {
    let inflate = wall.inflation(radius);
    let next = center + velocity;

    next.x + radius >= wall.pos.x - inflate
        && next.x - radius <= wall.pos.x + wall.size + inflate
        && next.y + radius >= wall.pos.y - inflate
        && next.y - radius <= wall.pos.y + wall.size + inflate
}

/// `circle_collides_with` for any drawable body
#[inline]
pub fn body_collides_with<B: Shape + ?Sized>(body: &B, velocity: Vec2, wall: &Wall) -> bool {
    circle_collides_with(body.position(), body.radius(), velocity, wall)
}

/// First wall (in list order) the body would hit with `velocity`
pub fn first_collision<'a, B: Shape + ?Sized>(
    body: &B,
    velocity: Vec2,
    walls: &'a [Wall],
) -> Option<&'a Wall> {
    walls
        .iter()
        .find(|wall| body_collides_with(body, velocity, wall))
}

/// Does the body hit any wall with `velocity`?
#[inline]
pub fn collides_with_any<B: Shape + ?Sized>(body: &B, velocity: Vec2, walls: &[Wall]) -> bool {
    first_collision(body, velocity, walls).is_some()
}
