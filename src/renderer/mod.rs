//! Drawing collaborator
//!
//! The simulation never draws. Each frame the host hands a [`Renderer`] to
//! [`draw_session`], which emits filled rectangles (walls) and filled circles
//! (everything else) in back-to-front order.

pub mod ascii;
pub mod mesh;
pub mod shapes;
pub mod vertex;

pub use ascii::AsciiRenderer;
pub use mesh::MeshRenderer;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::session::Session;
use crate::sim::state::Shape;

/// Entity colours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Blue,
    Red,
    Gold,
    White,
}

impl Color {
    /// Linear RGBA for vertex output
    pub fn rgba(self) -> [f32; 4] {
        match self {
            Color::Blue => vertex::colors::WALL,
            Color::Red => vertex::colors::PURSUER,
            Color::Gold => vertex::colors::PLAYER,
            Color::White => vertex::colors::PICKUP,
        }
    }
}

/// Sink for draw primitives
pub trait Renderer {
    /// Start a new frame
    fn clear(&mut self) {}
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn draw_rect(&mut self, origin: Vec2, size: Vec2, color: Color);
}

/// One recorded primitive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Rect {
        origin: Vec2,
        size: Vec2,
        color: Color,
    },
}

/// Renderer that just records what it was asked to draw
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl Renderer for DrawList {
    fn clear(&mut self) {
        self.commands.clear();
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn draw_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.commands.push(DrawCommand::Rect {
            origin,
            size,
            color,
        });
    }
}

fn draw_shape(renderer: &mut (impl Renderer + ?Sized), shape: &impl Shape) {
    renderer.draw_circle(shape.position(), shape.radius(), shape.color());
}

/// Draw one frame: walls, pellets, power pellets, pursuers, player
pub fn draw_session(session: &Session, renderer: &mut (impl Renderer + ?Sized)) {
    renderer.clear();
    for wall in &session.walls {
        renderer.draw_rect(wall.pos, Vec2::splat(wall.size), Color::Blue);
    }
    for pellet in &session.pellets {
        draw_shape(renderer, pellet);
    }
    for power_pellet in &session.power_pellets {
        draw_shape(renderer, power_pellet);
    }
    for pursuer in &session.pursuers {
        draw_shape(renderer, pursuer);
    }
    if let Some(player) = &session.player {
        draw_shape(renderer, player);
    }
}
