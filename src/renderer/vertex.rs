//! Vertex types for 2D rendering

use serde::{Deserialize, Serialize};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const WALL: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
    pub const PURSUER: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const PLAYER: [f32; 4] = [1.0, 0.84, 0.0, 1.0]; // Gold
    pub const PICKUP: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}
