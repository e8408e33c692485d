//! Triangle-list renderer
//!
//! Tessellates every primitive into [`Vertex`] triangles, ready to upload to
//! a GPU vertex buffer.

use glam::Vec2;

use super::shapes;
use super::vertex::Vertex;
use super::{Color, Renderer};

/// Accumulates a frame's triangles
#[derive(Debug, Clone, Default)]
pub struct MeshRenderer {
    vertices: Vec<Vertex>,
}

impl MeshRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Number of triangles in the current frame
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

impl Renderer for MeshRenderer {
    fn clear(&mut self) {
        self.vertices.clear();
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let segments = shapes::segments_for(radius);
        self.vertices
            .extend(shapes::circle(center, radius, color.rgba(), segments));
    }

    fn draw_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.vertices
            .extend(shapes::rect(origin, size, color.rgba()));
    }
}
