//! Shape generation for 2D primitives
//!
//! Vertices are emitted in screen pixels; the pipeline maps them to NDC.

use glam::Vec2;

use super::vertex::Vertex;
use crate::sim::{DrawCommand, Rect};

/// Two triangles covering an axis-aligned rectangle
pub fn rect(r: &Rect, color: [f32; 4]) -> [Vertex; 6] {
    let min = Vec2::new(r.x as f32, r.y as f32);
    let max = Vec2::new(r.right() as f32, r.bottom() as f32);

    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Triangle list for a whole draw list, preserving paint order
pub fn draw_commands(commands: &[DrawCommand]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(commands.len() * 6);
    for command in commands {
        vertices.extend_from_slice(&rect(&command.rect, command.color.to_rgba_f32()));
    }
    vertices
}
