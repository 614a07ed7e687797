//! Render buffer output.

use glam::{Vec3, Vec4};

/// Line-list geometry: every consecutive pair of positions is one edge.
///
/// `colors[i]` is the RGBA color of `positions[i]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderBuffer {
    pub positions: Vec<Vec3>,
    pub colors: Vec<Vec4>,
}

impl RenderBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with room for `edges` edges.
    #[must_use]
    pub fn with_edge_capacity(edges: usize) -> Self {
        Self {
            positions: Vec::with_capacity(edges * 2),
            colors: Vec::with_capacity(edges * 2),
        }
    }

    /// Push one edge from `a` to `b`.
    pub fn push_edge(&mut self, a: (Vec3, Vec4), b: (Vec3, Vec4)) {
        self.positions.extend([a.0, b.0]);
        self.colors.extend([a.1, b.1]);
    }

    /// Append another buffer's edges after this buffer's edges.
    pub fn append(&mut self, other: &mut Self) {
        self.positions.append(&mut other.positions);
        self.colors.append(&mut other.colors);
    }

    /// Number of emitted endpoints.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.positions.len() / 2
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Positions flattened to `[x, y, z, x, y, z, ...]` (item size 3).
    #[must_use]
    pub fn position_floats(&self) -> Vec<f32> {
        self.positions.iter().flat_map(Vec3::to_array).collect()
    }

    /// Colors flattened to `[r, g, b, a, r, g, b, a, ...]` (item size 4).
    #[must_use]
    pub fn color_floats(&self) -> Vec<f32> {
        self.colors.iter().flat_map(Vec4::to_array).collect()
    }
}
