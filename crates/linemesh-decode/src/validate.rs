//! Mesh validation.

use crate::Mesh;
use crate::error::{DecodeError, DecodeResult};

/// A mesh that passed [`validate_mesh`].
///
/// Every segment index is in range and every vertex has 2 or 3
/// coordinates, so assembly can index freely.
#[derive(Debug, Clone, Copy)]
pub struct ValidMesh<'a> {
    mesh: &'a Mesh,
}

impl<'a> ValidMesh<'a> {
    #[must_use]
    pub fn mesh(&self) -> &'a Mesh {
        self.mesh
    }
}

/// Check a decoded mesh before assembly.
///
/// Checks run in this order and stop at the first violation:
///
/// 1. The color table, if any, has one entry per vertex.
/// 2. Every segment has at least 2 indices, all within the vertex list.
/// 3. Every vertex has 2 or 3 coordinates.
///
/// # Arguments
///
/// * `mesh_index` - Position of the mesh in its collection, for error context
/// * `mesh` - The decoded mesh
pub fn validate_mesh(mesh_index: usize, mesh: &Mesh) -> DecodeResult<ValidMesh<'_>> {
    let vertex_count = mesh.vertexes.len();

    if let Some(colors) = mesh.colors.as_ref().filter(|c| c.len() != vertex_count) {
        return Err(DecodeError::ColorLengthMismatch {
            mesh_index,
            colors: colors.len(),
            vertexes: vertex_count,
        });
    }

    for (segment_index, segment) in mesh.segments.iter().enumerate() {
        if segment.len() < 2 {
            return Err(DecodeError::DegenerateSegment {
                mesh_index,
                segment_index,
                len: segment.len(),
            });
        }
        if let Some(&vertex_index) = segment.iter().find(|&&i| i >= vertex_count) {
            return Err(DecodeError::VertexOutOfRange {
                mesh_index,
                segment_index,
                vertex_index,
                vertex_count,
            });
        }
    }

    if let Some((vertex_index, vertex)) = mesh
        .vertexes
        .iter()
        .enumerate()
        .find(|(_, v)| !matches!(v.len(), 2 | 3))
    {
        return Err(DecodeError::InvalidVertexDimension {
            mesh_index,
            vertex_index,
            dimension: vertex.len(),
        });
    }

    Ok(ValidMesh { mesh })
}
