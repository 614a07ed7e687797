//! Decode errors.

use std::fmt;

use thiserror::Error;

/// Result type for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// A referenceable mesh field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Vertexes,
    Segments,
    Colors,
}

impl Field {
    /// Name of the field as written in a description.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Vertexes => "vertexes",
            Self::Segments => "segments",
            Self::Colors => "colors",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a reference could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReferenceErrorKind {
    #[error("target mesh is out of range")]
    OutOfRange,
    #[error("target field is missing or is itself a reference")]
    UnresolvedTarget,
}

/// A field reference that could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("mesh {mesh_index} field `{field}` references mesh {target}: {kind}")]
pub struct ReferenceError {
    /// Mesh holding the reference.
    pub mesh_index: usize,
    pub field: Field,
    /// Referenced mesh index.
    pub target: usize,
    pub kind: ReferenceErrorKind,
}

/// Errors that can occur while decoding a mesh collection.
///
/// Reference errors are fatal for the whole collection; the remaining
/// variants apply to the single mesh named by `mesh_index`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Reference(#[from] ReferenceError),

    #[error("mesh {mesh_index}: color table has {colors} entries but mesh has {vertexes} vertexes")]
    ColorLengthMismatch {
        mesh_index: usize,
        colors: usize,
        vertexes: usize,
    },

    #[error("mesh {mesh_index}: segment {segment_index} has {len} index(es), need at least 2")]
    DegenerateSegment {
        mesh_index: usize,
        segment_index: usize,
        len: usize,
    },

    #[error("mesh {mesh_index}: vertex {vertex_index} has {dimension} coordinates, expected 2 or 3")]
    InvalidVertexDimension {
        mesh_index: usize,
        vertex_index: usize,
        dimension: usize,
    },

    #[error(
        "mesh {mesh_index}: segment {segment_index} uses vertex {vertex_index} but mesh has {vertex_count} vertexes"
    )]
    VertexOutOfRange {
        mesh_index: usize,
        segment_index: usize,
        vertex_index: usize,
        vertex_count: usize,
    },
}

impl DecodeError {
    /// Index of the mesh the error was raised for.
    #[must_use]
    pub fn mesh_index(&self) -> usize {
        match self {
            Self::Reference(e) => e.mesh_index,
            Self::ColorLengthMismatch { mesh_index, .. }
            | Self::DegenerateSegment { mesh_index, .. }
            | Self::InvalidVertexDimension { mesh_index, .. }
            | Self::VertexOutOfRange { mesh_index, .. } => *mesh_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_error_message() {
        let err = DecodeError::from(ReferenceError {
            mesh_index: 2,
            field: Field::Vertexes,
            target: 9,
            kind: ReferenceErrorKind::OutOfRange,
        });
        assert_eq!(
            err.to_string(),
            "mesh 2 field `vertexes` references mesh 9: target mesh is out of range"
        );
        assert_eq!(err.mesh_index(), 2);
    }
}
