//! Line-list assembly.

use glam::Vec3;

use crate::colors::unpack_color;
use crate::error::DecodeResult;
use crate::validate::{ValidMesh, validate_mesh};
use crate::{FALLBACK_COLOR, Mesh, RenderBuffer, Vertex};

/// Emit every segment edge of a validated mesh.
///
/// A segment `[a, b, c]` becomes the edges `a-b` and `b-c`, so shared
/// vertices are duplicated once per edge. 2D vertices get `z = 0`.
///
/// Without a color table every endpoint is opaque white; with one, only
/// endpoints whose entry is absent fall back to white.
#[must_use]
pub fn assemble(mesh: ValidMesh<'_>) -> RenderBuffer {
    let mesh = mesh.mesh();
    let edges = mesh
        .segments
        .iter()
        .map(|segment| segment.len() - 1)
        .sum();
    let mut buffer = RenderBuffer::with_edge_capacity(edges);

    let endpoint = |index: usize| {
        let color = mesh
            .colors
            .as_ref()
            .and_then(|table| table.get(index))
            .unwrap_or(FALLBACK_COLOR);
        (position(&mesh.vertexes[index]), unpack_color(color))
    };

    for segment in &mesh.segments {
        for pair in segment.windows(2) {
            buffer.push_edge(endpoint(pair[0]), endpoint(pair[1]));
        }
    }

    buffer
}

/// Validate and assemble a single decoded mesh.
pub fn decode_mesh(mesh_index: usize, mesh: &Mesh) -> DecodeResult<RenderBuffer> {
    validate_mesh(mesh_index, mesh).map(assemble)
}

#[allow(clippy::cast_possible_truncation)]
fn position(vertex: &Vertex) -> Vec3 {
    let z = vertex.get(2).copied().unwrap_or(0.0);
    Vec3::new(vertex[0] as f32, vertex[1] as f32, z as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use crate::{ColorTable, Segment};
    use glam::Vec4;
    use proptest::prelude::*;

    #[test]
    fn polyline_yields_one_edge_per_pair() {
        let mesh = Mesh {
            vertexes: vec![vec![0.0, 0.0, 1.0], vec![1.0, 0.0, 2.0], vec![1.0, 1.0, 3.0]],
            segments: vec![vec![0, 1, 2]],
            colors: None,
        };

        let buffer = decode_mesh(0, &mesh).unwrap();
        assert_eq!(buffer.edge_count(), 2);
        assert_eq!(
            buffer.positions,
            vec![
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(1.0, 0.0, 2.0),
                Vec3::new(1.0, 0.0, 2.0),
                Vec3::new(1.0, 1.0, 3.0),
            ]
        );
    }

    #[test]
    fn flat_vertices_are_padded() {
        let mesh = Mesh {
            vertexes: vec![vec![2.0, 3.0], vec![4.0, 5.0]],
            segments: vec![vec![0, 1]],
            colors: None,
        };

        let buffer = decode_mesh(0, &mesh).unwrap();
        assert_eq!(buffer.position_floats(), vec![2.0, 3.0, 0.0, 4.0, 5.0, 0.0]);
    }

    #[test]
    fn uncolored_mesh_is_white() {
        let mesh = Mesh {
            vertexes: vec![vec![0.0, 0.0], vec![1.0, 0.0]],
            segments: vec![vec![0, 1, 0]],
            colors: None,
        };

        let buffer = decode_mesh(0, &mesh).unwrap();
        assert_eq!(buffer.colors, vec![Vec4::ONE; 4]);
    }

    #[test]
    fn table_colors_follow_endpoints() {
        let mesh = Mesh {
            vertexes: vec![vec![0.0, 0.0], vec![1.0, 0.0]],
            segments: vec![vec![1, 0]],
            colors: Some(ColorTable::from(vec![0xFF00_00FF_u32, 0x0000_FF80])),
        };

        let buffer = decode_mesh(0, &mesh).unwrap();
        assert_eq!(
            buffer.colors,
            vec![
                Vec4::new(0.0, 0.0, 1.0, 128.0 / 255.0),
                Vec4::new(1.0, 0.0, 0.0, 1.0),
            ]
        );
    }

    #[test]
    fn absent_entry_falls_back_per_endpoint() {
        let mesh = Mesh {
            vertexes: vec![vec![0.0, 0.0], vec![1.0, 0.0]],
            segments: vec![vec![0, 1]],
            colors: Some(ColorTable::from(vec![Some(0x0000_00FF_u32), None])),
        };

        let buffer = decode_mesh(0, &mesh).unwrap();
        assert_eq!(buffer.colors, vec![Vec4::new(0.0, 0.0, 0.0, 1.0), Vec4::ONE]);
    }

    #[test]
    fn segments_are_not_joined() {
        let mesh = Mesh {
            vertexes: vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![2.0, 0.0], vec![3.0, 0.0]],
            segments: vec![vec![0, 1], vec![2, 3]],
            colors: None,
        };

        let buffer = decode_mesh(0, &mesh).unwrap();
        assert_eq!(buffer.edge_count(), 2);
        assert_eq!(buffer.positions[1], Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(buffer.positions[2], Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn invalid_mesh_produces_no_buffer() {
        let mesh = Mesh {
            vertexes: vec![vec![0.0, 0.0]],
            segments: vec![vec![0]],
            colors: None,
        };

        assert_eq!(
            decode_mesh(3, &mesh),
            Err(DecodeError::DegenerateSegment {
                mesh_index: 3,
                segment_index: 0,
                len: 1,
            })
        );
    }

    fn flat_mesh() -> impl Strategy<Value = Mesh> {
        (1usize..32).prop_flat_map(|vertex_count| {
            let vertexes = prop::collection::vec(
                prop::collection::vec(-1000.0f64..1000.0, 2..=2),
                vertex_count,
            );
            let segment: BoxedStrategy<Segment> =
                prop::collection::vec(0..vertex_count, 2..8).boxed();
            let segments = prop::collection::vec(segment, 0..8);
            (vertexes, segments).prop_map(|(vertexes, segments)| Mesh {
                vertexes,
                segments,
                colors: None,
            })
        })
    }

    proptest! {
        #[test]
        fn uncolored_flat_meshes(mesh in flat_mesh()) {
            let buffer = decode_mesh(0, &mesh).unwrap();

            let edges: usize = mesh.segments.iter().map(|s| s.len() - 1).sum();
            prop_assert_eq!(buffer.edge_count(), edges);
            prop_assert_eq!(buffer.colors.len(), buffer.positions.len());
            prop_assert!(buffer.colors.iter().all(|&c| c == Vec4::ONE));
            prop_assert!(buffer.positions.iter().all(|p| p.z == 0.0));
        }
    }
}
