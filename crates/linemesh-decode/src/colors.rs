//! Color scheme decompression and packed color unpacking.

use glam::Vec4;

use crate::{ColorScheme, ColorTable, Colors, Mesh, ResolvedMesh, Selector};

/// Expand a color scheme into a dense per-vertex table.
///
/// The table stores `vertex_count` entries. Entries no selector touches
/// stay absent. A selector that reaches past the vertex list is not stored;
/// instead the table's length grows to cover it (saturating at
/// `usize::MAX`), so validation reports the mismatch.
///
/// Scheme entries are applied in order and later writes win. A range whose
/// start is after its end selects nothing.
#[must_use]
pub fn decompress(scheme: &ColorScheme, vertex_count: usize) -> ColorTable {
    let mut entries = vec![None; vertex_count];
    let mut len = vertex_count;

    for (color, selectors) in &scheme.entries {
        for selector in selectors {
            let (start, end) = match *selector {
                Selector::Index(index) => (index, index),
                Selector::Range(start, end) if start <= end => (start, end),
                Selector::Range(..) => continue,
            };
            len = len.max(end.saturating_add(1));
            if start < vertex_count {
                entries[start..=end.min(vertex_count - 1)].fill(Some(*color));
            }
        }
    }

    ColorTable::with_len(entries, len)
}

/// Replace a resolved mesh's colors with a dense table.
///
/// Meshes without colors pass through with no table; already dense tables
/// are kept as they are.
#[must_use]
pub fn decompress_mesh(mesh: ResolvedMesh) -> Mesh {
    let colors = mesh.colors.map(|colors| match colors {
        Colors::Compressed(scheme) => decompress(&scheme, mesh.vertexes.len()),
        Colors::Dense(table) => table,
    });

    Mesh {
        vertexes: mesh.vertexes,
        segments: mesh.segments,
        colors,
    }
}

/// Decompress the colors of every mesh in a resolved collection.
#[must_use]
pub fn decompress_colors(collection: Vec<ResolvedMesh>) -> Vec<Mesh> {
    collection.into_iter().map(decompress_mesh).collect()
}

/// Unpack a `0xRRGGBBAA` color into normalized RGBA floats.
#[must_use]
pub fn unpack_color(color: u32) -> Vec4 {
    Vec4::from_array(color.to_be_bytes().map(|byte| f32::from(byte) / 255.0))
}
