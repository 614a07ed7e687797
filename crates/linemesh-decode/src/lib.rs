//! Decode reference-compressed line mesh descriptions into render buffers.
//!
//! This crate provides pure synchronous functions that turn a declarative
//! mesh collection into flat position/color arrays laid out for line-list
//! rendering. Nothing here executes scripts or spawns threads; once a
//! collection is resolved, each mesh decodes on its own.
//!
//! # Design principles
//!
//! - **One type per stage**: references exist only in [`MeshDescription`],
//!   compressed colors only up to [`ResolvedMesh`]
//! - **Validation as a token**: [`assemble`] takes a [`ValidMesh`], so a
//!   mesh cannot be assembled without passing [`validate_mesh`]
//! - **Errors name the mesh**: every [`DecodeError`] carries its mesh index
//!
//! # Pipeline
//!
//! ```text
//! [MeshDescription] ─► resolve_references ─► [ResolvedMesh]
//!                   ─► decompress_colors  ─► [Mesh]
//!                   ─► validate_mesh      ─► ValidMesh
//!                   ─► assemble           ─► RenderBuffer
//! ```
//!
//! # Key functions
//!
//! - [`resolve_references`]: Substitute referenced fields from other meshes
//! - [`decompress_colors`]: Expand color schemes into per-vertex tables
//! - [`validate_mesh`]: Check vertex dimensions, segment lengths, table length
//! - [`assemble`]: Emit line endpoints and matching RGBA colors
//! - [`decompress_meshes`]: Resolve and decompress in one step

mod error;

pub mod assemble;
pub mod buffer;
pub mod colors;
pub mod references;
pub mod validate;

pub use assemble::{assemble, decode_mesh};
pub use buffer::RenderBuffer;
pub use colors::{decompress, decompress_colors, decompress_mesh, unpack_color};
pub use error::{DecodeError, DecodeResult, Field, ReferenceError, ReferenceErrorKind};
pub use references::resolve_references;
pub use validate::{ValidMesh, validate_mesh};

/// Color emitted for endpoints that have no color table entry (opaque white).
pub const FALLBACK_COLOR: u32 = 0xFFFF_FFFF;

/// A vertex position: `[x, y]` or `[x, y, z]`.
pub type Vertex = Vec<f64>;

/// A connected polyline given as indices into the owning mesh's vertexes.
pub type Segment = Vec<usize>;

/// A field that either carries its value or borrows the same-named field
/// of another mesh in the collection.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<T> {
    /// The value itself.
    Direct(T),
    /// Index of the mesh whose same-named field should be used.
    Reference(usize),
}

impl<T> FieldValue<T> {
    /// Returns the direct value, or `None` if this is a reference.
    pub fn as_direct(&self) -> Option<&T> {
        match self {
            Self::Direct(value) => Some(value),
            Self::Reference(_) => None,
        }
    }
}

impl<T> From<T> for FieldValue<T> {
    fn from(value: T) -> Self {
        Self::Direct(value)
    }
}

/// One entry of a compressed color scheme's selector list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// A single vertex index.
    Index(usize),
    /// An inclusive `[start, end]` vertex index range.
    Range(usize, usize),
}

/// Compressed color scheme: packed RGBA colors mapped to vertex selectors.
///
/// Entries keep the order they were declared in. When selectors overlap,
/// the entry applied last wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorScheme {
    pub entries: Vec<(u32, Vec<Selector>)>,
}

impl ColorScheme {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `color` onto `selectors`, after all previously added entries.
    #[must_use]
    pub fn with(mut self, color: u32, selectors: impl Into<Vec<Selector>>) -> Self {
        self.entries.push((color, selectors.into()));
        self
    }
}

/// Dense per-vertex color table. Absent entries fall back to opaque white.
///
/// A table decompressed from a scheme whose selectors reach past the vertex
/// list keeps only the entries inside the list but reports the length the
/// selectors imply, so it never matches its mesh's vertex count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorTable {
    entries: Vec<Option<u32>>,
    len: usize,
}

impl ColorTable {
    /// A table of `len` absent entries.
    #[must_use]
    pub fn absent(len: usize) -> Self {
        Self::from(vec![None::<u32>; len])
    }

    pub(crate) fn with_len(entries: Vec<Option<u32>>, len: usize) -> Self {
        debug_assert!(len >= entries.len());
        Self { entries, len }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Stored entries; shorter than [`len`](Self::len) for overlong schemes.
    #[must_use]
    pub fn entries(&self) -> &[Option<u32>] {
        &self.entries
    }

    /// Color at `index`, or `None` if absent or past the end.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<u32> {
        self.entries.get(index).copied().flatten()
    }
}

impl From<Vec<Option<u32>>> for ColorTable {
    fn from(entries: Vec<Option<u32>>) -> Self {
        let len = entries.len();
        Self { entries, len }
    }
}

impl From<Vec<u32>> for ColorTable {
    fn from(colors: Vec<u32>) -> Self {
        Self::from(colors.into_iter().map(Some).collect::<Vec<_>>())
    }
}

/// Colors as they appear in a description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Colors {
    /// Run-length style scheme that still needs decompressing.
    Compressed(ColorScheme),
    /// Already one entry per vertex.
    Dense(ColorTable),
}

/// A mesh as described, with fields possibly referencing other meshes.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshDescription {
    pub vertexes: FieldValue<Vec<Vertex>>,
    pub segments: FieldValue<Vec<Segment>>,
    pub colors: Option<FieldValue<Colors>>,
}

impl MeshDescription {
    /// Convert a description that contains no references.
    ///
    /// This is the entry point for collections that were resolved before
    /// reaching this crate. Any remaining reference is reported as
    /// [`ReferenceErrorKind::UnresolvedTarget`].
    pub fn into_resolved(self, mesh_index: usize) -> DecodeResult<ResolvedMesh> {
        let unresolved = |field, target| ReferenceError {
            mesh_index,
            field,
            target,
            kind: ReferenceErrorKind::UnresolvedTarget,
        };

        let vertexes = match self.vertexes {
            FieldValue::Direct(v) => v,
            FieldValue::Reference(t) => return Err(unresolved(Field::Vertexes, t).into()),
        };
        let segments = match self.segments {
            FieldValue::Direct(s) => s,
            FieldValue::Reference(t) => return Err(unresolved(Field::Segments, t).into()),
        };
        let colors = match self.colors {
            None => None,
            Some(FieldValue::Direct(c)) => Some(c),
            Some(FieldValue::Reference(t)) => return Err(unresolved(Field::Colors, t).into()),
        };

        Ok(ResolvedMesh {
            vertexes,
            segments,
            colors,
        })
    }
}

/// A mesh whose fields are all concrete; colors may still be compressed.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMesh {
    pub vertexes: Vec<Vertex>,
    pub segments: Vec<Segment>,
    pub colors: Option<Colors>,
}

/// A fully decoded mesh, ready for validation and assembly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertexes: Vec<Vertex>,
    pub segments: Vec<Segment>,
    pub colors: Option<ColorTable>,
}

/// Resolve references and decompress colors for a whole collection.
///
/// Resolution failures abort the whole collection; no partial result is
/// returned.
pub fn decompress_meshes(collection: &[MeshDescription]) -> DecodeResult<Vec<Mesh>> {
    let resolved = resolve_references(collection)?;
    Ok(decompress_colors(resolved))
}
