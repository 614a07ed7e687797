//! Convert scripted line mesh descriptions into line-list render buffers.
//!
//! A description is executed by a [`ScriptRuntime`], which hands back the
//! nested mesh data it produced. That data is read into typed
//! [`MeshDescription`]s, then resolved, decompressed, validated and
//! assembled by [`linemesh_decode`].
//!
//! # Example
//!
//! ```no_run
//! use linemesh::Converter;
//!
//! # async fn example() -> Result<(), linemesh::Error> {
//! let converter = Converter::new();
//! let description = r#"{"meshes": [{"vertexes": [[0, 0], [1, 1]], "segments": [[0, 1]]}]}"#;
//! let conversion = converter.convert(description).await?;
//! println!("{} edges", conversion.buffer.edge_count());
//! # Ok(())
//! # }
//! ```

mod config;
mod converter;
mod description;
mod error;
mod runtime;

pub use config::{ConverterConfig, FailurePolicy};
pub use converter::{Conversion, Converter};
pub use description::{DescriptionError, collection_from_value};
pub use error::{Error, Result, ScriptError};
pub use runtime::{JsonRuntime, JsonRuntimeFactory, RuntimeFactory, ScriptRuntime, load_collection};

// Re-export decode types for convenience.
pub use linemesh_decode::{
    ColorScheme, ColorTable, Colors, DecodeError, FieldValue, Mesh, MeshDescription,
    ReferenceError, ReferenceErrorKind, RenderBuffer, ResolvedMesh, Selector,
};
