//! Error types.

use linemesh_decode::DecodeError;
use thiserror::Error;

use crate::description::DescriptionError;

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while obtaining a mesh collection from a description.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to start script runtime: {0}")]
    Startup(String),

    #[error("failed to execute description: {0}")]
    Execution(String),

    #[error("script runtime was already closed")]
    Closed,

    #[error(transparent)]
    Description(#[from] DescriptionError),
}

/// Errors that can occur during conversion.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("mesh {mesh_id} requested but the description has {mesh_count} mesh(es)")]
    MeshIndex { mesh_id: usize, mesh_count: usize },
}
