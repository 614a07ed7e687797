//! End-to-end conversion from descriptions to render buffers.

use std::time::Instant;

use linemesh_decode::{
    DecodeError, DecodeResult, Mesh, MeshDescription, RenderBuffer, decode_mesh, decompress_colors,
    decompress_mesh, resolve_references,
};
use rayon::prelude::*;

use crate::config::{ConverterConfig, FailurePolicy};
use crate::error::{Error, Result};
use crate::runtime::{JsonRuntimeFactory, RuntimeFactory, load_collection};

/// Output of converting a whole collection.
#[derive(Debug, Clone, Default)]
pub struct Conversion {
    /// Edges of every converted mesh, in mesh order.
    pub buffer: RenderBuffer,
    /// Meshes left out under [`FailurePolicy::Skip`], in mesh order.
    pub skipped: Vec<DecodeError>,
}

/// Converts mesh descriptions into render buffers.
pub struct Converter<F = JsonRuntimeFactory> {
    factory: F,
    config: ConverterConfig,
}

impl Converter<JsonRuntimeFactory> {
    /// Create a converter for JSON descriptions with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_factory(JsonRuntimeFactory)
    }
}

impl Default for Converter<JsonRuntimeFactory> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: RuntimeFactory> Converter<F> {
    /// Create a converter that executes descriptions with `factory`'s runtimes.
    pub fn with_factory(factory: F) -> Self {
        Self {
            factory,
            config: ConverterConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ConverterConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Execute a description and convert every mesh it defines.
    pub async fn convert(&self, description: &str) -> Result<Conversion> {
        let collection = load_collection(&self.factory, description).await?;
        self.convert_collection(&collection)
    }

    /// Execute a description and convert only the mesh at `mesh_id`.
    ///
    /// References are still resolved against the whole collection.
    pub async fn convert_mesh(&self, description: &str, mesh_id: usize) -> Result<RenderBuffer> {
        let collection = load_collection(&self.factory, description).await?;
        if mesh_id >= collection.len() {
            return Err(Error::MeshIndex {
                mesh_id,
                mesh_count: collection.len(),
            });
        }

        let resolved = resolve_references(&collection)?.swap_remove(mesh_id);
        let mesh = decompress_mesh(resolved);
        Ok(decode_one(mesh_id, &mesh)?)
    }

    /// Convert a collection that still needs reference resolution.
    ///
    /// A reference error fails the whole collection regardless of the
    /// failure policy.
    pub fn convert_collection(&self, collection: &[MeshDescription]) -> Result<Conversion> {
        let meshes = decompress_colors(resolve_references(collection)?);
        self.convert_meshes(&meshes)
    }

    /// Convert meshes that are already resolved and decompressed.
    pub fn convert_meshes(&self, meshes: &[Mesh]) -> Result<Conversion> {
        let start = Instant::now();

        let conversion = if self.config.parallel {
            let results: Vec<_> = meshes
                .par_iter()
                .enumerate()
                .map(|(mesh_index, mesh)| decode_one(mesh_index, mesh))
                .collect();
            self.concatenate(results)?
        } else {
            self.concatenate(
                meshes
                    .iter()
                    .enumerate()
                    .map(|(mesh_index, mesh)| decode_one(mesh_index, mesh)),
            )?
        };

        tracing::info!(
            "Created renderable: {} mesh(es), {} edges, {} skipped in {:?}",
            meshes.len(),
            conversion.buffer.edge_count(),
            conversion.skipped.len(),
            start.elapsed()
        );
        Ok(conversion)
    }

    fn concatenate(
        &self,
        results: impl IntoIterator<Item = DecodeResult<RenderBuffer>>,
    ) -> Result<Conversion> {
        let mut conversion = Conversion::default();
        for result in results {
            match result {
                Ok(mut buffer) => conversion.buffer.append(&mut buffer),
                Err(e) if self.config.failure_policy == FailurePolicy::Skip => {
                    tracing::warn!("Skipping mesh {}: {}", e.mesh_index(), e);
                    conversion.skipped.push(e);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(conversion)
    }
}

fn decode_one(mesh_index: usize, mesh: &Mesh) -> DecodeResult<RenderBuffer> {
    if mesh.colors.is_none() {
        tracing::warn!("No colors in mesh {mesh_index}, falling back to white");
    }
    decode_mesh(mesh_index, mesh)
}
