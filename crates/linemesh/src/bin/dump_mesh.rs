//! Convert a JSON mesh description and print a summary of the render buffer.
//!
//! Useful for cross-checking descriptions against another renderer.
//!
//! Run: `cargo run -p linemesh --features test-tools --bin dump_mesh -- <description.json> [mesh_id]`
//!
//! Without a mesh id the whole scene is converted and failing meshes are
//! skipped; with one only that mesh is converted.

use std::env;
use std::path::Path;

use linemesh::{Converter, ConverterConfig, FailurePolicy, RenderBuffer};

const PREVIEW_ENDPOINTS: usize = 8;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let Some(path) = args.get(1) else {
        eprintln!("usage: dump_mesh <description.json> [mesh_id]");
        std::process::exit(2);
    };
    let mesh_id = args.get(2).map(|id| id.parse::<usize>()).transpose()?;

    let description = tokio::fs::read_to_string(Path::new(path)).await?;
    let converter = Converter::new()
        .with_config(ConverterConfig::default().with_failure_policy(FailurePolicy::Skip));

    let summary = match mesh_id {
        Some(mesh_id) => {
            let buffer = converter.convert_mesh(&description, mesh_id).await?;
            let mut summary = summarize(&buffer);
            summary["mesh_id"] = mesh_id.into();
            summary
        }
        None => {
            let conversion = converter.convert(&description).await?;
            let mut summary = summarize(&conversion.buffer);
            summary["skipped"] = conversion
                .skipped
                .iter()
                .map(|e| serde_json::json!({ "mesh": e.mesh_index(), "error": e.to_string() }))
                .collect();
            summary
        }
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn summarize(buffer: &RenderBuffer) -> serde_json::Value {
    serde_json::json!({
        "edge_count": buffer.edge_count(),
        "vertex_count": buffer.vertex_count(),
        "first_positions": buffer
            .positions
            .iter()
            .take(PREVIEW_ENDPOINTS)
            .map(|p| p.to_array().to_vec())
            .collect::<Vec<_>>(),
        "first_colors": buffer
            .colors
            .iter()
            .take(PREVIEW_ENDPOINTS)
            .map(|c| c.to_array().to_vec())
            .collect::<Vec<_>>()
    })
}
