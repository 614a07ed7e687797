//! Script runtime boundary.
//!
//! Descriptions are programs: a runtime executes one and hands back the
//! mesh collection it produced. The runtime is only a data source. Each
//! load gets a fresh instance that is closed as soon as the collection is
//! extracted, on every exit path.

use std::future::Future;
use std::ops::{Deref, DerefMut};
use std::time::Instant;

use linemesh_decode::MeshDescription;

use crate::description::collection_from_value;
use crate::error::ScriptError;

/// Executes a description and returns the mesh collection it defines.
pub trait ScriptRuntime {
    /// Execute `description` and extract its mesh collection.
    fn execute(
        &mut self,
        description: &str,
    ) -> impl Future<Output = Result<Vec<MeshDescription>, ScriptError>> + Send;

    /// Release the runtime. Called exactly once, after the last `execute`.
    fn close(&mut self);
}

/// Creates a fresh [`ScriptRuntime`] for each load.
pub trait RuntimeFactory {
    type Runtime: ScriptRuntime;

    fn create(&self) -> Result<Self::Runtime, ScriptError>;
}

/// Closes the wrapped runtime when dropped.
struct RuntimeGuard<R: ScriptRuntime>(R);

impl<R: ScriptRuntime> Deref for RuntimeGuard<R> {
    type Target = R;

    fn deref(&self) -> &R {
        &self.0
    }
}

impl<R: ScriptRuntime> DerefMut for RuntimeGuard<R> {
    fn deref_mut(&mut self) -> &mut R {
        &mut self.0
    }
}

impl<R: ScriptRuntime> Drop for RuntimeGuard<R> {
    fn drop(&mut self) {
        self.0.close();
    }
}

/// Execute `description` in a fresh runtime and return its mesh collection.
///
/// The runtime is closed before this returns, whether execution succeeded
/// or not, and also if the returned future is dropped mid-execution.
pub async fn load_collection<F: RuntimeFactory>(
    factory: &F,
    description: &str,
) -> Result<Vec<MeshDescription>, ScriptError> {
    let start = Instant::now();
    let mut runtime = RuntimeGuard(factory.create()?);
    let result = runtime.execute(description).await;
    drop(runtime);

    match &result {
        Ok(collection) => tracing::debug!(
            "Parsed description: {} mesh(es) in {:?}",
            collection.len(),
            start.elapsed()
        ),
        Err(e) => tracing::debug!("Description failed after {:?}: {}", start.elapsed(), e),
    }
    result
}

/// Runtime for descriptions that are already plain JSON data.
///
/// The document is either an array of meshes or an object with a `meshes`
/// array, matching what a scripting runtime returns after executing a
/// description.
#[derive(Debug, Default)]
pub struct JsonRuntime {
    closed: bool,
}

impl JsonRuntime {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl ScriptRuntime for JsonRuntime {
    async fn execute(&mut self, description: &str) -> Result<Vec<MeshDescription>, ScriptError> {
        if self.closed {
            return Err(ScriptError::Closed);
        }
        let value: serde_json::Value = serde_json::from_str(description)
            .map_err(|e| ScriptError::Execution(e.to_string()))?;
        Ok(collection_from_value(&value)?)
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

/// Factory for [`JsonRuntime`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRuntimeFactory;

impl RuntimeFactory for JsonRuntimeFactory {
    type Runtime = JsonRuntime;

    fn create(&self) -> Result<JsonRuntime, ScriptError> {
        Ok(JsonRuntime::new())
    }
}
