//! Converter configuration.

/// What to do when a single mesh fails validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failing mesh and return its error.
    #[default]
    Abort,
    /// Leave failing meshes out of the buffer and report them alongside it.
    Skip,
}

/// Settings for a [`Converter`](crate::Converter).
#[derive(Debug, Clone, Default)]
pub struct ConverterConfig {
    pub failure_policy: FailurePolicy,
    /// Assemble meshes on the rayon thread pool. Output order is unchanged.
    pub parallel: bool,
}

impl ConverterConfig {
    #[must_use]
    pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
