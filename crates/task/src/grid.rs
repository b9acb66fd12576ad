//! Handle to the surrounding compute grid.

/// Capability object for the compute grid a benchmark runs against.
///
/// Injected into [`BenchmarkTask`](crate::BenchmarkTask) at construction and
/// handed to the task body through its [`WorkerContext`](crate::WorkerContext).
pub trait Grid: Send + Sync {
    /// Identifier of the grid instance; prefixes worker names.
    fn instance_name(&self) -> &str;
}

/// A single-process grid with nothing but a name.
#[derive(Debug, Clone)]
pub struct LocalGrid {
    instance_name: String,
}

impl LocalGrid {
    /// Creates a local grid called `instance_name`.
    pub fn new(instance_name: impl Into<String>) -> Self {
        Self {
            instance_name: instance_name.into(),
        }
    }
}

impl Default for LocalGrid {
    fn default() -> Self {
        Self::new("local")
    }
}

impl Grid for LocalGrid {
    fn instance_name(&self) -> &str {
        &self.instance_name
    }
}
