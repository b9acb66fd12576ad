//! Dedicated named worker threads.

use std::any::Any;
use std::thread;

use tracing::debug;

use crate::error::TaskError;
use crate::grid::Grid;

/// Capability passed to code running on a dedicated worker.
///
/// Only [`run_on_worker`] can create one, so a function that takes a
/// `&WorkerContext` can rely on running inside a named worker with access to
/// the grid.
#[derive(Clone, Copy)]
pub struct WorkerContext<'a> {
    name: &'a str,
    grid: &'a dyn Grid,
}

impl<'a> WorkerContext<'a> {
    /// Name of the worker thread.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// The grid this worker belongs to.
    pub fn grid(&self) -> &'a dyn Grid {
        self.grid
    }
}

impl std::fmt::Debug for WorkerContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerContext")
            .field("name", &self.name)
            .field("grid", &self.grid.instance_name())
            .finish()
    }
}

/// Runs `body` on a new thread called `name` and blocks until it finishes.
///
/// The body's own error is returned unchanged. A failure to spawn the thread
/// or a panic inside `body` is reported as [`TaskError::WorkerFailed`].
///
/// # Example
///
/// ```
/// use knnbench_task::{LocalGrid, run_on_worker};
///
/// let grid = LocalGrid::default();
/// let name = run_on_worker("local-demo", &grid, |_| {
///     Ok(std::thread::current().name().map(str::to_owned))
/// })
/// .unwrap();
/// assert_eq!(name.as_deref(), Some("local-demo"));
/// ```
pub fn run_on_worker<T, F>(name: &str, grid: &dyn Grid, body: F) -> Result<T, TaskError>
where
    T: Send,
    F: FnOnce(&WorkerContext<'_>) -> Result<T, TaskError> + Send,
{
    thread::scope(|s| {
        let handle = thread::Builder::new()
            .name(name.to_string())
            .spawn_scoped(s, move || {
                let ctx = WorkerContext { name, grid };
                debug!(worker = name, "worker started");
                body(&ctx)
            })
            .map_err(|e| TaskError::WorkerFailed {
                worker: name.to_string(),
                reason: e.to_string(),
            })?;

        match handle.join() {
            Ok(result) => result,
            Err(payload) => Err(TaskError::WorkerFailed {
                worker: name.to_string(),
                reason: panic_message(payload.as_ref()),
            }),
        }
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::LocalGrid;

    #[test]
    fn test_runs_on_named_thread() {
        let grid = LocalGrid::new("g1");
        let got = run_on_worker("g1-task", &grid, |w| {
            assert_eq!(w.name(), "g1-task");
            assert_eq!(w.grid().instance_name(), "g1");
            Ok(thread::current().name().map(str::to_owned))
        })
        .unwrap();
        assert_eq!(got.as_deref(), Some("g1-task"));
    }

    #[test]
    fn test_body_error_passes_through() {
        let grid = LocalGrid::default();
        let result: Result<(), _> = run_on_worker("w", &grid, |_| {
            Err(TaskError::InvalidConfig {
                reason: "nope".to_string(),
            })
        });
        assert!(matches!(result, Err(TaskError::InvalidConfig { .. })));
    }

    #[test]
    fn test_panic_becomes_worker_failed() {
        let grid = LocalGrid::default();
        let result: Result<(), _> = run_on_worker("w-panic", &grid, |_| panic!("kaboom"));
        match result {
            Err(TaskError::WorkerFailed { worker, reason }) => {
                assert_eq!(worker, "w-panic");
                assert!(reason.contains("kaboom"), "reason: {reason}");
            }
            other => panic!("expected WorkerFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_body_may_borrow_caller_state() {
        let grid = LocalGrid::default();
        let data = vec![1.0, 2.0, 3.0];
        let sum = run_on_worker("w", &grid, |_| Ok(data.iter().sum::<f64>())).unwrap();
        assert_eq!(sum, 6.0);
    }
}
