//! Error types for the knnbench-task crate.

use knnbench_dataset::DatasetError;
use knnbench_knn::KnnError;

/// Error type for benchmark task construction and execution.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TaskError {
    /// A dataset stage (load, normalize, split) failed.
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// Model construction or prediction failed.
    #[error(transparent)]
    Knn(#[from] KnnError),

    /// The dedicated worker could not be started or terminated abnormally.
    #[error("worker '{worker}' failed: {reason}")]
    WorkerFailed {
        /// Name of the worker thread.
        worker: String,
        /// Spawn error or panic message.
        reason: String,
    },

    /// The task configuration is unusable.
    #[error("invalid task configuration: {reason}")]
    InvalidConfig {
        /// What is wrong with it.
        reason: String,
    },
}
