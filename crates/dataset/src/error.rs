//! Error types for the knnbench-dataset crate.

/// Error type for all fallible operations in the knnbench-dataset crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DatasetError {
    /// Returned when a dataset would contain no rows.
    #[error("dataset has no rows")]
    Empty,

    /// Returned when the feature dimensionality is zero.
    #[error("n_features must be >= 1")]
    ZeroFeatures,

    /// Returned when the flat feature buffer is not `n_rows × n_features`.
    #[error("features length {len} is not divisible by n_features {n_features}")]
    ShapeMismatch {
        /// Length of the flat feature buffer.
        len: usize,
        /// Expected number of features per row.
        n_features: usize,
    },

    /// Returned when a row's feature vector has the wrong length.
    #[error("row {row} has {got} features, expected {expected}")]
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Expected number of features.
        expected: usize,
        /// Actual number of features.
        got: usize,
    },

    /// Returned when the number of labels does not match the number of rows.
    #[error("{labels} labels for {rows} rows")]
    LabelCountMismatch {
        /// Number of labels supplied.
        labels: usize,
        /// Number of feature rows.
        rows: usize,
    },

    /// Returned when features or labels contain NaN or infinity.
    #[error("non-finite value in {input}")]
    NonFiniteInput {
        /// Name of the input containing the non-finite value.
        input: &'static str,
    },

    /// Returned when the test fraction is outside the open interval (0, 1).
    #[error("test fraction must be in (0, 1), got {fraction}")]
    InvalidFraction {
        /// The invalid fraction.
        fraction: f64,
    },

    /// Returned when a split would leave the train or test side without rows.
    #[error("splitting {n_rows} rows with {n_test} test rows leaves an empty partition")]
    EmptyPartition {
        /// Rows in the source dataset.
        n_rows: usize,
        /// Rows assigned to the test side.
        n_test: usize,
    },

    /// Returned when a synthetic source is asked for a degenerate shape.
    #[error("invalid source shape: {reason}")]
    InvalidSourceShape {
        /// Why the shape was rejected.
        reason: String,
    },
}
