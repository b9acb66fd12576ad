//! Error types for the knnbench-knn crate.

/// Error type for all fallible operations in the knnbench-knn crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum KnnError {
    /// Returned when two feature vectors (or a query and the training set)
    /// disagree on dimensionality.
    #[error("feature length {got} does not match expected {expected}")]
    DimensionMismatch {
        /// Expected number of features.
        expected: usize,
        /// Length actually supplied.
        got: usize,
    },

    /// Returned when k is zero.
    #[error("k must be >= 1, got {k}")]
    InvalidK {
        /// The invalid k value.
        k: usize,
    },

    /// Returned when epsilon is non-finite or non-positive.
    #[error("epsilon must be finite and positive, got {epsilon}")]
    InvalidEpsilon {
        /// The invalid epsilon value.
        epsilon: f64,
    },

    /// Returned when a query contains NaN or infinity.
    #[error("non-finite value in {input}")]
    NonFiniteInput {
        /// Name of the input containing the non-finite value.
        input: &'static str,
    },

    /// Returned when a metric name is not recognised.
    #[error("unknown distance metric: {name:?}")]
    UnknownMetric {
        /// The unrecognised name.
        name: String,
    },

    /// Returned when a weighting strategy name is not recognised.
    #[error("unknown weighting strategy: {name:?}")]
    UnknownStrategy {
        /// The unrecognised name.
        name: String,
    },
}
