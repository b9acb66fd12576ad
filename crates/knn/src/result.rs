//! Neighbor records returned by [`KnnRegression::neighbors`](crate::KnnRegression::neighbors).

/// One selected training row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Row index into the training set.
    pub index: usize,
    /// Distance from the query.
    pub distance: f64,
    /// Training label of the row.
    pub label: f64,
}
