//! Row-major labeled dataset.

use crate::error::DatasetError;

/// A borrowed view of one dataset row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Row<'a> {
    /// Feature vector of length `n_features`.
    pub features: &'a [f64],
    /// Regression target.
    pub label: f64,
}

/// An ordered set of rows, each with a fixed-length feature vector and a label.
///
/// Features are stored row-major in one flat buffer of
/// `n_rows × n_features` values. A dataset always has at least one row and
/// at least one feature, and every value is finite.
///
/// # Example
///
/// ```
/// use knnbench_dataset::LabeledDataset;
///
/// let ds = LabeledDataset::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]], &[10.0, 20.0]).unwrap();
/// assert_eq!(ds.n_rows(), 2);
/// assert_eq!(ds.row(1).features, &[3.0, 4.0]);
/// assert_eq!(ds.row(1).label, 20.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledDataset {
    features: Vec<f64>,
    labels: Vec<f64>,
    n_features: usize,
}

impl LabeledDataset {
    /// Creates a dataset from a flat row-major feature buffer and one label per row.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if the dataset is empty, the buffer shape is
    /// inconsistent, or any value is non-finite.
    pub fn new(
        features: Vec<f64>,
        n_features: usize,
        labels: Vec<f64>,
    ) -> Result<Self, DatasetError> {
        if n_features == 0 {
            return Err(DatasetError::ZeroFeatures);
        }
        if labels.is_empty() || features.is_empty() {
            return Err(DatasetError::Empty);
        }
        if !features.len().is_multiple_of(n_features) {
            return Err(DatasetError::ShapeMismatch {
                len: features.len(),
                n_features,
            });
        }
        let rows = features.len() / n_features;
        if labels.len() != rows {
            return Err(DatasetError::LabelCountMismatch {
                labels: labels.len(),
                rows,
            });
        }
        if features.iter().any(|v| !v.is_finite()) {
            return Err(DatasetError::NonFiniteInput { input: "features" });
        }
        if labels.iter().any(|v| !v.is_finite()) {
            return Err(DatasetError::NonFiniteInput { input: "labels" });
        }

        Ok(Self {
            features,
            labels,
            n_features,
        })
    }

    /// Creates a dataset from per-row feature vectors.
    ///
    /// The feature dimensionality is taken from the first row.
    pub fn from_rows(rows: &[Vec<f64>], labels: &[f64]) -> Result<Self, DatasetError> {
        let n_features = rows.first().ok_or(DatasetError::Empty)?.len();
        let mut features = Vec::with_capacity(rows.len() * n_features);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n_features {
                return Err(DatasetError::RaggedRow {
                    row: i,
                    expected: n_features,
                    got: row.len(),
                });
            }
            features.extend_from_slice(row);
        }
        Self::new(features, n_features, labels.to_vec())
    }

    /// Builds a new dataset from the given rows of `self`, in the given order.
    ///
    /// Indices must be in range; an empty index list is rejected.
    pub fn select(&self, indices: &[usize]) -> Result<Self, DatasetError> {
        if indices.is_empty() {
            return Err(DatasetError::Empty);
        }
        let mut features = Vec::with_capacity(indices.len() * self.n_features);
        let mut labels = Vec::with_capacity(indices.len());
        for &i in indices {
            features.extend_from_slice(self.features_of(i));
            labels.push(self.labels[i]);
        }
        Ok(Self {
            features,
            labels,
            n_features: self.n_features,
        })
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.labels.len()
    }

    /// Feature dimensionality.
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Returns row `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= n_rows()`.
    pub fn row(&self, i: usize) -> Row<'_> {
        Row {
            features: self.features_of(i),
            label: self.labels[i],
        }
    }

    /// Iterates over all rows in order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = Row<'_>> + '_ {
        self.features
            .chunks_exact(self.n_features)
            .zip(self.labels.iter())
            .map(|(features, &label)| Row { features, label })
    }

    /// Flat row-major feature buffer.
    pub fn features(&self) -> &[f64] {
        &self.features
    }

    /// Labels, one per row.
    pub fn labels(&self) -> &[f64] {
        &self.labels
    }

    /// Feature values of column `j`, one per row.
    pub fn column(&self, j: usize) -> impl Iterator<Item = f64> + '_ {
        self.features.iter().skip(j).step_by(self.n_features).copied()
    }

    pub(crate) fn features_mut(&mut self) -> &mut [f64] {
        &mut self.features
    }

    fn features_of(&self, i: usize) -> &[f64] {
        &self.features[i * self.n_features..(i + 1) * self.n_features]
    }
}
