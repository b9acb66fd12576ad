//! In-place min-max feature normalization.

use tracing::debug;

use crate::dataset::LabeledDataset;

/// Per-column minimum and maximum observed before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct MinMaxStats {
    min: Vec<f64>,
    max: Vec<f64>,
}

impl MinMaxStats {
    /// Computes column minima and maxima over every row of `dataset`.
    pub fn compute(dataset: &LabeledDataset) -> Self {
        let n_features = dataset.n_features();
        let mut min = vec![f64::INFINITY; n_features];
        let mut max = vec![f64::NEG_INFINITY; n_features];
        for row in dataset.rows() {
            for (j, &x) in row.features.iter().enumerate() {
                min[j] = min[j].min(x);
                max[j] = max[j].max(x);
            }
        }
        Self { min, max }
    }

    /// Column minima.
    pub fn min(&self) -> &[f64] {
        &self.min
    }

    /// Column maxima.
    pub fn max(&self) -> &[f64] {
        &self.max
    }

    /// Returns `true` if column `j` holds a single repeated value.
    pub fn is_constant(&self, j: usize) -> bool {
        self.max[j] == self.min[j]
    }
}

/// Rescales every feature column of `dataset` to `[0, 1]` in place.
///
/// ```text
/// x_ij = (x_ij − min_j) / (max_j − min_j)
/// ```
///
/// A constant column (`max_j == min_j`) has no spread to divide by; every
/// value in it is set to exactly `0.0`. Labels are left untouched.
///
/// Returns the statistics that were applied.
///
/// # Example
///
/// ```
/// use knnbench_dataset::{LabeledDataset, normalize_min_max};
///
/// let mut ds = LabeledDataset::from_rows(
///     &[vec![5.0, 0.0], vec![5.0, 5.0], vec![5.0, 10.0]],
///     &[1.0, 2.0, 3.0],
/// ).unwrap();
/// normalize_min_max(&mut ds);
/// assert_eq!(ds.features(), &[0.0, 0.0, 0.0, 0.5, 0.0, 1.0]);
/// ```
#[tracing::instrument(skip_all, fields(n_rows = dataset.n_rows(), n_features = dataset.n_features()))]
pub fn normalize_min_max(dataset: &mut LabeledDataset) -> MinMaxStats {
    let stats = MinMaxStats::compute(dataset);
    let n_features = dataset.n_features();

    for j in 0..n_features {
        if stats.is_constant(j) {
            debug!(column = j, value = stats.min[j], "constant column normalized to zero");
        }
    }

    for row in dataset.features_mut().chunks_exact_mut(n_features) {
        for (j, x) in row.iter_mut().enumerate() {
            *x = if stats.is_constant(j) {
                0.0
            } else {
                unit_scale(*x, stats.min[j], stats.max[j])
            };
        }
    }

    stats
}

/// `(x - min) / (max - min)` clamped to `[0, 1]`, for `min <= x <= max`
/// and `min < max`.
///
/// A range wider than `f64::MAX` is computed on halved operands so that it
/// stays finite.
fn unit_scale(x: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    let t = if range.is_finite() {
        (x - min) / range
    } else {
        (x / 2.0 - min / 2.0) / (max / 2.0 - min / 2.0)
    };
    t.clamp(0.0, 1.0)
}
