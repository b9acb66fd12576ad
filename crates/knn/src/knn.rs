//! kNN regression model and scratch buffer management.

use knnbench_dataset::LabeledDataset;
use tracing::debug;

use crate::config::{KnnConfig, Strategy};
use crate::distance::{MetricFn, distances_to};
use crate::error::KnnError;
use crate::result::Neighbor;
use crate::select::select_k_nearest;

/// Pre-allocated scratch buffers for kNN queries.
///
/// Reuse across calls to [`KnnRegression::predict_with_scratch`] to avoid
/// per-query heap allocation when predicting a whole test set.
///
/// # Example
///
/// ```
/// use knnbench_knn::KnnScratch;
///
/// let mut scratch = KnnScratch::new(200);
/// // Use with KnnRegression::predict_with_scratch() in a loop...
/// ```
#[derive(Debug, Clone, Default)]
pub struct KnnScratch {
    /// Distance from the query to every training row.
    pub(crate) dists: Vec<f64>,
    /// (distance, index) pairs for selection.
    pub(crate) pairs: Vec<(f64, usize)>,
    /// Indices of the k nearest rows.
    pub(crate) nn_indices: Vec<usize>,
    /// Distances of the k nearest rows.
    pub(crate) nn_dists: Vec<f64>,
}

impl KnnScratch {
    /// Creates a new scratch buffer with capacity for `max_rows` training rows.
    pub fn new(max_rows: usize) -> Self {
        Self {
            dists: Vec::with_capacity(max_rows),
            pairs: Vec::with_capacity(max_rows),
            nn_indices: Vec::with_capacity(max_rows),
            nn_dists: Vec::with_capacity(max_rows),
        }
    }
}

/// Distance-weighted k-nearest-neighbor regression over an owned training set.
///
/// The model is immutable after construction; [`predict`](Self::predict)
/// only reads the training data, so one model can serve queries from several
/// threads at once.
///
/// # Example
///
/// ```
/// use knnbench_dataset::LabeledDataset;
/// use knnbench_knn::{KnnConfig, KnnRegression, Strategy, distance::manhattan};
///
/// let train = LabeledDataset::from_rows(&[vec![0.0], vec![10.0]], &[10.0, 20.0]).unwrap();
/// let config = KnnConfig::new(2).with_strategy(Strategy::Unweighted);
/// let model = KnnRegression::new(train, manhattan, config).unwrap();
///
/// assert_eq!(model.predict(&[0.0]).unwrap(), 15.0);
/// ```
#[derive(Debug, Clone)]
pub struct KnnRegression {
    train: LabeledDataset,
    metric: MetricFn,
    config: KnnConfig,
}

impl KnnRegression {
    /// Builds a model that owns `train`.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError`] if `config` is invalid.
    pub fn new(
        train: LabeledDataset,
        metric: MetricFn,
        config: KnnConfig,
    ) -> Result<Self, KnnError> {
        config.validate()?;
        debug!(
            n_train = train.n_rows(),
            n_features = train.n_features(),
            k = config.k(),
            strategy = %config.strategy(),
            "built kNN regression model"
        );
        Ok(Self {
            train,
            metric,
            config,
        })
    }

    /// The training set.
    pub fn train(&self) -> &LabeledDataset {
        &self.train
    }

    /// The model configuration.
    pub fn config(&self) -> &KnnConfig {
        &self.config
    }

    /// Feature dimensionality queries must have.
    pub fn n_features(&self) -> usize {
        self.train.n_features()
    }

    /// Number of neighbors actually combined: `min(k, n_train)`.
    pub fn k_eff(&self) -> usize {
        self.config.k().min(self.train.n_rows())
    }

    /// Predicts the label for `features`.
    ///
    /// # Errors
    ///
    /// - [`KnnError::DimensionMismatch`] if `features.len() != n_features()`.
    /// - [`KnnError::NonFiniteInput`] if `features` contains NaN or infinity.
    pub fn predict(&self, features: &[f64]) -> Result<f64, KnnError> {
        let mut scratch = KnnScratch::new(self.train.n_rows());
        self.predict_with_scratch(features, &mut scratch)
    }

    /// Predicts the label for `features`, reusing `scratch`.
    ///
    /// Identical to [`predict`](Self::predict) but avoids heap allocation.
    /// Buffers grow as needed and never shrink.
    pub fn predict_with_scratch(
        &self,
        features: &[f64],
        scratch: &mut KnnScratch,
    ) -> Result<f64, KnnError> {
        self.search(features, scratch)?;
        let labels = self.train.labels();

        let prediction = match self.config.strategy() {
            Strategy::Unweighted => {
                let sum: f64 = scratch.nn_indices.iter().map(|&i| labels[i]).sum();
                sum / scratch.nn_indices.len() as f64
            }
            Strategy::Weighted => weighted_mean(
                &scratch.nn_indices,
                &scratch.nn_dists,
                labels,
                self.config.epsilon(),
            ),
        };
        Ok(prediction)
    }

    /// Returns the `k_eff` nearest training rows, closest first.
    pub fn neighbors(&self, features: &[f64]) -> Result<Vec<Neighbor>, KnnError> {
        let mut scratch = KnnScratch::new(self.train.n_rows());
        self.search(features, &mut scratch)?;
        let labels = self.train.labels();
        Ok(scratch
            .nn_indices
            .iter()
            .zip(scratch.nn_dists.iter())
            .map(|(&index, &distance)| Neighbor {
                index,
                distance,
                label: labels[index],
            })
            .collect())
    }

    /// Validates the query and fills `scratch.nn_*` with the nearest rows.
    fn search(&self, features: &[f64], scratch: &mut KnnScratch) -> Result<(), KnnError> {
        if features.len() != self.n_features() {
            return Err(KnnError::DimensionMismatch {
                expected: self.n_features(),
                got: features.len(),
            });
        }
        if features.iter().any(|v| !v.is_finite()) {
            return Err(KnnError::NonFiniteInput { input: "query" });
        }

        scratch.dists.clear();
        scratch.dists.resize(self.train.n_rows(), 0.0);
        distances_to(self.train.features(), features, self.metric, &mut scratch.dists);

        select_k_nearest(
            &scratch.dists,
            self.k_eff(),
            &mut scratch.pairs,
            &mut scratch.nn_indices,
            &mut scratch.nn_dists,
        );
        Ok(())
    }
}

/// Inverse-distance weighted mean of the selected labels.
///
/// Each weight `1 / (d + eps)` is scaled by the nearest neighbor's weight.
/// The mean is unchanged and every scaled weight lies in `(0, 1]`.
/// `nn_dists` must be ascending and non-empty.
fn weighted_mean(nn_indices: &[usize], nn_dists: &[f64], labels: &[f64], eps: f64) -> f64 {
    let nearest = nn_dists.first().copied().unwrap_or(0.0) + eps;
    let mut num = 0.0;
    let mut den = 0.0;
    for (&i, &d) in nn_indices.iter().zip(nn_dists) {
        let w = nearest / (d + eps);
        num += w * labels[i];
        den += w;
    }
    num / den
}
