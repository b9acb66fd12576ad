//! Random train/test partitioning.

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::dataset::LabeledDataset;
use crate::error::DatasetError;

/// Two disjoint datasets drawn from one source.
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    train: LabeledDataset,
    test: LabeledDataset,
}

impl TrainTestSplit {
    /// Rows used to fit the model.
    pub fn train(&self) -> &LabeledDataset {
        &self.train
    }

    /// Rows held out for evaluation.
    pub fn test(&self) -> &LabeledDataset {
        &self.test
    }

    /// Splits into `(train, test)`, giving up ownership of both halves.
    pub fn into_parts(self) -> (LabeledDataset, LabeledDataset) {
        (self.train, self.test)
    }
}

/// Number of test rows for `n_rows` source rows: `round(fraction × n_rows)`,
/// halves rounded up.
pub fn test_size(n_rows: usize, fraction: f64) -> usize {
    (fraction * n_rows as f64 + 0.5).floor() as usize
}

/// Partitions `dataset` into train and test subsets.
///
/// Row indices are shuffled with `rng`; the first
/// `round(test_fraction × n_rows)` permuted rows become the test set and
/// the remainder the train set. Pass a seeded RNG for a reproducible split.
///
/// # Errors
///
/// - [`DatasetError::InvalidFraction`] unless `0 < test_fraction < 1`.
/// - [`DatasetError::EmptyPartition`] if rounding leaves either side empty.
///
/// # Example
///
/// ```
/// use knnbench_dataset::{LabeledDataset, split};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let rows: Vec<Vec<f64>> = (0..10).map(|i| vec![i as f64]).collect();
/// let labels: Vec<f64> = (0..10).map(|i| i as f64).collect();
/// let ds = LabeledDataset::from_rows(&rows, &labels).unwrap();
///
/// let parts = split(&ds, 0.2, &mut StdRng::seed_from_u64(7)).unwrap();
/// assert_eq!(parts.test().n_rows(), 2);
/// assert_eq!(parts.train().n_rows(), 8);
/// ```
pub fn split(
    dataset: &LabeledDataset,
    test_fraction: f64,
    rng: &mut impl Rng,
) -> Result<TrainTestSplit, DatasetError> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(DatasetError::InvalidFraction {
            fraction: test_fraction,
        });
    }

    let n_rows = dataset.n_rows();
    let n_test = test_size(n_rows, test_fraction);
    if n_test == 0 || n_test == n_rows {
        return Err(DatasetError::EmptyPartition { n_rows, n_test });
    }

    let mut order: Vec<usize> = (0..n_rows).collect();
    order.shuffle(rng);
    let (test_idx, train_idx) = order.split_at(n_test);

    debug!(n_rows, n_test, n_train = train_idx.len(), "split dataset");

    Ok(TrainTestSplit {
        train: dataset.select(train_idx)?,
        test: dataset.select(test_idx)?,
    })
}
