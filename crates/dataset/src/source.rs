//! Dataset providers that hand out a freshly shuffled copy per request.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::dataset::LabeledDataset;
use crate::error::DatasetError;

/// Supplies a shuffled [`LabeledDataset`] for a numeric seed.
///
/// The same seed must always yield the same row order, so benchmark
/// iterations are reproducible but vary from one counter value to the next.
/// Each call returns an owned copy; callers are free to mutate it.
pub trait DatasetSource: Send + Sync {
    /// Returns a copy of the dataset with rows permuted by `seed`.
    fn shuffled(&self, seed: u64) -> Result<LabeledDataset, DatasetError>;
}

/// Serves a fixed in-memory dataset, reshuffled per seed.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    base: LabeledDataset,
}

impl InMemorySource {
    /// Wraps an existing dataset.
    pub fn new(base: LabeledDataset) -> Self {
        Self { base }
    }

    /// The unshuffled dataset.
    pub fn base(&self) -> &LabeledDataset {
        &self.base
    }
}

impl DatasetSource for InMemorySource {
    fn shuffled(&self, seed: u64) -> Result<LabeledDataset, DatasetError> {
        let mut order: Vec<usize> = (0..self.base.n_rows()).collect();
        order.shuffle(&mut StdRng::seed_from_u64(seed));
        self.base.select(&order)
    }
}

/// Shape of a generated regression dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticShape {
    /// Number of rows.
    pub rows: usize,
    /// Number of feature columns.
    pub features: usize,
    /// Seed for the generator (not the per-request shuffle).
    pub generator_seed: u64,
    /// Half-width of the uniform label noise, relative to the label scale.
    pub noise: f64,
}

impl Default for SyntheticShape {
    /// 209 rows × 6 features, the size of the computer-hardware
    /// performance dataset this workload has traditionally been run on.
    fn default() -> Self {
        Self {
            rows: 209,
            features: 6,
            generator_seed: 0,
            noise: 0.05,
        }
    }
}

/// Generates a reproducible regression dataset once, then serves shuffled copies.
///
/// Column `j` spans `[0, 10^(j mod 4))` so the raw features sit on very
/// different scales; the label is a linear combination of the scaled
/// features plus uniform noise.
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    inner: InMemorySource,
}

impl SyntheticSource {
    /// Generates the base dataset for `shape`.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::InvalidSourceShape`] for zero rows or features
    /// or a negative / non-finite noise level.
    pub fn new(shape: &SyntheticShape) -> Result<Self, DatasetError> {
        if shape.rows == 0 || shape.features == 0 {
            return Err(DatasetError::InvalidSourceShape {
                reason: format!(
                    "rows and features must be >= 1, got {}×{}",
                    shape.rows, shape.features
                ),
            });
        }
        if !shape.noise.is_finite() || shape.noise < 0.0 {
            return Err(DatasetError::InvalidSourceShape {
                reason: format!("noise must be finite and >= 0, got {}", shape.noise),
            });
        }

        let mut rng = StdRng::seed_from_u64(shape.generator_seed);
        let scales: Vec<f64> = (0..shape.features)
            .map(|j| 10f64.powi((j % 4) as i32))
            .collect();

        let mut features = Vec::with_capacity(shape.rows * shape.features);
        let mut labels = Vec::with_capacity(shape.rows);
        for _ in 0..shape.rows {
            let mut y = 0.0;
            for (j, &scale) in scales.iter().enumerate() {
                let u: f64 = rng.random();
                features.push(u * scale);
                y += (j + 1) as f64 * u;
            }
            if shape.noise > 0.0 {
                y += rng.random_range(-shape.noise..shape.noise) * shape.features as f64;
            }
            labels.push(10.0 * y);
        }

        debug!(
            rows = shape.rows,
            features = shape.features,
            seed = shape.generator_seed,
            "generated synthetic dataset"
        );

        let base = LabeledDataset::new(features, shape.features, labels)?;
        Ok(Self {
            inner: InMemorySource::new(base),
        })
    }

    /// The unshuffled generated dataset.
    pub fn base(&self) -> &LabeledDataset {
        self.inner.base()
    }
}

impl DatasetSource for SyntheticSource {
    fn shuffled(&self, seed: u64) -> Result<LabeledDataset, DatasetError> {
        self.inner.shuffled(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(values: &[f64]) -> Vec<f64> {
        let mut v = values.to_vec();
        v.sort_by(|a, b| a.partial_cmp(b).unwrap());
        v
    }

    #[test]
    fn test_in_memory_same_seed_same_order() {
        let rows: Vec<Vec<f64>> = (0..30).map(|i| vec![i as f64]).collect();
        let labels: Vec<f64> = (0..30).map(|i| i as f64).collect();
        let src = InMemorySource::new(LabeledDataset::from_rows(&rows, &labels).unwrap());

        let a = src.shuffled(5).unwrap();
        let b = src.shuffled(5).unwrap();
        assert_eq!(a, b);
        assert_eq!(sorted(a.labels()), labels);
    }

    #[test]
    fn test_in_memory_seeds_differ() {
        let rows: Vec<Vec<f64>> = (0..30).map(|i| vec![i as f64]).collect();
        let labels: Vec<f64> = (0..30).map(|i| i as f64).collect();
        let src = InMemorySource::new(LabeledDataset::from_rows(&rows, &labels).unwrap());
        assert_ne!(src.shuffled(1).unwrap(), src.shuffled(2).unwrap());
    }

    #[test]
    fn test_synthetic_default_shape() {
        let src = SyntheticSource::new(&SyntheticShape::default()).unwrap();
        assert_eq!(src.base().n_rows(), 209);
        assert_eq!(src.base().n_features(), 6);
        // Column 2 spans [0, 100)
        assert!(src.base().column(2).all(|x| (0.0..100.0).contains(&x)));
    }

    #[test]
    fn test_synthetic_is_reproducible() {
        let shape = SyntheticShape {
            rows: 50,
            features: 3,
            generator_seed: 11,
            noise: 0.1,
        };
        let a = SyntheticSource::new(&shape).unwrap();
        let b = SyntheticSource::new(&shape).unwrap();
        assert_eq!(a.base(), b.base());
        assert_eq!(a.shuffled(3).unwrap(), b.shuffled(3).unwrap());
    }

    #[test]
    fn test_synthetic_zero_noise() {
        let shape = SyntheticShape {
            rows: 4,
            features: 1,
            generator_seed: 0,
            noise: 0.0,
        };
        let src = SyntheticSource::new(&shape).unwrap();
        for row in src.base().rows() {
            assert!((row.label - 10.0 * row.features[0]).abs() < 1e-9);
        }
    }

    #[test]
    fn test_synthetic_rejects_bad_shape() {
        let zero_rows = SyntheticShape {
            rows: 0,
            ..SyntheticShape::default()
        };
        assert!(matches!(
            SyntheticSource::new(&zero_rows),
            Err(DatasetError::InvalidSourceShape { .. })
        ));
        let bad_noise = SyntheticShape {
            noise: -1.0,
            ..SyntheticShape::default()
        };
        assert!(matches!(
            SyntheticSource::new(&bad_noise),
            Err(DatasetError::InvalidSourceShape { .. })
        ));
    }
}
