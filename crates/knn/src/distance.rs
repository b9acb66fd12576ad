//! Distance metrics between feature vectors.
//!
//! A metric is a plain function pointer, [`MetricFn`]. Any function that is
//! symmetric, non-negative and zero for identical inputs can be used in place
//! of the built-in ones. Length checking happens once in [`distance`] (or
//! once per query inside the model), so metric kernels may assume equal
//! lengths.

use std::fmt;
use std::str::FromStr;

use crate::error::KnnError;

/// Distance kernel over two equal-length feature vectors.
pub type MetricFn = fn(&[f64], &[f64]) -> f64;

/// Manhattan (L1) distance: `Σ |a_i − b_i|`.
pub fn manhattan(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
}

/// Euclidean (L2) distance: `sqrt(Σ (a_i − b_i)²)`.
pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// Hamming distance: number of coordinates where `a_i != b_i`.
pub fn hamming(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).filter(|(x, y)| x != y).count() as f64
}

/// Computes `metric(a, b)` after checking that both vectors have the same length.
///
/// # Errors
///
/// Returns [`KnnError::DimensionMismatch`] if `a.len() != b.len()`.
///
/// # Example
///
/// ```
/// use knnbench_knn::distance::{distance, manhattan};
///
/// assert_eq!(distance(manhattan, &[0.0, 1.0], &[3.0, -1.0]).unwrap(), 5.0);
/// assert!(distance(manhattan, &[0.0], &[1.0, 2.0]).is_err());
/// ```
pub fn distance(metric: MetricFn, a: &[f64], b: &[f64]) -> Result<f64, KnnError> {
    if a.len() != b.len() {
        return Err(KnnError::DimensionMismatch {
            expected: a.len(),
            got: b.len(),
        });
    }
    Ok(metric(a, b))
}

/// Computes `metric(row_i, target)` for every row of a flat row-major matrix.
///
/// # Panics
///
/// Debug-asserts that `candidates.len() == out.len() × target.len()`.
pub(crate) fn distances_to(candidates: &[f64], target: &[f64], metric: MetricFn, out: &mut [f64]) {
    let n_features = target.len();
    debug_assert_eq!(candidates.len(), out.len() * n_features);

    for (o, row) in out.iter_mut().zip(candidates.chunks_exact(n_features)) {
        *o = metric(row, target);
    }
}

/// Built-in metrics, selectable by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Metric {
    /// See [`manhattan`].
    #[default]
    Manhattan,
    /// See [`euclidean`].
    Euclidean,
    /// See [`hamming`].
    Hamming,
}

impl Metric {
    /// The kernel function for this metric.
    pub fn as_fn(self) -> MetricFn {
        match self {
            Metric::Manhattan => manhattan,
            Metric::Euclidean => euclidean,
            Metric::Hamming => hamming,
        }
    }

    /// Lower-case name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Metric::Manhattan => "manhattan",
            Metric::Euclidean => "euclidean",
            Metric::Hamming => "hamming",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = KnnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "manhattan" | "l1" => Ok(Metric::Manhattan),
            "euclidean" | "l2" => Ok(Metric::Euclidean),
            "hamming" => Ok(Metric::Hamming),
            _ => Err(KnnError::UnknownMetric {
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const ALL: [Metric; 3] = [Metric::Manhattan, Metric::Euclidean, Metric::Hamming];

    #[test]
    fn test_manhattan_hand_computed() {
        assert_abs_diff_eq!(manhattan(&[1.0, 2.0, 3.0], &[4.0, 0.0, 3.5]), 5.5, epsilon = 1e-12);
    }

    #[test]
    fn test_euclidean_hand_computed() {
        assert_abs_diff_eq!(euclidean(&[0.0, 0.0], &[3.0, 4.0]), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_hamming_counts_differences() {
        assert_eq!(hamming(&[1.0, 2.0, 3.0, 4.0], &[1.0, 0.0, 3.0, 5.0]), 2.0);
    }

    #[test]
    fn test_symmetric_and_zero_on_identity() {
        let a = [0.3, -1.2, 4.0, 0.0];
        let b = [1.1, 2.5, -3.0, 0.0];
        for m in ALL {
            let f = m.as_fn();
            assert_eq!(f(&a, &b), f(&b, &a), "{m} not symmetric");
            assert_eq!(f(&a, &a), 0.0, "{m} not zero on identity");
            assert!(f(&a, &b) >= 0.0, "{m} negative");
        }
    }

    #[test]
    fn test_distance_checks_length() {
        let result = distance(manhattan, &[1.0, 2.0], &[1.0]);
        assert!(matches!(
            result,
            Err(KnnError::DimensionMismatch {
                expected: 2,
                got: 1
            })
        ));
    }

    #[test]
    fn test_custom_metric_pluggable() {
        fn chebyshev(a: &[f64], b: &[f64]) -> f64 {
            a.iter()
                .zip(b)
                .map(|(x, y)| (x - y).abs())
                .fold(0.0, f64::max)
        }
        assert_eq!(distance(chebyshev, &[0.0, 0.0], &[3.0, -7.0]).unwrap(), 7.0);
    }

    #[test]
    fn test_distances_to_rows() {
        // 3 rows × 2 features
        let candidates = [0.0, 0.0, 1.0, 1.0, -2.0, 3.0];
        let mut out = [0.0; 3];
        distances_to(&candidates, &[1.0, 0.0], manhattan, &mut out);
        assert_eq!(out, [1.0, 1.0, 6.0]);
    }

    #[test]
    fn test_metric_parse_and_display() {
        for m in ALL {
            assert_eq!(m.to_string().parse::<Metric>().unwrap(), m);
        }
        assert_eq!("L1".parse::<Metric>().unwrap(), Metric::Manhattan);
        assert_eq!("Euclidean".parse::<Metric>().unwrap(), Metric::Euclidean);
        assert!(matches!(
            "cosine".parse::<Metric>(),
            Err(KnnError::UnknownMetric { .. })
        ));
        assert_eq!(Metric::default(), Metric::Manhattan);
    }
}
