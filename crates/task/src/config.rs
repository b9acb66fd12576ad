//! Configuration for one benchmark task.

use std::fmt;
use std::str::FromStr;

use knnbench_dataset::DatasetError;
use knnbench_knn::{KnnConfig, Metric};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::TaskError;

/// Which test rows are sent through `predict`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PredictBound {
    /// Every test row.
    #[default]
    All,
    /// Every test row except the last one. The workload has historically
    /// stopped one row short; kept for timing comparability.
    SkipLast,
}

impl PredictBound {
    /// Number of test rows to predict out of `n_test`.
    pub fn n_queries(self, n_test: usize) -> usize {
        match self {
            PredictBound::All => n_test,
            PredictBound::SkipLast => n_test.saturating_sub(1),
        }
    }

    /// Name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            PredictBound::All => "all",
            PredictBound::SkipLast => "skip_last",
        }
    }
}

impl fmt::Display for PredictBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PredictBound {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(PredictBound::All),
            "skip_last" | "skip-last" => Ok(PredictBound::SkipLast),
            other => Err(TaskError::InvalidConfig {
                reason: format!("unknown predict bound: {other:?}"),
            }),
        }
    }
}

/// Where the train/test split gets its randomness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SplitSeed {
    /// Seeded from the iteration counter: reproducible, varies per iteration.
    #[default]
    Iteration,
    /// The same seed for every iteration.
    Fixed(u64),
    /// Fresh OS entropy each time; not reproducible.
    Entropy,
}

/// Mixed into the counter for the split stream. The dataset shuffle is
/// seeded from the bare counter, and both permute the same number of rows.
const SPLIT_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

impl SplitSeed {
    /// Builds the RNG for the iteration with the given counter.
    pub fn rng(self, counter: u64) -> StdRng {
        match self {
            SplitSeed::Iteration => StdRng::seed_from_u64(counter.wrapping_add(SPLIT_SALT)),
            SplitSeed::Fixed(seed) => StdRng::seed_from_u64(seed),
            SplitSeed::Entropy => StdRng::from_os_rng(),
        }
    }
}

/// Configuration for a [`BenchmarkTask`](crate::BenchmarkTask).
///
/// # Example
///
/// ```
/// use knnbench_task::{PredictBound, TaskConfig};
///
/// let config = TaskConfig::default().with_predict_bound(PredictBound::SkipLast);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.knn().k(), 7);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TaskConfig {
    task_name: String,
    test_fraction: f64,
    metric: Metric,
    knn: KnnConfig,
    predict_bound: PredictBound,
    split_seed: SplitSeed,
    score: bool,
}

impl Default for TaskConfig {
    /// 80/20 split, k = 7, Manhattan, weighted, every test row, no scoring.
    fn default() -> Self {
        Self {
            task_name: "KnnRegressionBenchmark".to_string(),
            test_fraction: 0.2,
            metric: Metric::Manhattan,
            knn: KnnConfig::new(7),
            predict_bound: PredictBound::All,
            split_seed: SplitSeed::Iteration,
            score: false,
        }
    }
}

impl TaskConfig {
    /// Sets the task name used in the worker name.
    pub fn with_task_name(mut self, name: impl Into<String>) -> Self {
        self.task_name = name.into();
        self
    }

    /// Sets the fraction of rows held out for testing.
    pub fn with_test_fraction(mut self, fraction: f64) -> Self {
        self.test_fraction = fraction;
        self
    }

    /// Sets the distance metric.
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Sets the model configuration.
    pub fn with_knn(mut self, knn: KnnConfig) -> Self {
        self.knn = knn;
        self
    }

    /// Sets which test rows are predicted.
    pub fn with_predict_bound(mut self, bound: PredictBound) -> Self {
        self.predict_bound = bound;
        self
    }

    /// Sets the split randomness.
    pub fn with_split_seed(mut self, seed: SplitSeed) -> Self {
        self.split_seed = seed;
        self
    }

    /// Enables error scoring of the predictions against test labels.
    pub fn with_score(mut self, score: bool) -> Self {
        self.score = score;
        self
    }

    pub fn task_name(&self) -> &str {
        &self.task_name
    }

    pub fn test_fraction(&self) -> f64 {
        self.test_fraction
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn knn(&self) -> &KnnConfig {
        &self.knn
    }

    pub fn predict_bound(&self) -> PredictBound {
        self.predict_bound
    }

    pub fn split_seed(&self) -> SplitSeed {
        self.split_seed
    }

    pub fn score(&self) -> bool {
        self.score
    }

    /// Validates this configuration.
    ///
    /// Checks the task name, the test fraction and the model configuration.
    pub fn validate(&self) -> Result<(), TaskError> {
        if self.task_name.trim().is_empty() {
            return Err(TaskError::InvalidConfig {
                reason: "task name must not be empty".to_string(),
            });
        }
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(DatasetError::InvalidFraction {
                fraction: self.test_fraction,
            }
            .into());
        }
        self.knn.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use knnbench_knn::{KnnError, Strategy};
    use rand::Rng;

    #[test]
    fn test_defaults_match_reference_workload() {
        let cfg = TaskConfig::default();
        assert_eq!(cfg.task_name(), "KnnRegressionBenchmark");
        assert_eq!(cfg.test_fraction(), 0.2);
        assert_eq!(cfg.metric(), Metric::Manhattan);
        assert_eq!(cfg.knn().k(), 7);
        assert_eq!(cfg.knn().strategy(), Strategy::Weighted);
        assert_eq!(cfg.predict_bound(), PredictBound::All);
        assert_eq!(cfg.split_seed(), SplitSeed::Iteration);
        assert!(!cfg.score());
    }

    #[test]
    fn test_predict_bound() {
        assert_eq!(PredictBound::All.n_queries(42), 42);
        assert_eq!(PredictBound::SkipLast.n_queries(42), 41);
        assert_eq!(PredictBound::SkipLast.n_queries(0), 0);
        assert_eq!("skip_last".parse::<PredictBound>().unwrap(), PredictBound::SkipLast);
        assert_eq!("ALL".parse::<PredictBound>().unwrap(), PredictBound::All);
        assert!("most".parse::<PredictBound>().is_err());
    }

    #[test]
    fn test_split_seed_rng() {
        let a: u64 = SplitSeed::Iteration.rng(5).random();
        let b: u64 = SplitSeed::Iteration.rng(5).random();
        let c: u64 = SplitSeed::Iteration.rng(6).random();
        assert_eq!(a, b);
        assert_ne!(a, c);

        let f1: u64 = SplitSeed::Fixed(9).rng(1).random();
        let f2: u64 = SplitSeed::Fixed(9).rng(2).random();
        assert_eq!(f1, f2);
    }

    #[test]
    fn test_iteration_split_independent_of_shuffle() {
        use rand::seq::SliceRandom;

        for counter in [0, 1, 42, u64::MAX] {
            let mut shuffle: Vec<usize> = (0..50).collect();
            shuffle.shuffle(&mut StdRng::seed_from_u64(counter));
            let mut split: Vec<usize> = (0..50).collect();
            split.shuffle(&mut SplitSeed::Iteration.rng(counter));
            assert_ne!(shuffle, split, "counter {counter}");
        }
    }

    #[test]
    fn test_validate() {
        assert!(TaskConfig::default().validate().is_ok());
        assert!(matches!(
            TaskConfig::default().with_task_name(" ").validate(),
            Err(TaskError::InvalidConfig { .. })
        ));
        assert!(matches!(
            TaskConfig::default().with_test_fraction(1.0).validate(),
            Err(TaskError::Dataset(DatasetError::InvalidFraction { .. }))
        ));
        assert!(matches!(
            TaskConfig::default().with_knn(KnnConfig::new(0)).validate(),
            Err(TaskError::Knn(KnnError::InvalidK { k: 0 }))
        ));
    }
}
