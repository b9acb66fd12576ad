//! The benchmark task: load, normalize, split, fit, predict.

use std::sync::Arc;

use knnbench_dataset::{DatasetSource, normalize_min_max, split};
use knnbench_knn::{KnnRegression, KnnScratch};
use tracing::debug;

use crate::config::TaskConfig;
use crate::context::IterationContext;
use crate::error::TaskError;
use crate::grid::Grid;
use crate::worker::{WorkerContext, run_on_worker};

/// Prediction error against the held-out labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    /// Mean absolute error.
    pub mae: f64,
    /// Root mean squared error.
    pub rmse: f64,
}

/// What one iteration did.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Counter of the iteration.
    pub counter: u64,
    /// Rows the model was fit on.
    pub n_train: usize,
    /// Rows held out.
    pub n_test: usize,
    /// Calls made to `predict`.
    pub n_predicted: usize,
    /// Present when scoring is enabled and at least one row was predicted.
    pub score: Option<Score>,
}

/// One end-to-end kNN regression run per call, executed on a dedicated worker.
///
/// The grid handle and dataset source are injected at construction; the task
/// holds no other state, so one instance can serve concurrent iterations.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use knnbench_dataset::{SyntheticShape, SyntheticSource};
/// use knnbench_task::{BenchmarkTask, IterationContext, LocalGrid, TaskConfig};
///
/// let source = SyntheticSource::new(&SyntheticShape::default()).unwrap();
/// let task = BenchmarkTask::new(
///     Arc::new(LocalGrid::default()),
///     Arc::new(source),
///     TaskConfig::default(),
/// )
/// .unwrap();
///
/// let summary = task.run(&IterationContext::new(1)).unwrap();
/// assert_eq!(summary.n_test, 42);
/// assert_eq!(summary.n_predicted, 42);
/// ```
pub struct BenchmarkTask {
    grid: Arc<dyn Grid>,
    source: Arc<dyn DatasetSource>,
    config: TaskConfig,
}

impl BenchmarkTask {
    /// Creates a task after validating `config`.
    pub fn new(
        grid: Arc<dyn Grid>,
        source: Arc<dyn DatasetSource>,
        config: TaskConfig,
    ) -> Result<Self, TaskError> {
        config.validate()?;
        Ok(Self {
            grid,
            source,
            config,
        })
    }

    /// The task configuration.
    pub fn config(&self) -> &TaskConfig {
        &self.config
    }

    /// `"{grid instance name}-{task name}"`.
    pub fn worker_name(&self) -> String {
        format!("{}-{}", self.grid.instance_name(), self.config.task_name())
    }

    /// Runs one iteration on a dedicated worker and waits for it.
    ///
    /// # Errors
    ///
    /// Any pipeline error is returned as-is; a panic on the worker becomes
    /// [`TaskError::WorkerFailed`]. Nothing is retried.
    pub fn run(&self, ctx: &IterationContext) -> Result<RunSummary, TaskError> {
        let name = self.worker_name();
        run_on_worker(&name, self.grid.as_ref(), |worker| self.execute(worker, ctx))
    }

    /// Harness-style entry point: `Ok(true)` when the iteration succeeded.
    pub fn test(&self, ctx: &IterationContext) -> Result<bool, TaskError> {
        self.run(ctx).map(|_| true)
    }

    /// The pipeline body. Requires a [`WorkerContext`], so it can only be
    /// called from inside a worker.
    #[tracing::instrument(skip_all, fields(worker = worker.name(), counter = ctx.counter()))]
    pub fn execute(
        &self,
        worker: &WorkerContext<'_>,
        ctx: &IterationContext,
    ) -> Result<RunSummary, TaskError> {
        let mut dataset = self.source.shuffled(ctx.counter())?;
        debug!(
            grid = worker.grid().instance_name(),
            n_rows = dataset.n_rows(),
            "dataset loaded"
        );

        normalize_min_max(&mut dataset);

        let mut rng = self.config.split_seed().rng(ctx.counter());
        let (train, test) = split(&dataset, self.config.test_fraction(), &mut rng)?.into_parts();
        drop(dataset);

        let n_train = train.n_rows();
        let n_test = test.n_rows();
        let model = KnnRegression::new(
            train,
            self.config.metric().as_fn(),
            self.config.knn().clone(),
        )?;

        let n_queries = self.config.predict_bound().n_queries(n_test);
        let mut scratch = KnnScratch::new(n_train);
        let mut abs_sum = 0.0;
        let mut sq_sum = 0.0;
        for row in test.rows().take(n_queries) {
            let y = model.predict_with_scratch(row.features, &mut scratch)?;
            if self.config.score() {
                let err = y - row.label;
                abs_sum += err.abs();
                sq_sum += err * err;
            }
        }

        let score = (self.config.score() && n_queries > 0).then(|| Score {
            mae: abs_sum / n_queries as f64,
            rmse: (sq_sum / n_queries as f64).sqrt(),
        });

        debug!(n_train, n_test, n_predicted = n_queries, "iteration finished");

        Ok(RunSummary {
            counter: ctx.counter(),
            n_train,
            n_test,
            n_predicted: n_queries,
            score,
        })
    }
}

impl std::fmt::Debug for BenchmarkTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BenchmarkTask")
            .field("worker_name", &self.worker_name())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PredictBound, SplitSeed};
    use crate::grid::LocalGrid;
    use approx::assert_abs_diff_eq;
    use knnbench_dataset::{DatasetError, InMemorySource, LabeledDataset};

    fn linear_source(n: usize) -> InMemorySource {
        let rows: Vec<Vec<f64>> = (0..n).map(|i| vec![i as f64, 1.0]).collect();
        let labels: Vec<f64> = (0..n).map(|i| 3.0 * i as f64).collect();
        InMemorySource::new(LabeledDataset::from_rows(&rows, &labels).unwrap())
    }

    fn task(config: TaskConfig) -> BenchmarkTask {
        BenchmarkTask::new(
            Arc::new(LocalGrid::new("unit")),
            Arc::new(linear_source(50)),
            config,
        )
        .unwrap()
    }

    #[test]
    fn test_worker_name() {
        let t = task(TaskConfig::default().with_task_name("Bench"));
        assert_eq!(t.worker_name(), "unit-Bench");
    }

    #[test]
    fn test_run_counts() {
        let summary = task(TaskConfig::default()).run(&IterationContext::new(3)).unwrap();
        assert_eq!(summary.counter, 3);
        assert_eq!(summary.n_test, 10);
        assert_eq!(summary.n_train, 40);
        assert_eq!(summary.n_predicted, 10);
        assert!(summary.score.is_none());
    }

    #[test]
    fn test_skip_last_bound() {
        let t = task(TaskConfig::default().with_predict_bound(PredictBound::SkipLast));
        let summary = t.run(&IterationContext::new(3)).unwrap();
        assert_eq!(summary.n_predicted, 9);
    }

    #[test]
    fn test_score_on_linear_data() {
        let t = task(
            TaskConfig::default()
                .with_score(true)
                .with_split_seed(SplitSeed::Fixed(1)),
        );
        let score = t.run(&IterationContext::new(0)).unwrap().score.unwrap();
        // Labels span 0..147; neighbors on a line keep the error small.
        assert!(score.mae >= 0.0 && score.mae < 10.0, "mae {}", score.mae);
        assert!(score.rmse >= score.mae);
    }

    #[test]
    fn test_constant_labels_score_zero() {
        let rows: Vec<Vec<f64>> = (0..30).map(|i| vec![i as f64, (i % 7) as f64]).collect();
        let ds = LabeledDataset::from_rows(&rows, &[4.5; 30]).unwrap();
        let t = BenchmarkTask::new(
            Arc::new(LocalGrid::default()),
            Arc::new(InMemorySource::new(ds)),
            TaskConfig::default().with_score(true),
        )
        .unwrap();
        let score = t.run(&IterationContext::new(8)).unwrap().score.unwrap();
        assert_abs_diff_eq!(score.mae, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(score.rmse, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_test_returns_true() {
        assert!(task(TaskConfig::default()).test(&IterationContext::new(0)).unwrap());
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let result = BenchmarkTask::new(
            Arc::new(LocalGrid::default()),
            Arc::new(linear_source(10)),
            TaskConfig::default().with_test_fraction(0.0),
        );
        assert!(matches!(
            result,
            Err(TaskError::Dataset(DatasetError::InvalidFraction { .. }))
        ));
    }
}
