//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};

use knnbench_dataset::SyntheticShape;
use knnbench_knn::{KnnConfig, Metric, Strategy};
use knnbench_task::{LocalGrid, PredictBound, SplitSeed, TaskConfig};

use crate::config::*;

/// Parses a split seed specification into the corresponding enum variant.
pub fn parse_split_seed(s: &SplitSeedToml) -> Result<SplitSeed> {
    match s {
        SplitSeedToml::Fixed(seed) => Ok(SplitSeed::Fixed(*seed)),
        SplitSeedToml::Named(name) => match name.to_lowercase().as_str() {
            "iteration" => Ok(SplitSeed::Iteration),
            "entropy" => Ok(SplitSeed::Entropy),
            other => bail!("unknown split seed: {other:?}"),
        },
    }
}

/// Builds a validated [`TaskConfig`] from the TOML model and benchmark
/// configuration.
pub fn build_task_config(model: &ModelToml, benchmark: &BenchmarkToml) -> Result<TaskConfig> {
    let metric: Metric = model.metric.parse()?;
    let strategy: Strategy = model.strategy.parse()?;
    let predict_bound: PredictBound = model.predict_bound.parse()?;
    let split_seed = parse_split_seed(&model.split_seed)?;

    let knn = KnnConfig::new(model.k)
        .with_strategy(strategy)
        .with_epsilon(model.epsilon);

    let cfg = TaskConfig::default()
        .with_task_name(benchmark.task_name.as_str())
        .with_test_fraction(model.test_fraction)
        .with_metric(metric)
        .with_knn(knn)
        .with_predict_bound(predict_bound)
        .with_split_seed(split_seed)
        .with_score(model.score);
    cfg.validate().context("invalid [model] configuration")?;
    Ok(cfg)
}

/// Builds a [`SyntheticShape`] from the TOML dataset configuration.
pub fn build_synthetic_shape(dataset: &DatasetToml) -> SyntheticShape {
    SyntheticShape {
        rows: dataset.rows,
        features: dataset.features,
        generator_seed: dataset.generator_seed,
        noise: dataset.noise,
    }
}

/// Builds the [`LocalGrid`] from the TOML grid configuration.
pub fn build_grid(grid: &GridToml) -> Result<LocalGrid> {
    if grid.instance_name.trim().is_empty() {
        bail!("[grid].instance_name must not be empty");
    }
    Ok(LocalGrid::new(grid.instance_name.as_str()))
}

/// Checks the driver settings in `[benchmark]`.
pub fn validate_benchmark(benchmark: &BenchmarkToml) -> Result<()> {
    if benchmark.iterations == 0 {
        bail!("[benchmark].iterations must be at least 1");
    }
    if benchmark.concurrency == 0 {
        bail!("[benchmark].concurrency must be at least 1");
    }
    Ok(())
}
