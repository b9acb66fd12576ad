use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level knnbench configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KnnBenchConfig {
    /// Starting value of the iteration counter.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Iteration driver settings.
    #[serde(default)]
    pub benchmark: BenchmarkToml,

    /// Synthetic dataset settings.
    #[serde(default)]
    pub dataset: DatasetToml,

    /// Model and pipeline settings.
    #[serde(default)]
    pub model: ModelToml,

    /// Grid settings.
    #[serde(default)]
    pub grid: GridToml,
}

impl KnnBenchConfig {
    /// Reads and parses a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BenchmarkToml {
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    #[serde(default = "default_warmup")]
    pub warmup: usize,
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    #[serde(default = "default_task_name")]
    pub task_name: String,
}

impl Default for BenchmarkToml {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            warmup: default_warmup(),
            concurrency: default_concurrency(),
            task_name: default_task_name(),
        }
    }
}

fn default_iterations() -> usize {
    100
}
fn default_warmup() -> usize {
    5
}
fn default_concurrency() -> usize {
    1
}
fn default_task_name() -> String {
    "KnnRegressionBenchmark".to_string()
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetToml {
    #[serde(default = "default_rows")]
    pub rows: usize,
    #[serde(default = "default_features")]
    pub features: usize,
    #[serde(default)]
    pub generator_seed: u64,
    #[serde(default = "default_noise")]
    pub noise: f64,
}

impl Default for DatasetToml {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            features: default_features(),
            generator_seed: 0,
            noise: default_noise(),
        }
    }
}

fn default_rows() -> usize {
    209
}
fn default_features() -> usize {
    6
}
fn default_noise() -> f64 {
    0.05
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ModelToml {
    #[serde(default = "default_k")]
    pub k: usize,
    #[serde(default = "default_metric")]
    pub metric: String,
    #[serde(default = "default_strategy")]
    pub strategy: String,
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    #[serde(default = "default_test_fraction")]
    pub test_fraction: f64,
    #[serde(default = "default_predict_bound")]
    pub predict_bound: String,
    #[serde(default)]
    pub score: bool,
    #[serde(default)]
    pub split_seed: SplitSeedToml,
}

impl Default for ModelToml {
    fn default() -> Self {
        Self {
            k: default_k(),
            metric: default_metric(),
            strategy: default_strategy(),
            epsilon: default_epsilon(),
            test_fraction: default_test_fraction(),
            predict_bound: default_predict_bound(),
            score: false,
            split_seed: SplitSeedToml::default(),
        }
    }
}

fn default_k() -> usize {
    7
}
fn default_metric() -> String {
    "manhattan".to_string()
}
fn default_strategy() -> String {
    "weighted".to_string()
}
fn default_epsilon() -> f64 {
    1e-8
}
fn default_test_fraction() -> f64 {
    0.2
}
fn default_predict_bound() -> String {
    "all".to_string()
}

/// Split seed: `"iteration"`, `"entropy"`, or an integer for a fixed seed.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SplitSeedToml {
    Fixed(u64),
    Named(String),
}

impl Default for SplitSeedToml {
    fn default() -> Self {
        SplitSeedToml::Named("iteration".to_string())
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GridToml {
    #[serde(default = "default_instance_name")]
    pub instance_name: String,
}

impl Default for GridToml {
    fn default() -> Self {
        Self {
            instance_name: default_instance_name(),
        }
    }
}

fn default_instance_name() -> String {
    "local".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_file_gives_defaults() {
        let cfg: KnnBenchConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.benchmark.iterations, 100);
        assert_eq!(cfg.benchmark.warmup, 5);
        assert_eq!(cfg.benchmark.concurrency, 1);
        assert_eq!(cfg.benchmark.task_name, "KnnRegressionBenchmark");
        assert_eq!(cfg.dataset.rows, 209);
        assert_eq!(cfg.dataset.features, 6);
        assert_eq!(cfg.model.k, 7);
        assert_eq!(cfg.model.metric, "manhattan");
        assert_eq!(cfg.model.strategy, "weighted");
        assert_eq!(cfg.model.predict_bound, "all");
        assert_eq!(cfg.model.split_seed, SplitSeedToml::default());
        assert_eq!(cfg.grid.instance_name, "local");
    }

    #[test]
    fn test_partial_sections() {
        let cfg: KnnBenchConfig = toml::from_str(
            r#"
            seed = 42

            [model]
            k = 3
            metric = "euclidean"
            split_seed = 9

            [grid]
            instance_name = "bench-grid"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.model.k, 3);
        assert_eq!(cfg.model.metric, "euclidean");
        assert_eq!(cfg.model.strategy, "weighted");
        assert_eq!(cfg.model.split_seed, SplitSeedToml::Fixed(9));
        assert_eq!(cfg.grid.instance_name, "bench-grid");
        assert_eq!(cfg.benchmark.iterations, 100);
    }

    #[test]
    fn test_named_split_seed() {
        let cfg: KnnBenchConfig = toml::from_str("[model]\nsplit_seed = \"entropy\"").unwrap();
        assert_eq!(cfg.model.split_seed, SplitSeedToml::Named("entropy".to_string()));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(toml::from_str::<KnnBenchConfig>("[model]\nneighbours = 3").is_err());
        assert!(toml::from_str::<KnnBenchConfig>("[cache]\nname = \"x\"").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[benchmark]\niterations = 12\nconcurrency = 3").unwrap();
        let cfg = KnnBenchConfig::load(file.path()).unwrap();
        assert_eq!(cfg.benchmark.iterations, 12);
        assert_eq!(cfg.benchmark.concurrency, 3);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = KnnBenchConfig::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read config file"));
    }
}
