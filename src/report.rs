//! Timing summary over the timed iterations of a run.

use std::time::Duration;

use serde::Serialize;

/// Outcome of one timed iteration.
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    /// Wall time of the iteration, worker spawn and join included.
    pub elapsed: Duration,
    /// Number of `predict` calls the iteration made.
    pub n_predicted: usize,
}

/// Latency statistics in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Latency {
    pub mean_ms: f64,
    pub median_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    pub p95_ms: f64,
}

/// Summary of a benchmark run, written as JSON with `--output`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub task_name: String,
    pub iterations: usize,
    pub failures: usize,
    pub concurrency: usize,
    pub total_predictions: usize,
    pub wall_ms: f64,
    pub predictions_per_sec: f64,
    /// Absent when every iteration failed.
    pub latency: Option<Latency>,
}

impl Report {
    /// Builds a report from the successful samples, the failure count and
    /// the wall time of the whole timed phase.
    pub fn new(
        task_name: &str,
        concurrency: usize,
        samples: &[Sample],
        failures: usize,
        wall: Duration,
    ) -> Self {
        let total_predictions: usize = samples.iter().map(|s| s.n_predicted).sum();
        let wall_secs = wall.as_secs_f64();
        let predictions_per_sec = if wall_secs > 0.0 {
            total_predictions as f64 / wall_secs
        } else {
            0.0
        };

        let mut ms: Vec<f64> = samples
            .iter()
            .map(|s| s.elapsed.as_secs_f64() * 1e3)
            .collect();
        ms.sort_by(f64::total_cmp);

        Self {
            task_name: task_name.to_string(),
            iterations: samples.len() + failures,
            failures,
            concurrency,
            total_predictions,
            wall_ms: wall_secs * 1e3,
            predictions_per_sec,
            latency: latency(&ms),
        }
    }

    /// True when every timed iteration failed.
    pub fn all_failed(&self) -> bool {
        self.iterations > 0 && self.failures == self.iterations
    }
}

/// Statistics over pre-sorted millisecond samples.
fn latency(sorted: &[f64]) -> Option<Latency> {
    let (&min_ms, &max_ms) = (sorted.first()?, sorted.last()?);
    Some(Latency {
        mean_ms: sorted.iter().sum::<f64>() / sorted.len() as f64,
        median_ms: median(sorted),
        min_ms,
        max_ms,
        p95_ms: quantile_type7(sorted, 0.95),
    })
}

/// Linear-interpolation quantile (R type 7) of non-empty sorted data.
fn quantile_type7(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    sorted[lo] + (h - h.floor()) * (sorted[hi] - sorted[lo])
}

/// Median of non-empty sorted data.
fn median(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}
