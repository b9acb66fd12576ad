//! Run command: warmup, then timed benchmark iterations.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use tracing::{info, info_span, warn};

use knnbench_dataset::SyntheticSource;
use knnbench_task::{BenchmarkTask, SeedCounter, TaskError};

use crate::cli::RunArgs;
use crate::config::KnnBenchConfig;
use crate::convert;
use crate::report::{Report, Sample};

/// Run the benchmark.
pub fn run(args: RunArgs) -> Result<()> {
    let _cmd = info_span!("run").entered();

    // 1. Load TOML and apply CLI overrides
    let mut config = KnnBenchConfig::load(&args.config)?;
    if let Some(n) = args.iterations {
        config.benchmark.iterations = n;
    }
    if let Some(j) = args.concurrency {
        config.benchmark.concurrency = j;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    convert::validate_benchmark(&config.benchmark)?;

    // 2. Build the task
    let task_cfg = convert::build_task_config(&config.model, &config.benchmark)?;
    let shape = convert::build_synthetic_shape(&config.dataset);
    let grid = convert::build_grid(&config.grid)?;
    let source = SyntheticSource::new(&shape).context("failed to generate dataset")?;
    let task = BenchmarkTask::new(Arc::new(grid), Arc::new(source), task_cfg)
        .context("failed to create benchmark task")?;
    info!(
        worker = %task.worker_name(),
        rows = shape.rows,
        features = shape.features,
        "benchmark task ready"
    );

    let bench = &config.benchmark;
    let counter = SeedCounter::new(config.seed.unwrap_or(0));
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(bench.concurrency)
        .thread_name(|i| format!("knnbench-driver-{i}"))
        .build()
        .context("failed to build driver thread pool")?;

    // 3. Warmup, untimed
    if bench.warmup > 0 {
        let _warm = info_span!("warmup", n = bench.warmup).entered();
        let failed = pool.install(|| {
            (0..bench.warmup)
                .into_par_iter()
                .filter(|_| task.run(&counter.next_context()).is_err())
                .count()
        });
        if failed > 0 {
            warn!(failed, "warmup iterations failed");
        }
    }

    // 4. Timed iterations
    info!(
        iterations = bench.iterations,
        concurrency = bench.concurrency,
        "starting timed iterations"
    );
    let start = Instant::now();
    let outcomes: Vec<Result<Sample, TaskError>> = pool.install(|| {
        (0..bench.iterations)
            .into_par_iter()
            .map(|_| {
                let ctx = counter.next_context();
                let t = Instant::now();
                let result = task.run(&ctx);
                if let Err(ref e) = result {
                    warn!(counter = ctx.counter(), error = %e, "iteration failed");
                }
                result.map(|summary| Sample {
                    elapsed: t.elapsed(),
                    n_predicted: summary.n_predicted,
                })
            })
            .collect()
    });
    let wall = start.elapsed();

    let samples: Vec<Sample> = outcomes
        .iter()
        .filter_map(|o| o.as_ref().ok())
        .copied()
        .collect();
    let failures = outcomes.len() - samples.len();
    let report = Report::new(
        bench.task_name.as_str(),
        bench.concurrency,
        &samples,
        failures,
        wall,
    );

    // 5. Summarize
    print_report(&report);
    if let Some(ref path) = args.output {
        let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report: {}", path.display()))?;
        info!(path = %path.display(), "report written");
    }

    if report.all_failed() {
        bail!("all {} timed iterations failed", report.iterations);
    }
    Ok(())
}

fn print_report(report: &Report) {
    info!(
        iterations = report.iterations,
        failures = report.failures,
        predictions_per_sec = report.predictions_per_sec,
        "benchmark finished"
    );
    println!(
        "{}: {} iterations, {} failed, concurrency {}",
        report.task_name, report.iterations, report.failures, report.concurrency
    );
    if let Some(ref lat) = report.latency {
        println!(
            "  latency ms: mean {:.3}  median {:.3}  min {:.3}  max {:.3}  p95 {:.3}",
            lat.mean_ms, lat.median_ms, lat.min_ms, lat.max_ms, lat.p95_ms
        );
    }
    println!(
        "  {} predictions in {:.1} ms ({:.0} predictions/s)",
        report.total_predictions, report.wall_ms, report.predictions_per_sec
    );
}
