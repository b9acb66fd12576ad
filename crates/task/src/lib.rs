//! Benchmark task orchestration for kNN regression.
//!
//! Each call to [`BenchmarkTask::run`] executes one iteration on a fresh,
//! named worker thread and blocks until it completes:
//!
//! ```text
//! BenchmarkTask::run(ctx)
//!   └─ run_on_worker("{grid}-{task}")      (worker.rs)
//!        └─ BenchmarkTask::execute()       (task.rs)
//!             ├─ DatasetSource::shuffled(ctx.counter)
//!             ├─ normalize_min_max()
//!             ├─ split()                   80/20 by default
//!             ├─ KnnRegression::new()      k = 7, Manhattan, weighted
//!             └─ predict() per test row
//! ```
//!
//! The grid handle ([`Grid`]) is injected at construction; the body
//! receives it through a [`WorkerContext`], which only exists on a worker.
//! Concurrent iterations share a [`SeedCounter`] and nothing else.

pub mod config;
pub mod context;
pub mod error;
pub mod grid;
pub mod task;
pub mod worker;

pub use config::{PredictBound, SplitSeed, TaskConfig};
pub use context::{IterationContext, SeedCounter};
pub use error::TaskError;
pub use grid::{Grid, LocalGrid};
pub use task::{BenchmarkTask, RunSummary, Score};
pub use worker::{WorkerContext, run_on_worker};
