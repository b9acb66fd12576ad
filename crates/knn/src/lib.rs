//! Distance-weighted k-nearest-neighbor regression.
//!
//! Two independent knobs shape a model:
//!
//! | Knob | Type | Built-ins |
//! |------|------|-----------|
//! | Metric | [`MetricFn`] (function pointer) | Manhattan, Euclidean, Hamming |
//! | Strategy | [`Strategy`] | `Unweighted` (mean), `Weighted` (`1/(d+ε)`) |
//!
//! # Quick start
//!
//! ```
//! use knnbench_dataset::LabeledDataset;
//! use knnbench_knn::{KnnConfig, KnnRegression, Metric, Strategy};
//!
//! let train = LabeledDataset::from_rows(&[vec![0.0], vec![10.0]], &[10.0, 20.0]).unwrap();
//! let config = KnnConfig::new(2).with_strategy(Strategy::Weighted);
//! let model = KnnRegression::new(train, Metric::Manhattan.as_fn(), config).unwrap();
//!
//! let y = model.predict(&[0.0]).unwrap();
//! assert!(y > 10.0 && y < 15.0);
//! ```
//!
//! # Architecture
//!
//! ```text
//! KnnRegression::predict()
//!   ├─ validate query
//!   ├─ distances_to()        (distance.rs)
//!   ├─ select_k_nearest()    (select.rs)
//!   └─ combine labels        (Unweighted | Weighted)
//! ```
//!
//! For hot loops, use [`KnnRegression::predict_with_scratch`] with a reusable
//! [`KnnScratch`] to avoid per-call heap allocation.

pub mod config;
pub mod distance;
pub mod error;
pub mod knn;
pub mod result;

pub(crate) mod select;

pub use config::{KnnConfig, Strategy};
pub use distance::{Metric, MetricFn};
pub use error::KnnError;
pub use knn::{KnnRegression, KnnScratch};
pub use result::Neighbor;
