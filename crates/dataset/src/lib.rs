//! Labeled numeric datasets for the kNN regression benchmark.
//!
//! A [`LabeledDataset`] moves through the pipeline by ownership:
//!
//! ```text
//! DatasetSource::shuffled(seed)   (source.rs)
//!   ├─ normalize_min_max()        (normalize.rs, in place)
//!   └─ split()                    (split.rs)  → TrainTestSplit { train, test }
//! ```
//!
//! # Quick start
//!
//! ```
//! use knnbench_dataset::{DatasetSource, SyntheticShape, SyntheticSource, normalize_min_max, split};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let source = SyntheticSource::new(&SyntheticShape::default()).unwrap();
//! let mut ds = source.shuffled(1).unwrap();
//! normalize_min_max(&mut ds);
//! let parts = split(&ds, 0.2, &mut StdRng::seed_from_u64(1)).unwrap();
//! assert_eq!(parts.test().n_rows(), 42);
//! ```

pub mod dataset;
pub mod error;
pub mod normalize;
pub mod source;
pub mod split;

pub use dataset::{LabeledDataset, Row};
pub use error::DatasetError;
pub use normalize::{MinMaxStats, normalize_min_max};
pub use source::{DatasetSource, InMemorySource, SyntheticShape, SyntheticSource};
pub use split::{TrainTestSplit, split, test_size};
