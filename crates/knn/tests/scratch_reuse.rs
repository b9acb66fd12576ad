//! Integration tests for KnnScratch reuse.

use knnbench_dataset::LabeledDataset;
use knnbench_knn::distance::manhattan;
use knnbench_knn::{KnnConfig, KnnRegression, KnnScratch};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_dataset(rng: &mut StdRng, n_rows: usize, n_features: usize) -> LabeledDataset {
    let features: Vec<f64> = (0..n_rows * n_features).map(|_| rng.random()).collect();
    let labels: Vec<f64> = (0..n_rows).map(|_| rng.random_range(0.0..100.0)).collect();
    LabeledDataset::new(features, n_features, labels).unwrap()
}

/// Scratch version produces identical results to the allocating one.
#[test]
fn scratch_matches_non_scratch() {
    let mut rng = StdRng::seed_from_u64(42);
    let model =
        KnnRegression::new(random_dataset(&mut rng, 160, 6), manhattan, KnnConfig::new(7))
            .unwrap();
    let queries = random_dataset(&mut rng, 40, 6);

    let mut scratch = KnnScratch::new(160);
    for row in queries.rows() {
        let a = model.predict(row.features).unwrap();
        let b = model.predict_with_scratch(row.features, &mut scratch).unwrap();
        assert_eq!(a, b);
    }
}

/// One scratch shared by models of different sizes.
#[test]
fn scratch_across_models() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut scratch = KnnScratch::new(5);
    for n_rows in [200, 3, 50, 1] {
        let model = KnnRegression::new(
            random_dataset(&mut rng, n_rows, 2),
            manhattan,
            KnnConfig::new(4),
        )
        .unwrap();
        let y = model.predict_with_scratch(&[0.5, 0.5], &mut scratch).unwrap();
        assert!((0.0..100.0).contains(&y), "n_rows {n_rows}: {y}");
    }
}
