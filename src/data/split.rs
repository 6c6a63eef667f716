//! Seeded train/test splitting

use crate::core::{ClassifyError, Dataset, Result};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Split a dataset into `(train, test)` parts
///
/// The sample indices are shuffled with a generator seeded from `seed`; the
/// first `floor(n * test_ratio)` shuffled indices form the test part and the
/// rest the training part. The same seed always yields the same split.
///
/// `test_ratio` must lie in `[0, 1)` and the training part must not be
/// empty. The test part may be empty for small ratios.
pub fn train_test_split(dataset: &Dataset, test_ratio: f64, seed: u64) -> Result<(Dataset, Dataset)> {
    if !(0.0..1.0).contains(&test_ratio) {
        return Err(ClassifyError::InvalidParameter(format!(
            "test ratio must be in [0, 1), got {test_ratio}"
        )));
    }

    let n = dataset.len();
    let test_size = (n as f64 * test_ratio).floor() as usize;
    if test_size >= n {
        return Err(ClassifyError::InvalidParameter(format!(
            "test ratio {test_ratio} leaves no training samples out of {n}"
        )));
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let (test_idx, train_idx) = indices.split_at(test_size);
    debug!(
        "Split {n} samples into {} train / {} test (seed {seed})",
        train_idx.len(),
        test_idx.len()
    );

    Ok((subset(dataset, train_idx), subset(dataset, test_idx)))
}

fn subset(dataset: &Dataset, indices: &[usize]) -> Dataset {
    let features = indices
        .iter()
        .map(|&i| dataset.features()[i].clone())
        .collect();
    let labels = indices.iter().map(|&i| dataset.labels()[i]).collect();
    Dataset::from_parts(features, labels)
}
