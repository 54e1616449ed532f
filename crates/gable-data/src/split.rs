//! Deterministic train/validation/test partitioning.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use gable_types::{DataError, GableResult};

/// One partition of the dataset: rows plus their targets.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub features: Vec<Vec<f64>>,
    pub target: Vec<f64>,
}

impl Partition {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// The prepared dataset: the full (standardized) matrix and target, plus
/// the three disjoint partitions derived from them.
#[derive(Debug, Clone)]
pub struct DatasetSplit {
    pub feature_names: Vec<String>,
    pub features: Vec<Vec<f64>>,
    pub target: Vec<f64>,
    pub train: Partition,
    pub validation: Partition,
    pub test: Partition,
}

impl DatasetSplit {
    /// Build the three-way split: withhold `test_fraction` of all rows as
    /// test, then `validation_fraction` of the remainder as validation.
    /// Both stages shuffle with the same seed, so the partitions are
    /// identical across runs.
    pub fn new(
        feature_names: Vec<String>,
        features: Vec<Vec<f64>>,
        target: Vec<f64>,
        test_fraction: f64,
        validation_fraction: f64,
        seed: u64,
    ) -> GableResult<Self> {
        let (outer_train, test) = split_two(&features, &target, test_fraction, seed)?;
        let (train, validation) = split_two(
            &outer_train.features,
            &outer_train.target,
            validation_fraction,
            seed,
        )?;

        Ok(Self {
            feature_names,
            features,
            target,
            train,
            validation,
            test,
        })
    }

    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }
}

/// Shuffle rows with a seeded RNG and split off `holdout_fraction` of them.
///
/// Returns `(retained, holdout)`. The holdout size is the ceiling of
/// `n * holdout_fraction`, taken from the front of the permutation.
pub fn split_two(
    features: &[Vec<f64>],
    target: &[f64],
    holdout_fraction: f64,
    seed: u64,
) -> GableResult<(Partition, Partition)> {
    if holdout_fraction <= 0.0 || holdout_fraction >= 1.0 {
        return Err(DataError::InvalidFraction {
            fraction: holdout_fraction,
        }
        .into());
    }

    let n = features.len();
    let n_holdout = ((n as f64) * holdout_fraction).ceil() as usize;
    if n_holdout == 0 || n_holdout >= n {
        return Err(DataError::InsufficientRows {
            rows: n,
            minimum: 2,
        }
        .into());
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let gather = |idx: &[usize]| Partition {
        features: idx.iter().map(|&i| features[i].clone()).collect(),
        target: idx.iter().map(|&i| target[i]).collect(),
    };

    let holdout = gather(&indices[..n_holdout]);
    let retained = gather(&indices[n_holdout..]);
    Ok((retained, holdout))
}
