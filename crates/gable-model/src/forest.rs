//! Bagged random forest built on [`DecisionTreeRegressor`].

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use gable_types::{GableResult, HyperparamRecord, ModelError};

use crate::tree::DecisionTreeRegressor;

/// Random-forest regressor: `n_estimators` trees fitted on bootstrap
/// samples, prediction is the mean of the tree predictions.
///
/// Fitting is deterministic for a fixed seed even though trees are built in
/// parallel: each tree draws its bootstrap sample from its own RNG, seeded
/// from the forest seed and the tree index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForestRegressor {
    trees: Vec<DecisionTreeRegressor>,
    params: HyperparamRecord,
    n_features: usize,
    seed: u64,
}

impl RandomForestRegressor {
    /// Fit the forest with the given hyperparameters and seed.
    pub fn fit(
        features: &[Vec<f64>],
        target: &[f64],
        params: &HyperparamRecord,
        seed: u64,
    ) -> GableResult<Self> {
        if features.is_empty() {
            return Err(ModelError::EmptyTrainingData.into());
        }
        if features.len() != target.len() {
            return Err(ModelError::LengthMismatch {
                features: features.len(),
                targets: target.len(),
            }
            .into());
        }
        params.validate()?;

        let n = features.len();
        tracing::debug!(
            n_estimators = params.n_estimators,
            rows = n,
            "Fitting random forest"
        );

        let trees: Vec<GableResult<DecisionTreeRegressor>> = (0..params.n_estimators)
            .into_par_iter()
            .map(|tree_idx| {
                let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(tree_idx as u64));
                let sample: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
                DecisionTreeRegressor::fit_on_indices(features, target, &sample, params)
            })
            .collect();

        let trees = trees.into_iter().collect::<GableResult<Vec<_>>>()?;

        Ok(Self {
            trees,
            params: params.clone(),
            n_features: features[0].len(),
            seed,
        })
    }

    pub fn params(&self) -> &HyperparamRecord {
        &self.params
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Seed the forest was fitted with; persisted with the artifact so a
    /// fit can be reproduced from the hyperparameters alone.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Predict a single row: mean of the per-tree predictions.
    pub fn predict_row(&self, row: &[f64]) -> GableResult<f64> {
        if self.trees.is_empty() {
            return Err(ModelError::NotFitted.into());
        }
        if row.len() != self.n_features {
            return Err(ModelError::FeatureWidthMismatch {
                expected: self.n_features,
                got: row.len(),
            }
            .into());
        }
        let mut sum = 0.0;
        for tree in &self.trees {
            sum += tree.predict_row(row)?;
        }
        Ok(sum / self.trees.len() as f64)
    }

    /// Predict a batch of rows.
    pub fn predict(&self, rows: &[Vec<f64>]) -> GableResult<Vec<f64>> {
        rows.iter().map(|row| self.predict_row(row)).collect()
    }
}
