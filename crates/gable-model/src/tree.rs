//! CART-style regression tree with MSE-reduction splits.

use serde::{Deserialize, Serialize};

use gable_types::{GableResult, HyperparamRecord, ModelError};

/// A node in the fitted tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// Single regression tree honoring `max_depth`, `min_samples_split`, and
/// `min_samples_leaf` from the hyperparameter record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTreeRegressor {
    root: Node,
    n_features: usize,
}

/// Best split found for one node.
struct SplitCandidate {
    feature: usize,
    threshold: f64,
    sse: f64,
}

impl DecisionTreeRegressor {
    /// Fit a tree on the rows selected by `indices` (duplicates allowed,
    /// which is what bootstrap sampling produces).
    pub fn fit_on_indices(
        features: &[Vec<f64>],
        target: &[f64],
        indices: &[usize],
        params: &HyperparamRecord,
    ) -> GableResult<Self> {
        if features.is_empty() || indices.is_empty() {
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

        let n_features = features[0].len();
        let root = build_node(features, target, indices, params, 0);
        Ok(Self { root, n_features })
    }

    /// Fit on every row.
    pub fn fit(
        features: &[Vec<f64>],
        target: &[f64],
        params: &HyperparamRecord,
    ) -> GableResult<Self> {
        let indices: Vec<usize> = (0..features.len()).collect();
        Self::fit_on_indices(features, target, &indices, params)
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Predict a single row.
    pub fn predict_row(&self, row: &[f64]) -> GableResult<f64> {
        if row.len() != self.n_features {
            return Err(ModelError::FeatureWidthMismatch {
                expected: self.n_features,
                got: row.len(),
            }
            .into());
        }
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { value } => return Ok(*value),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }
}

fn mean(target: &[f64], indices: &[usize]) -> f64 {
    indices.iter().map(|&i| target[i]).sum::<f64>() / indices.len() as f64
}

fn build_node(
    features: &[Vec<f64>],
    target: &[f64],
    indices: &[usize],
    params: &HyperparamRecord,
    depth: usize,
) -> Node {
    let leaf = || Node::Leaf {
        value: mean(target, indices),
    };

    if indices.len() < params.min_samples_split {
        return leaf();
    }
    if let Some(max_depth) = params.max_depth {
        if depth >= max_depth {
            return leaf();
        }
    }

    let candidate = match best_split(features, target, indices, params.min_samples_leaf) {
        Some(c) => c,
        None => return leaf(),
    };

    let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
        .iter()
        .partition(|&&i| features[i][candidate.feature] <= candidate.threshold);

    // A degenerate partition can only come from floating-point edge cases;
    // refuse to recurse on it.
    if left_idx.is_empty() || right_idx.is_empty() {
        return leaf();
    }

    Node::Split {
        feature: candidate.feature,
        threshold: candidate.threshold,
        left: Box::new(build_node(features, target, &left_idx, params, depth + 1)),
        right: Box::new(build_node(features, target, &right_idx, params, depth + 1)),
    }
}

/// Scan every feature for the split minimizing the summed squared error of
/// the two children. Candidate thresholds are midpoints between consecutive
/// distinct values in the sorted column.
fn best_split(
    features: &[Vec<f64>],
    target: &[f64],
    indices: &[usize],
    min_samples_leaf: usize,
) -> Option<SplitCandidate> {
    let n = indices.len();
    let n_features = features[indices[0]].len();
    let mut best: Option<SplitCandidate> = None;

    for feature in 0..n_features {
        let mut column: Vec<(f64, f64)> = indices
            .iter()
            .map(|&i| (features[i][feature], target[i]))
            .collect();
        column.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let total_sum: f64 = column.iter().map(|(_, y)| y).sum();
        let total_sq: f64 = column.iter().map(|(_, y)| y * y).sum();

        let mut left_sum = 0.0;
        let mut left_sq = 0.0;

        for split_at in 1..n {
            let (value, y) = column[split_at - 1];
            left_sum += y;
            left_sq += y * y;

            let next_value = column[split_at].0;
            if value == next_value {
                continue;
            }
            if split_at < min_samples_leaf || n - split_at < min_samples_leaf {
                continue;
            }

            let left_n = split_at as f64;
            let right_n = (n - split_at) as f64;
            let right_sum = total_sum - left_sum;
            let right_sq = total_sq - left_sq;

            let sse = (left_sq - left_sum * left_sum / left_n)
                + (right_sq - right_sum * right_sum / right_n);

            if best.as_ref().map_or(true, |b| sse < b.sse) {
                best = Some(SplitCandidate {
                    feature,
                    threshold: (value + next_value) / 2.0,
                    sse,
                });
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_data() -> (Vec<Vec<f64>>, Vec<f64>) {
        // Perfectly separable step function on the first feature.
        let features: Vec<Vec<f64>> = (0..20).map(|i| vec![i as f64, 0.0]).collect();
        let target: Vec<f64> = (0..20).map(|i| if i < 10 { 1.0 } else { 5.0 }).collect();
        (features, target)
    }

    #[test]
    fn learns_a_step_function() {
        let (features, target) = step_data();
        let tree =
            DecisionTreeRegressor::fit(&features, &target, &HyperparamRecord::default()).unwrap();
        assert_eq!(tree.predict_row(&[3.0, 0.0]).unwrap(), 1.0);
        assert_eq!(tree.predict_row(&[15.0, 0.0]).unwrap(), 5.0);
    }

    #[test]
    fn depth_one_suffices_for_single_step() {
        let (features, target) = step_data();
        let unbounded =
            DecisionTreeRegressor::fit(&features, &target, &HyperparamRecord::default()).unwrap();
        let shallow = DecisionTreeRegressor::fit(
            &features,
            &target,
            &HyperparamRecord {
                max_depth: Some(1),
                ..Default::default()
            },
        )
        .unwrap();
        // Depth 1 is enough for a single step; both should agree here.
        assert_eq!(
            unbounded.predict_row(&[3.0, 0.0]).unwrap(),
            shallow.predict_row(&[3.0, 0.0]).unwrap()
        );
    }

    #[test]
    fn min_samples_split_forces_a_leaf() {
        let (features, target) = step_data();
        let tree = DecisionTreeRegressor::fit(
            &features,
            &target,
            &HyperparamRecord {
                min_samples_split: 100,
                ..Default::default()
            },
        )
        .unwrap();
        // No split possible: every prediction is the global mean (3.0).
        assert_eq!(tree.predict_row(&[0.0, 0.0]).unwrap(), 3.0);
        assert_eq!(tree.predict_row(&[19.0, 0.0]).unwrap(), 3.0);
    }

    #[test]
    fn min_samples_leaf_limits_split_positions() {
        let features = vec![vec![0.0], vec![1.0], vec![2.0], vec![3.0]];
        let target = vec![0.0, 0.0, 0.0, 10.0];
        let tree = DecisionTreeRegressor::fit(
            &features,
            &target,
            &HyperparamRecord {
                min_samples_leaf: 2,
                ..Default::default()
            },
        )
        .unwrap();
        // The isolated high point cannot sit alone in a leaf.
        let prediction = tree.predict_row(&[3.0]).unwrap();
        assert!(prediction < 10.0);
    }

    #[test]
    fn constant_target_yields_single_leaf() {
        let features = vec![vec![1.0], vec![2.0], vec![3.0]];
        let target = vec![4.0, 4.0, 4.0];
        let tree =
            DecisionTreeRegressor::fit(&features, &target, &HyperparamRecord::default()).unwrap();
        assert_eq!(tree.predict_row(&[9.9]).unwrap(), 4.0);
    }

    #[test]
    fn wrong_width_is_rejected_at_predict_time() {
        let (features, target) = step_data();
        let tree =
            DecisionTreeRegressor::fit(&features, &target, &HyperparamRecord::default()).unwrap();
        assert!(tree.predict_row(&[1.0]).is_err());
    }

    #[test]
    fn empty_input_is_rejected() {
        let err =
            DecisionTreeRegressor::fit(&[], &[], &HyperparamRecord::default()).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }
}
