//! Per-column standardization to zero mean, unit variance.

use gable_types::{DataError, GableResult, ModelError};

/// Column-wise standard scaler.
///
/// Variance uses the population denominator `n`. Constant columns get a
/// scale of 1.0 so transforming them yields all zeros rather than NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    pub means: Vec<f64>,
    pub stds: Vec<f64>,
}

impl StandardScaler {
    /// Compute column statistics over the full matrix.
    pub fn fit(features: &[Vec<f64>]) -> GableResult<Self> {
        let n_rows = features.len();
        if n_rows == 0 {
            return Err(DataError::Empty {
                path: "<in-memory matrix>".to_string(),
            }
            .into());
        }
        let n_cols = features[0].len();

        let mut means = vec![0.0; n_cols];
        for row in features {
            for (col, value) in row.iter().enumerate() {
                means[col] += value;
            }
        }
        for mean in &mut means {
            *mean /= n_rows as f64;
        }

        let mut stds = vec![0.0; n_cols];
        for row in features {
            for (col, value) in row.iter().enumerate() {
                let diff = value - means[col];
                stds[col] += diff * diff;
            }
        }
        for std in &mut stds {
            *std = (*std / n_rows as f64).sqrt();
            if *std == 0.0 {
                *std = 1.0;
            }
        }

        Ok(Self { means, stds })
    }

    /// Apply the fitted statistics to a matrix.
    pub fn transform(&self, features: &[Vec<f64>]) -> GableResult<Vec<Vec<f64>>> {
        let mut scaled = Vec::with_capacity(features.len());
        for row in features {
            if row.len() != self.means.len() {
                return Err(ModelError::FeatureWidthMismatch {
                    expected: self.means.len(),
                    got: row.len(),
                }
                .into());
            }
            scaled.push(
                row.iter()
                    .enumerate()
                    .map(|(col, value)| (value - self.means[col]) / self.stds[col])
                    .collect(),
            );
        }
        Ok(scaled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaled_columns_have_zero_mean_unit_variance() {
        let features = vec![
            vec![1.0, 100.0],
            vec![2.0, 200.0],
            vec![3.0, 300.0],
            vec![4.0, 400.0],
        ];
        let scaler = StandardScaler::fit(&features).unwrap();
        let scaled = scaler.transform(&features).unwrap();

        for col in 0..2 {
            let mean: f64 = scaled.iter().map(|r| r[col]).sum::<f64>() / scaled.len() as f64;
            let var: f64 =
                scaled.iter().map(|r| (r[col] - mean).powi(2)).sum::<f64>() / scaled.len() as f64;
            assert!(mean.abs() < 1e-12, "column {col} mean {mean}");
            assert!((var - 1.0).abs() < 1e-12, "column {col} variance {var}");
        }
    }

    #[test]
    fn constant_column_maps_to_zeros() {
        let features = vec![vec![5.0], vec![5.0], vec![5.0]];
        let scaler = StandardScaler::fit(&features).unwrap();
        let scaled = scaler.transform(&features).unwrap();
        assert!(scaled.iter().all(|r| r[0] == 0.0));
    }

    #[test]
    fn width_mismatch_is_rejected() {
        let scaler = StandardScaler::fit(&[vec![1.0, 2.0]]).unwrap();
        assert!(scaler.transform(&[vec![1.0]]).is_err());
    }
}
