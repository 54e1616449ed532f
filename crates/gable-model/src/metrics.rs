//! Goodness-of-fit scoring.

use gable_types::{GableResult, ModelError};

/// Coefficient of determination: `1 - SS_res / SS_tot`.
///
/// Returns 0.0 when the target is constant (SS_tot = 0), matching the
/// convention of treating a constant predictor as the baseline.
pub fn r2_score(actual: &[f64], predicted: &[f64]) -> GableResult<f64> {
    if actual.len() != predicted.len() {
        return Err(ModelError::LengthMismatch {
            features: predicted.len(),
            targets: actual.len(),
        }
        .into());
    }
    if actual.is_empty() {
        return Err(ModelError::EmptyTrainingData.into());
    }

    let mean = actual.iter().sum::<f64>() / actual.len() as f64;
    let ss_tot: f64 = actual.iter().map(|y| (y - mean).powi(2)).sum();
    let ss_res: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(y, p)| (y - p).powi(2))
        .sum();

    if ss_tot == 0.0 {
        return Ok(0.0);
    }
    Ok(1.0 - ss_res / ss_tot)
}
