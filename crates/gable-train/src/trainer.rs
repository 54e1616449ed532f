//! Tuning and final training runs.

use std::path::{Path, PathBuf};

use gable_data::{split_two, DatasetSplit};
use gable_model::{r2_score, ModelArtifact, RandomForestRegressor};
use gable_types::{
    format_result_file, GableResult, HyperparamRecord, MODEL_SEED, SPLIT_SEED, TEST_FRACTION,
};

/// Outcome of one tuning run.
#[derive(Debug, Clone, PartialEq)]
pub struct TuningOutcome {
    pub record: HyperparamRecord,
    pub validation_r2: f64,
    pub result_path: PathBuf,
}

/// Outcome of the final training run.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalOutcome {
    pub record: HyperparamRecord,
    pub test_r2: f64,
    pub artifact_path: PathBuf,
}

/// Fit a forest with `record` on the training partition, score it on the
/// validation partition, and write the two-line result file.
pub fn tuning_run<P: AsRef<Path>>(
    split: &DatasetSplit,
    record: &HyperparamRecord,
    result_path: P,
) -> GableResult<TuningOutcome> {
    tracing::info!(record = %record, "Starting tuning run");

    let forest = RandomForestRegressor::fit(
        &split.train.features,
        &split.train.target,
        record,
        MODEL_SEED,
    )?;
    let predictions = forest.predict(&split.validation.features)?;
    let validation_r2 = r2_score(&split.validation.target, &predictions)?;

    let body = format_result_file(&record.to_json()?, validation_r2);
    std::fs::write(result_path.as_ref(), body)?;

    tracing::info!(
        r2 = validation_r2,
        path = %result_path.as_ref().display(),
        "Tuning run complete"
    );

    Ok(TuningOutcome {
        record: record.clone(),
        validation_r2,
        result_path: result_path.as_ref().to_path_buf(),
    })
}

/// Fit the final model with the selected hyperparameters.
///
/// Re-splits the full (standardized) data into train/test with the same
/// outer fraction and seed as the preparation stage, fits on train, scores
/// on test, and persists the artifact.
pub fn final_run<P: AsRef<Path>>(
    split: &DatasetSplit,
    record: &HyperparamRecord,
    artifact_path: P,
) -> GableResult<FinalOutcome> {
    tracing::info!(record = %record, "Starting final training run");

    let (train, test) = split_two(&split.features, &split.target, TEST_FRACTION, SPLIT_SEED)?;
    let forest = RandomForestRegressor::fit(&train.features, &train.target, record, MODEL_SEED)?;
    let predictions = forest.predict(&test.features)?;
    let test_r2 = r2_score(&test.target, &predictions)?;

    let artifact = ModelArtifact::new(split.feature_names.clone(), forest);
    artifact.save(artifact_path.as_ref())?;

    tracing::info!(r2 = test_r2, "Final training run complete");

    Ok(FinalOutcome {
        record: record.clone(),
        test_r2,
        artifact_path: artifact_path.as_ref().to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gable_model::ModelArtifact;
    use gable_sweep::parse_result_file;

    fn toy_split() -> DatasetSplit {
        // Noise-free linear target so even a small forest scores well.
        let features: Vec<Vec<f64>> = (0..120)
            .map(|i| vec![(i % 40) as f64 / 4.0, (i % 7) as f64])
            .collect();
        let target: Vec<f64> = features.iter().map(|r| 2.0 * r[0] - r[1]).collect();
        DatasetSplit::new(
            vec!["x0".into(), "x1".into()],
            features,
            target,
            TEST_FRACTION,
            0.125,
            SPLIT_SEED,
        )
        .unwrap()
    }

    fn small_record() -> HyperparamRecord {
        HyperparamRecord {
            n_estimators: 8,
            ..Default::default()
        }
    }

    #[test]
    fn tuning_run_writes_a_parseable_result_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("results.txt");
        let split = toy_split();

        let outcome = tuning_run(&split, &small_record(), &out).unwrap();
        let parsed = parse_result_file(&out).unwrap().unwrap();
        assert_eq!(parsed.record, outcome.record);
        assert_eq!(parsed.r2, outcome.validation_r2);
        assert!(outcome.validation_r2 > 0.5, "r2 = {}", outcome.validation_r2);
    }

    #[test]
    fn tuning_run_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let split = toy_split();
        let first = tuning_run(&split, &small_record(), dir.path().join("a.txt")).unwrap();
        let second = tuning_run(&split, &small_record(), dir.path().join("b.txt")).unwrap();
        assert_eq!(first.validation_r2, second.validation_r2);
    }

    #[test]
    fn final_run_persists_a_loadable_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let artifact_path = dir.path().join("final_model.json");
        let split = toy_split();

        let outcome = final_run(&split, &small_record(), &artifact_path).unwrap();
        assert!(outcome.test_r2 > 0.5, "r2 = {}", outcome.test_r2);

        let artifact = ModelArtifact::load(&artifact_path).unwrap();
        assert_eq!(artifact.hyperparams, outcome.record);
        assert_eq!(artifact.n_features(), 2);
        assert!(artifact.predict(&[5.0, 3.0]).is_ok());
    }
}
