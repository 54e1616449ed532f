//! The four-field hyperparameter record that governs forest construction.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

use crate::{GableResult, ModelError, SweepError};

/// Hyperparameters for the random-forest regressor.
///
/// All four keys must be present in JSON for a record to deserialize;
/// `max_depth` may be `null` (unbounded depth). Serialization round-trips
/// field-for-field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HyperparamRecord {
    /// Number of trees in the forest.
    pub n_estimators: usize,
    /// Maximum tree depth; `None` means unbounded.
    #[serde(deserialize_with = "nullable_usize")]
    pub max_depth: Option<usize>,
    /// Minimum number of samples required to split an internal node.
    pub min_samples_split: usize,
    /// Minimum number of samples required at a leaf node.
    pub min_samples_leaf: usize,
}

// Required key that still accepts an explicit `null`. A plain Option field
// would silently tolerate a missing key.
fn nullable_usize<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<usize>::deserialize(deserializer)
}

impl Default for HyperparamRecord {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }
}

impl HyperparamRecord {
    /// Check the record against the documented bounds.
    pub fn validate(&self) -> GableResult<()> {
        if self.n_estimators == 0 {
            return Err(ModelError::InvalidHyperparameter {
                parameter: "n_estimators".to_string(),
                message: "must be a positive integer".to_string(),
            }
            .into());
        }
        if let Some(depth) = self.max_depth {
            if depth == 0 {
                return Err(ModelError::InvalidHyperparameter {
                    parameter: "max_depth".to_string(),
                    message: "must be positive or null".to_string(),
                }
                .into());
            }
        }
        if self.min_samples_split < 2 {
            return Err(ModelError::InvalidHyperparameter {
                parameter: "min_samples_split".to_string(),
                message: "must be at least 2".to_string(),
            }
            .into());
        }
        if self.min_samples_leaf < 1 {
            return Err(ModelError::InvalidHyperparameter {
                parameter: "min_samples_leaf".to_string(),
                message: "must be at least 1".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Compact single-line JSON, as embedded in result files.
    pub fn to_json(&self) -> GableResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load a record from a best-hyperparameters JSON file.
    ///
    /// A missing file is a missing precondition, not a recoverable state:
    /// callers are expected to abort.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> GableResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SweepError::MissingHyperparams {
                path: path.display().to_string(),
            }
            .into());
        }
        let contents = std::fs::read_to_string(path)?;
        let record: Self = serde_json::from_str(&contents)?;
        Ok(record)
    }

    /// Persist the record as JSON, overwriting any prior file.
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> GableResult<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

impl std::fmt::Display for HyperparamRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.max_depth {
            Some(depth) => write!(
                f,
                "n_estimators={} max_depth={} min_samples_split={} min_samples_leaf={}",
                self.n_estimators, depth, self.min_samples_split, self.min_samples_leaf
            ),
            None => write!(
                f,
                "n_estimators={} max_depth=None min_samples_split={} min_samples_leaf={}",
                self.n_estimators, self.min_samples_split, self.min_samples_leaf
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GableError;

    #[test]
    fn defaults_match_cli_defaults() {
        let record = HyperparamRecord::default();
        assert_eq!(record.n_estimators, 100);
        assert_eq!(record.max_depth, None);
        assert_eq!(record.min_samples_split, 2);
        assert_eq!(record.min_samples_leaf, 1);
    }

    #[test]
    fn json_round_trip_is_lossless() {
        let record = HyperparamRecord {
            n_estimators: 50,
            max_depth: Some(10),
            min_samples_split: 5,
            min_samples_leaf: 2,
        };
        let json = record.to_json().unwrap();
        let back: HyperparamRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }

    #[test]
    fn null_max_depth_round_trips() {
        let record = HyperparamRecord {
            max_depth: None,
            ..Default::default()
        };
        let json = record.to_json().unwrap();
        assert!(json.contains("\"max_depth\":null"));
        let back: HyperparamRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.max_depth, None);
    }

    #[test]
    fn missing_key_is_rejected() {
        // max_depth omitted entirely: record unusable per the contract.
        let json = r#"{"n_estimators":100,"min_samples_split":2,"min_samples_leaf":1}"#;
        assert!(serde_json::from_str::<HyperparamRecord>(json).is_err());
    }

    #[test]
    fn validation_rejects_bad_bounds() {
        let mut record = HyperparamRecord::default();
        record.min_samples_split = 1;
        assert!(record.validate().is_err());

        let mut record = HyperparamRecord::default();
        record.n_estimators = 0;
        assert!(record.validate().is_err());

        assert!(HyperparamRecord::default().validate().is_ok());
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("best_hyperparams.json");
        let record = HyperparamRecord {
            n_estimators: 50,
            max_depth: Some(5),
            min_samples_split: 2,
            min_samples_leaf: 2,
        };
        record.to_json_file(&path).unwrap();
        let back = HyperparamRecord::from_json_file(&path).unwrap();
        assert_eq!(record, back);
    }

    #[test]
    fn missing_file_is_missing_precondition() {
        let err = HyperparamRecord::from_json_file("does/not/exist.json").unwrap_err();
        match err {
            GableError::Sweep(SweepError::MissingHyperparams { .. }) => (),
            other => panic!("Expected MissingHyperparams, got {other:?}"),
        }
    }
}
