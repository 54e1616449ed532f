//! Persisted model artifact: the fitted forest plus the feature schema it
//! was trained against.

use std::path::Path;

use serde::{Deserialize, Serialize};

use gable_types::{GableResult, HyperparamRecord, ModelError};

use crate::forest::RandomForestRegressor;

/// A trained regressor bound to its feature schema.
///
/// Written once by the final training run; readers treat it as immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub feature_names: Vec<String>,
    pub hyperparams: HyperparamRecord,
    pub forest: RandomForestRegressor,
}

impl ModelArtifact {
    pub fn new(feature_names: Vec<String>, forest: RandomForestRegressor) -> Self {
        Self {
            feature_names,
            hyperparams: forest.params().clone(),
            forest,
        }
    }

    pub fn n_features(&self) -> usize {
        self.forest.n_features()
    }

    /// Predict one feature vector, validating its width against the schema.
    pub fn predict(&self, features: &[f64]) -> GableResult<f64> {
        self.forest.predict_row(features)
    }

    /// Serialize to JSON at `path`, overwriting any prior artifact.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> GableResult<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path.as_ref(), json)?;
        tracing::info!(path = %path.as_ref().display(), "Saved model artifact");
        Ok(())
    }

    /// Load an artifact from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> GableResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ModelError::ArtifactNotFound {
                path: path.display().to_string(),
            }
            .into());
        }
        let contents = std::fs::read_to_string(path)?;
        let artifact: Self =
            serde_json::from_str(&contents).map_err(|e| ModelError::ArtifactCorrupt {
                message: e.to_string(),
            })?;
        Ok(artifact)
    }
}
