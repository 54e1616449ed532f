//! # gable-data
//!
//! Dataset ingestion and preparation for the Gable pipeline: CSV loading,
//! full-matrix standardization, and the deterministic three-way split.

pub mod dataset;
pub mod scaler;
pub mod split;

pub use dataset::*;
pub use scaler::*;
pub use split::*;

use gable_types::{GableResult, SPLIT_SEED, TEST_FRACTION, VALIDATION_FRACTION};

/// Load, standardize, and split the dataset in one call.
///
/// This is the explicit initialization entry point: every binary that needs
/// data calls it once and threads the returned [`DatasetSplit`] through,
/// rather than relying on process-global state.
pub fn prepare_dataset<P: AsRef<std::path::Path>>(path: P) -> GableResult<DatasetSplit> {
    let dataset = Dataset::from_csv(path)?;
    tracing::info!(
        rows = dataset.len(),
        features = dataset.n_features(),
        "Loaded dataset"
    );

    // Scaling statistics come from the entire matrix, not just the training
    // partition. This reproduces the reference pipeline's behavior; a
    // leakage-free variant would fit the scaler on the training rows only.
    let scaler = StandardScaler::fit(&dataset.features)?;
    let scaled = scaler.transform(&dataset.features)?;

    DatasetSplit::new(
        dataset.feature_names,
        scaled,
        dataset.target,
        TEST_FRACTION,
        VALIDATION_FRACTION,
        SPLIT_SEED,
    )
}
