//! # gable-types
//!
//! Core records and error taxonomy shared by every Gable crate: the
//! hyperparameter record, scored sweep results, result-file markers, and
//! the pipeline's fixed seeds and paths.

pub mod errors;
pub mod hyperparams;
pub mod results;

pub use errors::*;
pub use hyperparams::*;
pub use results::*;

/// Seed for all dataset shuffling/splitting.
pub const SPLIT_SEED: u64 = 42;

/// Seed for forest construction (bootstrap sampling). Deliberately distinct
/// from [`SPLIT_SEED`] so partitioning and fitting never share an RNG stream.
pub const MODEL_SEED: u64 = 1337;

/// Fraction of the full dataset withheld as the test partition.
pub const TEST_FRACTION: f64 = 0.2;

/// Fraction of the remaining training data withheld as validation.
pub const VALIDATION_FRACTION: f64 = 0.125;

/// Default location of the winning hyperparameter set.
pub const BEST_HYPERPARAMS_PATH: &str = "best_hyperparams.json";

/// Default location of the persisted model artifact.
pub const MODEL_ARTIFACT_PATH: &str = "final_model.json";
