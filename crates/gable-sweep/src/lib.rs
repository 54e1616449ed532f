//! # gable-sweep
//!
//! The sweep side of the Gable pipeline: parse per-run result files,
//! pick the best-scoring hyperparameter record, and emit one Kubernetes
//! job manifest per grid combination.

pub mod jobs;
pub mod results;
pub mod select;

pub use jobs::*;
pub use results::*;
pub use select::*;
