//! # gable-model
//!
//! The regression ensemble behind the Gable pipeline: a CART-style decision
//! tree, a bagged random forest with deterministic seeding, the R² metric,
//! and JSON persistence for fitted models.

pub mod artifact;
pub mod forest;
pub mod metrics;
pub mod tree;

pub use artifact::*;
pub use forest::*;
pub use metrics::*;
pub use tree::*;
