//! # gable-train
//!
//! The two training entry points of the pipeline: the per-combination
//! tuning run (fit, score on validation, write a result file) and the
//! final run (fit on the outer training partition with the selected
//! hyperparameters, score on test, persist the artifact).

pub mod trainer;

pub use trainer::*;
