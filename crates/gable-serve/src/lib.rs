//! # gable-serve
//!
//! Single-endpoint inference service: load the persisted model artifact
//! once, answer `POST /predict` with a scalar prediction. Minimal HTTP/1.1
//! over raw TCP; the model is read-only after load.

pub mod http;
pub mod service;

pub use http::*;
pub use service::*;
