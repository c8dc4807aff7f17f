//! Shared types for the review sentiment service.
//!
//! Re-exports the error plumbing used across the workspace so every crate
//! agrees on one `Result`/`Error` pair.

pub use ::anyhow::{self, Error, Result, anyhow};
pub use serde_json as json;
pub use serde_json::Value;

pub mod prediction;

pub use prediction::{PredictionRequest, PredictionResult, Sentiment};
