//! Review classification
//!
//! Two mutually exclusive prediction strategies live here:
//! - [`ModelPredictor`] wraps a [`Classifier`] loaded from a serialized
//!   [`SentimentModel`] artifact.
//! - [`LexicalFallbackPredictor`] scores reviews with a polarity lexicon and is
//!   used whenever no artifact could be loaded.
//!
//! The strategy is chosen once at startup by [`loader::select_predictor`] and
//! shared read-only afterwards.

pub mod artifact;
pub mod classifier;
pub mod error;
pub mod lexicon;
pub mod loader;
pub mod predictor;
pub mod vectorizer;

pub use artifact::SentimentModel;
pub use classifier::Classifier;
pub use error::{ModelError, PredictionError};
pub use lexicon::{LexiconAnalyzer, PolarityAnalyzer};
pub use loader::{ModelSource, select_predictor};
pub use predictor::{LexicalFallbackPredictor, ModelPredictor, Predictor, Strategy};
