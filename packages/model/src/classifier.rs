use sentiment_types::{Result, anyhow};

/// A trained text classifier.
///
/// Mirrors the usual estimator surface: `predict` maps a batch of texts to
/// labels, `predict_proba` to one probability row per text. Implementations
/// must be safe to share across request handlers without locking.
pub trait Classifier: Send + Sync {
    fn predict(&self, texts: &[&str]) -> Result<Vec<String>>;

    /// Whether [`Classifier::predict_proba`] is backed by a real implementation.
    fn supports_proba(&self) -> bool {
        false
    }

    fn predict_proba(&self, _texts: &[&str]) -> Result<Vec<Vec<f64>>> {
        Err(anyhow!("Classifier does not provide class probabilities"))
    }

    /// Human readable name used in logs.
    fn describe(&self) -> String;
}
