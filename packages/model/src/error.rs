use std::fmt;

/// Errors raised while acquiring or validating a model artifact.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Invalid model artifact: {0}")]
    Invalid(String),

    #[error("Failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Download failed: {0}")]
    Download(#[from] reqwest::Error),
}

/// Any fault while resolving a single prediction.
///
/// The display text is what callers receive in the `error` field, so variants
/// carry the underlying message verbatim.
#[derive(Debug)]
pub enum PredictionError {
    Classifier(sentiment_types::Error),
    EmptyPrediction,
    UnknownLabel(String),
    InvalidConfidence(f64),
    InvalidPolarity(f64),
    Panicked(String),
}

impl fmt::Display for PredictionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictionError::Classifier(err) => write!(f, "{}", err),
            PredictionError::EmptyPrediction => write!(f, "Got an empty prediction"),
            PredictionError::UnknownLabel(label) => {
                write!(f, "Couldn't map label '{}' to a sentiment", label)
            }
            PredictionError::InvalidConfidence(value) => {
                write!(f, "Confidence {} is outside [0, 1]", value)
            }
            PredictionError::InvalidPolarity(value) => {
                write!(f, "Polarity {} is not a finite number", value)
            }
            PredictionError::Panicked(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for PredictionError {}

impl From<sentiment_types::Error> for PredictionError {
    fn from(err: sentiment_types::Error) -> Self {
        PredictionError::Classifier(err)
    }
}
