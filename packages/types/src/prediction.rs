use serde::{Deserialize, Serialize};
use std::fmt;

/// Polarity label returned by the service. There is no neutral class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
        }
    }

    /// Maps a classifier label onto a sentiment.
    ///
    /// Accepts the spellings commonly produced by exported review classifiers,
    /// case-insensitively: `positive`/`pos`/`1` and `negative`/`neg`/`0`/`-1`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "positive" | "pos" | "1" => Some(Sentiment::Positive),
            "negative" | "neg" | "0" | "-1" => Some(Sentiment::Negative),
            _ => None,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /predict`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub review: String,
}

/// Outcome of a single prediction, produced fresh for every request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub sentiment: Sentiment,
    /// Always within `[0, 1]`.
    pub confidence: f64,
}

impl PredictionResult {
    pub fn new(sentiment: Sentiment, confidence: f64) -> Self {
        Self {
            sentiment,
            confidence,
        }
    }
}
