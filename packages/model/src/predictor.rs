use crate::classifier::Classifier;
use crate::error::PredictionError;
use crate::lexicon::{LexiconAnalyzer, PolarityAnalyzer};
use sentiment_types::{PredictionResult, Sentiment};
use std::sync::Arc;

/// Italian words that still count as praise when the lexicon finds nothing.
pub const POSITIVE_KEYWORDS: [&str; 7] = [
    "fantastico",
    "ottimo",
    "bello",
    "piace",
    "adoro",
    "meraviglioso",
    "eccellente",
];

const KEYWORD_CONFIDENCE: f64 = 0.9;
const NEUTRAL_CONFIDENCE: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Model,
    LexicalFallback,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Model => "model",
            Strategy::LexicalFallback => "lexical_fallback",
        }
    }
}

/// Resolves one review into a sentiment and confidence.
pub trait Predictor: Send + Sync {
    fn strategy(&self) -> Strategy;

    fn predict(&self, review: &str) -> Result<PredictionResult, PredictionError>;
}

pub struct ModelPredictor {
    classifier: Arc<dyn Classifier>,
}

impl ModelPredictor {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }
}

impl Predictor for ModelPredictor {
    fn strategy(&self) -> Strategy {
        Strategy::Model
    }

    fn predict(&self, review: &str) -> Result<PredictionResult, PredictionError> {
        let batch = [review];

        let labels = self.classifier.predict(&batch)?;
        let label = labels.first().ok_or(PredictionError::EmptyPrediction)?;
        let sentiment = Sentiment::from_label(label)
            .ok_or_else(|| PredictionError::UnknownLabel(label.clone()))?;

        let confidence = if self.classifier.supports_proba() {
            let probas = self.classifier.predict_proba(&batch)?;
            let row = probas.first().ok_or(PredictionError::EmptyPrediction)?;
            row.iter()
                .copied()
                .reduce(f64::max)
                .ok_or(PredictionError::EmptyPrediction)?
        } else {
            1.0
        };

        if !(0.0..=1.0).contains(&confidence) {
            return Err(PredictionError::InvalidConfidence(confidence));
        }

        Ok(PredictionResult::new(sentiment, confidence))
    }
}

/// Used only when no classifier could be loaded.
pub struct LexicalFallbackPredictor<A = LexiconAnalyzer> {
    analyzer: A,
}

impl LexicalFallbackPredictor<LexiconAnalyzer> {
    pub fn new() -> Self {
        Self {
            analyzer: LexiconAnalyzer::new(),
        }
    }
}

impl Default for LexicalFallbackPredictor<LexiconAnalyzer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: PolarityAnalyzer> LexicalFallbackPredictor<A> {
    pub fn with_analyzer(analyzer: A) -> Self {
        Self { analyzer }
    }
}

impl<A: PolarityAnalyzer> Predictor for LexicalFallbackPredictor<A> {
    fn strategy(&self) -> Strategy {
        Strategy::LexicalFallback
    }

    fn predict(&self, review: &str) -> Result<PredictionResult, PredictionError> {
        resolve_polarity(review, self.analyzer.polarity(review))
    }
}

/// Maps a polarity score onto a result.
///
/// Zero polarity is never neutral: keyword hits are positive, everything else
/// is a low-confidence negative.
pub fn resolve_polarity(review: &str, polarity: f64) -> Result<PredictionResult, PredictionError> {
    if !polarity.is_finite() {
        return Err(PredictionError::InvalidPolarity(polarity));
    }
    let polarity = polarity.clamp(-1.0, 1.0);

    let result = if polarity > 0.0 {
        PredictionResult::new(Sentiment::Positive, 0.5 + polarity / 2.0)
    } else if polarity < 0.0 {
        PredictionResult::new(Sentiment::Negative, 0.5 + polarity.abs() / 2.0)
    } else {
        let lowered = review.to_lowercase();
        if POSITIVE_KEYWORDS.iter().any(|w| lowered.contains(w)) {
            PredictionResult::new(Sentiment::Positive, KEYWORD_CONFIDENCE)
        } else {
            PredictionResult::new(Sentiment::Negative, NEUTRAL_CONFIDENCE)
        }
    };

    Ok(result)
}
