//! Lexicon based polarity scoring for English text.
//!
//! Each sentiment-bearing word contributes one assessment. Intensifiers scale
//! the next assessment, negators flip it and halve it. The score is the mean
//! of all assessments clamped to `[-1, 1]`, or `0.0` when nothing matched.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Source of polarity scores in `[-1, 1]`.
pub trait PolarityAnalyzer: Send + Sync {
    fn polarity(&self, text: &str) -> f64;
}

const NEGATION_FACTOR: f64 = -0.5;

/// Plain words a pending modifier may skip over ("not a very good film").
const MAX_MODIFIER_GAP: usize = 2;

#[rustfmt::skip]
const POLARITY_ENTRIES: &[(&str, f64)] = &[
    ("amazing", 0.6), ("awesome", 1.0), ("beautiful", 0.85), ("best", 1.0),
    ("brilliant", 0.9), ("cheap", 0.4), ("clean", 0.37), ("comfortable", 0.4),
    ("convenient", 0.45), ("cool", 0.35), ("delicious", 1.0), ("delightful", 0.7),
    ("easy", 0.43), ("enjoyable", 0.4), ("excellent", 1.0), ("exceptional", 0.67),
    ("fabulous", 0.4), ("fantastic", 0.4), ("fast", 0.2), ("favorite", 0.5),
    ("fine", 0.42), ("fun", 0.3), ("glad", 0.5), ("good", 0.7),
    ("gorgeous", 0.7), ("great", 0.8), ("happy", 0.8), ("helpful", 0.5),
    ("impressive", 1.0), ("incredible", 0.9), ("love", 0.5), ("loved", 0.7),
    ("lovely", 0.5), ("nice", 0.6), ("outstanding", 0.5), ("perfect", 1.0),
    ("pleasant", 0.73), ("pleased", 0.5), ("positive", 0.23), ("recommend", 0.4),
    ("recommended", 0.4), ("reliable", 0.4), ("satisfied", 0.5), ("smooth", 0.4),
    ("solid", 0.3), ("stunning", 0.5), ("superb", 1.0), ("useful", 0.3),
    ("well", 0.2), ("wonderful", 1.0), ("worth", 0.3),
    ("angry", -0.5), ("annoying", -0.8), ("awful", -1.0), ("bad", -0.7),
    ("boring", -1.0), ("broken", -0.4), ("cheaply", -0.3), ("complicated", -0.5),
    ("confusing", -0.4), ("damaged", -0.5), ("defective", -0.5), ("difficult", -0.5),
    ("disappointed", -0.75), ("disappointing", -0.6), ("dirty", -0.6), ("dull", -0.3),
    ("expensive", -0.5), ("fake", -0.5), ("faulty", -0.5), ("hate", -0.8),
    ("hated", -0.9), ("horrible", -1.0), ("late", -0.3), ("mediocre", -0.4),
    ("mess", -0.5), ("negative", -0.3), ("poor", -0.4), ("poorly", -0.4),
    ("rude", -0.3), ("sad", -0.5), ("slow", -0.3), ("terrible", -1.0),
    ("unacceptable", -0.8), ("unhappy", -0.6), ("useless", -0.5), ("waste", -0.6),
    ("weak", -0.38), ("worse", -0.4), ("worst", -1.0), ("wrong", -0.5),
];

#[rustfmt::skip]
const INTENSIFIER_ENTRIES: &[(&str, f64)] = &[
    ("absolutely", 1.5), ("extremely", 1.5), ("highly", 1.3), ("incredibly", 1.5),
    ("pretty", 1.1), ("quite", 1.1), ("really", 1.3), ("so", 1.3),
    ("super", 1.3), ("too", 1.3), ("totally", 1.3), ("truly", 1.3),
    ("very", 1.3),
];

const NEGATORS: &[&str] = &["not", "no", "never", "neither", "nor", "without", "cannot"];

static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{N}']+").expect("word pattern is a valid regex"));

static POLARITIES: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| POLARITY_ENTRIES.iter().copied().collect());

static INTENSIFIERS: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| INTENSIFIER_ENTRIES.iter().copied().collect());

fn is_negator(word: &str) -> bool {
    NEGATORS.contains(&word) || word.ends_with("n't")
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconAnalyzer;

impl LexiconAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl PolarityAnalyzer for LexiconAnalyzer {
    fn polarity(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase();
        let mut assessments: Vec<f64> = Vec::new();
        let mut modifier: Option<f64> = None;
        let mut gap = 0;

        for token in WORD_PATTERN.find_iter(&lowered) {
            let word = token.as_str().trim_matches('\'');
            if word.is_empty() {
                continue;
            }

            if is_negator(word) {
                modifier = Some(modifier.unwrap_or(1.0) * NEGATION_FACTOR);
                gap = 0;
            } else if let Some(&factor) = INTENSIFIERS.get(word) {
                modifier = Some(modifier.unwrap_or(1.0) * factor);
                gap = 0;
            } else if let Some(&score) = POLARITIES.get(word) {
                assessments.push(score * modifier.take().unwrap_or(1.0));
                gap = 0;
            } else if modifier.is_some() {
                gap += 1;
                if gap > MAX_MODIFIER_GAP {
                    modifier = None;
                }
            }
        }

        if assessments.is_empty() {
            return 0.0;
        }
        let mean = assessments.iter().sum::<f64>() / assessments.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polarity(text: &str) -> f64 {
        LexiconAnalyzer::new().polarity(text)
    }

    #[test]
    fn test_single_positive_word() {
        assert!((polarity("This is a great movie!") - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_mean_of_assessments() {
        let score = polarity("Terrible experience. The item arrived broken.");
        assert!((score - -0.7).abs() < 1e-12);
    }

    #[test]
    fn test_negation_flips_and_halves() {
        assert!((polarity("not good") - -0.35).abs() < 1e-12);
        assert!((polarity("It wasn't bad at all") - 0.35).abs() < 1e-12);
    }

    #[test]
    fn test_negation_skips_articles() {
        assert!((polarity("not a good movie") - -0.35).abs() < 1e-12);
    }

    #[test]
    fn test_intensifier_is_clamped() {
        assert!((polarity("very good") - 0.91).abs() < 1e-12);
        assert_eq!(polarity("absolutely perfect"), 1.0);
    }

    #[test]
    fn test_unknown_text_is_neutral() {
        assert_eq!(polarity(""), 0.0);
        assert_eq!(polarity("Questo film è fantastico"), 0.0);
        assert_eq!(polarity("The package arrived on Tuesday"), 0.0);
    }

    #[test]
    fn test_dangling_modifier_is_dropped() {
        assert_eq!(polarity("not sure what to say about the plot twists here"), 0.0);
    }
}
