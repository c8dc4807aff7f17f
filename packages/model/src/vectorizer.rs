//! Bag-of-words feature extraction for serialized text models.
//!
//! Reproduces the count/TF-IDF vectorizers review classifiers are usually
//! exported with: the `(?u)\b\w\w+\b` token pattern, word n-grams joined by a
//! single space, optional binary or sublinear term frequency, IDF weighting
//! and row normalization.

use crate::error::ModelError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?u)\b\w\w+\b").expect("token pattern is a valid regex"));

/// Sparse feature row as `(feature index, value)` pairs, sorted by index.
pub type SparseRow = Vec<(usize, f64)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

fn default_true() -> bool {
    true
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vectorizer {
    /// Term to feature index
    pub vocabulary: HashMap<String, usize>,
    pub n_features: usize,
    #[serde(default = "default_true")]
    pub lowercase: bool,
    /// Inclusive `(min_n, max_n)` word n-gram range
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub binary: bool,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idf: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub norm: Option<Norm>,
}

impl Vectorizer {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.n_features == 0 {
            return Err(ModelError::Invalid("vectorizer has no features".to_string()));
        }

        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ModelError::Invalid(format!(
                "invalid ngram_range ({}, {})",
                min_n, max_n
            )));
        }

        if let Some((term, index)) = self
            .vocabulary
            .iter()
            .find(|(_, index)| **index >= self.n_features)
        {
            return Err(ModelError::Invalid(format!(
                "vocabulary term '{}' maps to index {} but only {} features exist",
                term, index, self.n_features
            )));
        }

        if let Some(idf) = &self.idf {
            if idf.len() != self.n_features {
                return Err(ModelError::Invalid(format!(
                    "idf has {} entries, expected {}",
                    idf.len(),
                    self.n_features
                )));
            }
            if idf.iter().any(|w| !w.is_finite()) {
                return Err(ModelError::Invalid("idf contains non-finite weights".to_string()));
            }
        }

        Ok(())
    }

    pub fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        TOKEN_PATTERN.find_iter(text).map(|m| m.as_str()).collect()
    }

    pub fn transform(&self, text: &str) -> SparseRow {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        let tokens = self.tokenize(&text);

        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        let (min_n, max_n) = self.ngram_range;
        for n in min_n..=max_n {
            if n > tokens.len() {
                break;
            }
            for window in tokens.windows(n) {
                let term = window.join(" ");
                if let Some(&index) = self.vocabulary.get(&term) {
                    *counts.entry(index).or_insert(0.0) += 1.0;
                }
            }
        }

        let mut row: SparseRow = counts
            .into_iter()
            .map(|(index, count)| {
                let mut value = if self.binary { 1.0 } else { count };
                if self.sublinear_tf {
                    value = 1.0 + value.ln();
                }
                if let Some(idf) = &self.idf {
                    value *= idf.get(index).copied().unwrap_or(1.0);
                }
                (index, value)
            })
            .collect();

        if let Some(norm) = self.norm {
            let magnitude = match norm {
                Norm::L1 => row.iter().map(|(_, v)| v.abs()).sum::<f64>(),
                Norm::L2 => row.iter().map(|(_, v)| v * v).sum::<f64>().sqrt(),
            };
            if magnitude > 0.0 {
                for (_, value) in row.iter_mut() {
                    *value /= magnitude;
                }
            }
        }

        row
    }
}

/// Dot product of a sparse row with a dense weight vector.
pub fn sparse_dot(row: &[(usize, f64)], weights: &[f64]) -> f64 {
    row.iter()
        .map(|(index, value)| weights.get(*index).copied().unwrap_or(0.0) * value)
        .sum()
}
