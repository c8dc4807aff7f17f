//! Serialized review classifiers.
//!
//! Artifacts are JSON documents tagged by `"type"`, each carrying its own
//! [`Vectorizer`] so a single file fully describes the text-to-label mapping.

use crate::classifier::Classifier;
use crate::error::ModelError;
use crate::vectorizer::{SparseRow, Vectorizer, sparse_dot};
use sentiment_types::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Linear decision function over vectorized text.
///
/// A binary model stores a single coefficient row whose positive side is
/// `classes[1]`; a multi-class model stores one row per class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    pub vectorizer: Vectorizer,
    pub classes: Vec<String>,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NaiveBayesModel {
    pub vectorizer: Vectorizer,
    pub classes: Vec<String>,
    pub class_log_prior: Vec<f64>,
    /// One row of per-feature log probabilities per class
    pub feature_log_prob: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SentimentModel {
    LogisticRegression(LinearModel),
    /// Linear SVM has no calibrated probabilities
    LinearSvm(LinearModel),
    MultinomialNaiveBayes(NaiveBayesModel),
}

impl fmt::Display for SentimentModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentimentModel::LogisticRegression(_) => write!(f, "Logistic Regression"),
            SentimentModel::LinearSvm(_) => write!(f, "Linear SVM"),
            SentimentModel::MultinomialNaiveBayes(_) => write!(f, "Multinomial Naive Bayes"),
        }
    }
}

fn check_finite(name: &str, values: &[f64]) -> Result<(), ModelError> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(ModelError::Invalid(format!("{} contains non-finite values", name)));
    }
    Ok(())
}

fn check_classes(classes: &[String]) -> Result<(), ModelError> {
    if classes.len() < 2 {
        return Err(ModelError::Invalid(format!(
            "expected at least two classes, got {}",
            classes.len()
        )));
    }
    Ok(())
}

fn argmax(scores: &[f64]) -> Option<usize> {
    scores
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &s)| match best {
            Some((_, b)) if b >= s => best,
            _ => Some((i, s)),
        })
        .map(|(i, _)| i)
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

impl LinearModel {
    fn validate(&self) -> Result<(), ModelError> {
        self.vectorizer.validate()?;
        check_classes(&self.classes)?;

        let binary = self.classes.len() == 2 && self.coef.len() == 1;
        if !binary && self.coef.len() != self.classes.len() {
            return Err(ModelError::Invalid(format!(
                "{} coefficient rows for {} classes",
                self.coef.len(),
                self.classes.len()
            )));
        }
        if self.intercept.len() != self.coef.len() {
            return Err(ModelError::Invalid(format!(
                "{} intercepts for {} coefficient rows",
                self.intercept.len(),
                self.coef.len()
            )));
        }
        for row in &self.coef {
            if row.len() != self.vectorizer.n_features {
                return Err(ModelError::Invalid(format!(
                    "coefficient row has {} weights, expected {}",
                    row.len(),
                    self.vectorizer.n_features
                )));
            }
            check_finite("coef", row)?;
        }
        check_finite("intercept", &self.intercept)
    }

    fn decision_function(&self, row: &SparseRow) -> Vec<f64> {
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(weights, bias)| sparse_dot(row, weights) + bias)
            .collect()
    }

    fn predict_one(&self, text: &str) -> Result<String> {
        let scores = self.decision_function(&self.vectorizer.transform(text));
        let index = match scores.as_slice() {
            [score] => usize::from(*score > 0.0),
            _ => argmax(&scores).ok_or_else(|| anyhow!("Got an empty decision function"))?,
        };
        self.classes
            .get(index)
            .cloned()
            .ok_or_else(|| anyhow!("Couldn't map prediction {} to any of {:?}", index, self.classes))
    }

    fn proba_one(&self, text: &str) -> Vec<f64> {
        let scores = self.decision_function(&self.vectorizer.transform(text));
        match scores.as_slice() {
            [score] => {
                let positive = sigmoid(*score);
                vec![1.0 - positive, positive]
            }
            _ => softmax(&scores),
        }
    }
}

impl NaiveBayesModel {
    fn validate(&self) -> Result<(), ModelError> {
        self.vectorizer.validate()?;
        check_classes(&self.classes)?;

        if self.class_log_prior.len() != self.classes.len() {
            return Err(ModelError::Invalid(format!(
                "{} class priors for {} classes",
                self.class_log_prior.len(),
                self.classes.len()
            )));
        }
        if self.feature_log_prob.len() != self.classes.len() {
            return Err(ModelError::Invalid(format!(
                "{} feature_log_prob rows for {} classes",
                self.feature_log_prob.len(),
                self.classes.len()
            )));
        }
        for row in &self.feature_log_prob {
            if row.len() != self.vectorizer.n_features {
                return Err(ModelError::Invalid(format!(
                    "feature_log_prob row has {} entries, expected {}",
                    row.len(),
                    self.vectorizer.n_features
                )));
            }
            check_finite("feature_log_prob", row)?;
        }
        check_finite("class_log_prior", &self.class_log_prior)
    }

    fn joint_log_likelihood(&self, text: &str) -> Vec<f64> {
        let row = self.vectorizer.transform(text);
        self.feature_log_prob
            .iter()
            .zip(&self.class_log_prior)
            .map(|(log_probs, prior)| sparse_dot(&row, log_probs) + prior)
            .collect()
    }

    fn predict_one(&self, text: &str) -> Result<String> {
        let jll = self.joint_log_likelihood(text);
        let index = argmax(&jll).ok_or_else(|| anyhow!("Got an empty prediction"))?;
        self.classes
            .get(index)
            .cloned()
            .ok_or_else(|| anyhow!("Couldn't map prediction {} to any of {:?}", index, self.classes))
    }

    fn proba_one(&self, text: &str) -> Vec<f64> {
        softmax(&self.joint_log_likelihood(text))
    }
}

impl SentimentModel {
    /// Parses and validates an artifact.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ModelError> {
        let model: SentimentModel = serde_json::from_slice(bytes)?;
        model.validate()?;
        Ok(model)
    }

    pub fn to_json_vec(&self) -> Result<Vec<u8>, ModelError> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        match self {
            SentimentModel::LogisticRegression(model) | SentimentModel::LinearSvm(model) => {
                model.validate()
            }
            SentimentModel::MultinomialNaiveBayes(model) => model.validate(),
        }
    }

    pub fn classes(&self) -> &[String] {
        match self {
            SentimentModel::LogisticRegression(model) | SentimentModel::LinearSvm(model) => {
                &model.classes
            }
            SentimentModel::MultinomialNaiveBayes(model) => &model.classes,
        }
    }
}

impl Classifier for SentimentModel {
    fn predict(&self, texts: &[&str]) -> Result<Vec<String>> {
        texts
            .iter()
            .map(|text| match self {
                SentimentModel::LogisticRegression(model) | SentimentModel::LinearSvm(model) => {
                    model.predict_one(text)
                }
                SentimentModel::MultinomialNaiveBayes(model) => model.predict_one(text),
            })
            .collect()
    }

    fn supports_proba(&self) -> bool {
        !matches!(self, SentimentModel::LinearSvm(_))
    }

    fn predict_proba(&self, texts: &[&str]) -> Result<Vec<Vec<f64>>> {
        match self {
            SentimentModel::LogisticRegression(model) => {
                Ok(texts.iter().map(|text| model.proba_one(text)).collect())
            }
            SentimentModel::MultinomialNaiveBayes(model) => {
                Ok(texts.iter().map(|text| model.proba_one(text)).collect())
            }
            SentimentModel::LinearSvm(_) => Err(anyhow!("{} does not provide predict_proba", self)),
        }
    }

    fn describe(&self) -> String {
        format!("{} ({} classes)", self, self.classes().len())
    }
}
