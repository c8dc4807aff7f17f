//! Startup-time model acquisition.
//!
//! Failures here never abort the service: they are logged and the caller gets
//! the lexical fallback instead of a model backed predictor.

use crate::artifact::SentimentModel;
use crate::classifier::Classifier;
use crate::error::ModelError;
use crate::predictor::{LexicalFallbackPredictor, ModelPredictor, Predictor};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where the model artifact lives and where to fetch it from when absent.
#[derive(Debug, Clone)]
pub struct ModelSource {
    pub path: PathBuf,
    pub url: Option<String>,
}

impl ModelSource {
    pub fn new(path: impl Into<PathBuf>, url: Option<String>) -> Self {
        Self {
            path: path.into(),
            url,
        }
    }
}

/// Fetches the artifact into `source.path` unless it already exists.
///
/// The body is written next to the target and renamed, so a failed download
/// never leaves a truncated artifact behind.
pub async fn download_model_if_missing(source: &ModelSource) -> Result<(), ModelError> {
    if tokio::fs::try_exists(&source.path).await? {
        return Ok(());
    }

    let Some(url) = source.url.as_deref() else {
        tracing::debug!(path = %source.path.display(), "No model URL configured, skipping download");
        return Ok(());
    };

    tracing::info!(url = %url, path = %source.path.display(), "Model not found locally, downloading");

    let bytes = reqwest::get(url).await?.error_for_status()?.bytes().await?;

    if let Some(parent) = source.path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let partial = source.path.with_extension("part");
    tokio::fs::write(&partial, &bytes).await?;
    tokio::fs::rename(&partial, &source.path).await?;

    tracing::info!(bytes = bytes.len(), "Model downloaded successfully");
    Ok(())
}

pub async fn load_model(path: &Path) -> Result<SentimentModel, ModelError> {
    let bytes = tokio::fs::read(path).await?;
    SentimentModel::from_slice(&bytes)
}

/// Downloads (if needed) and loads the classifier, or `None` when unavailable.
pub async fn load_classifier(source: &ModelSource) -> Option<Arc<dyn Classifier>> {
    if let Err(e) = download_model_if_missing(source).await {
        tracing::warn!(error = %e, "Failed to download model");
    }

    match tokio::fs::try_exists(&source.path).await {
        Ok(true) => {}
        Ok(false) => {
            tracing::warn!(
                path = %source.path.display(),
                "Model file not found, using lexical fallback"
            );
            return None;
        }
        Err(e) => {
            tracing::warn!(path = %source.path.display(), error = %e, "Cannot access model file");
            return None;
        }
    }

    match load_model(&source.path).await {
        Ok(model) => {
            tracing::info!(model = %model.describe(), "Model loaded successfully");
            Some(Arc::new(model))
        }
        Err(e) => {
            tracing::error!(path = %source.path.display(), error = %e, "Error loading model");
            None
        }
    }
}

/// Picks the prediction strategy for the lifetime of the process.
pub async fn select_predictor(source: &ModelSource) -> Arc<dyn Predictor> {
    let predictor: Arc<dyn Predictor> = match load_classifier(source).await {
        Some(classifier) => Arc::new(ModelPredictor::new(classifier)),
        None => Arc::new(LexicalFallbackPredictor::new()),
    };
    tracing::info!(strategy = predictor.strategy().as_str(), "Prediction strategy selected");
    predictor
}
