//! Sentiment classification
//!
//! A `SentimentModel` produces a raw `(label, score)` prediction; the
//! `Classifier` turns that into a [`Sentiment`] verdict:
//!
//! 1. `POS`/`NEG`/`NEU` map to positive/negative/neutral, anything else is neutral.
//! 2. A score below the confidence threshold (0.5 by default) forces neutral.
//!    A score exactly at the threshold keeps the mapped label.
//!
//! Model failures never reach the caller of [`Classifier::predict`]: they are
//! logged and the verdict is neutral. [`Classifier::try_predict`] exposes the
//! underlying `Result` for callers that want to see the failure.
//!
//! Two model backends:
//! - `HttpModel`: a Hugging Face inference-compatible endpoint (production)
//! - `MockModel`: preconfigured predictions or failures (testing, offline runs)

mod http;
mod mock;

pub use http::HttpModel;
pub use mock::MockModel;

use crate::sentiment::Sentiment;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

/// Confidence below which every verdict becomes neutral
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.5;

/// Model output before any policy is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPrediction {
    /// Model-specific label, e.g. `POS`
    pub label: String,
    /// Confidence in `[0, 1]`
    pub score: f32,
}

impl RawPrediction {
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Errors from invoking a sentiment model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("model not available: {0}")]
    Unavailable(String),
    #[error("model request failed: {0}")]
    Request(String),
    #[error("model returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("model response parse error: {0}")]
    Parse(String),
    #[error("model returned no predictions")]
    EmptyResult,
}

/// A pretrained sentiment model.
///
/// Implementations are built once per process and shared across requests,
/// so `predict` takes `&self` and must be safe to call concurrently.
#[async_trait]
pub trait SentimentModel: Send + Sync {
    /// Identifier of the underlying model, for logging.
    fn name(&self) -> &str;

    /// Classify `text`, returning the top label and its score.
    async fn predict(&self, text: &str) -> Result<RawPrediction, ModelError>;
}

/// Applies the label mapping and confidence policy to a shared model.
#[derive(Clone)]
pub struct Classifier {
    model: Arc<dyn SentimentModel>,
    min_confidence: f32,
}

impl Classifier {
    pub fn new(model: Arc<dyn SentimentModel>) -> Self {
        Self {
            model,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }

    pub fn with_min_confidence(mut self, min_confidence: f32) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    /// Apply the mapping policy to a raw prediction.
    pub fn resolve(&self, raw: &RawPrediction) -> Sentiment {
        if raw.score.is_nan() || raw.score < self.min_confidence {
            return Sentiment::Neutral;
        }
        Sentiment::from_model_label(&raw.label)
    }

    /// Classify `text`, surfacing model failures.
    pub async fn try_predict(&self, text: &str) -> Result<Sentiment, ModelError> {
        let raw = self.model.predict(text).await?;
        Ok(self.resolve(&raw))
    }

    /// Classify `text`, falling back to neutral if the model fails.
    pub async fn predict(&self, text: &str) -> Sentiment {
        match self.try_predict(text).await {
            Ok(sentiment) => sentiment,
            Err(e) => {
                warn!(model = self.model.name(), error = %e, "sentiment model failed, using NEUTRAL");
                Sentiment::Neutral
            }
        }
    }
}

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("model", &self.model.name())
            .field("min_confidence", &self.min_confidence)
            .finish()
    }
}
