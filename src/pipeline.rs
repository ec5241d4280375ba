//! Request pipeline: validate → normalize → classify → record → respond

use crate::classify::Classifier;
use crate::normalize::Normalizer;
use crate::sentiment::{Sentiment, SentimentRecord};
use crate::storage::{HistoryStore, StorageError, DEFAULT_HISTORY_LIMIT};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Inputs shorter than this (in characters, after trimming) are rejected
pub const MIN_TEXT_CHARS: usize = 5;

/// Client-input problems. Reported to the caller, never logged as faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing field 'text'")]
    MissingField,

    #[error("Text too short (< 5 characters)")]
    TooShort,
}

impl ValidationError {
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::MissingField => "MISSING_FIELD",
            ValidationError::TooShort => "TOO_SHORT",
        }
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("storage failure: {0}")]
    Storage(#[from] StorageError),

    #[error("storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Body of an analysis request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// Result of one successful analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    /// Input exactly as received
    pub text: String,
    pub clean_text: String,
    pub sentiment: Sentiment,
}

/// Check that `raw_text` is present and long enough.
pub fn validate(raw_text: Option<&str>) -> Result<&str, ValidationError> {
    let text = raw_text.ok_or(ValidationError::MissingField)?;
    if text.trim().chars().count() < MIN_TEXT_CHARS {
        return Err(ValidationError::TooShort);
    }
    Ok(text)
}

/// Composes normalizer, classifier and history store.
///
/// Built once at startup with its collaborators injected, then shared by all
/// requests.
pub struct Pipeline {
    normalizer: Normalizer,
    classifier: Classifier,
    store: Arc<dyn HistoryStore>,
    history_limit: usize,
}

impl Pipeline {
    pub fn new(normalizer: Normalizer, classifier: Classifier, store: Arc<dyn HistoryStore>) -> Self {
        Self {
            normalizer,
            classifier,
            store,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    /// Analyze one text and append it to the history.
    ///
    /// The original text is what gets recorded, not the normalized one. A
    /// model failure still produces a (neutral) record; a validation failure
    /// produces none.
    pub async fn handle(&self, raw_text: Option<&str>) -> Result<Analysis, PipelineError> {
        let text = match validate(raw_text) {
            Ok(text) => text,
            Err(e) => {
                debug!(kind = e.kind(), "rejected analysis request");
                return Err(e.into());
            }
        };

        let clean_text = self.normalizer.normalize(text);
        let sentiment = self.classifier.predict(&clean_text).await;

        let store = Arc::clone(&self.store);
        let owned = text.to_string();
        let record = tokio::task::spawn_blocking(move || store.record(&owned, sentiment)).await??;

        info!(id = record.id, sentiment = %sentiment, "analysis recorded");

        Ok(Analysis {
            text: text.to_string(),
            clean_text,
            sentiment,
        })
    }

    /// The most recent records, newest first, capped at the history limit.
    pub async fn history(&self) -> Result<Vec<SentimentRecord>, PipelineError> {
        self.recent(self.history_limit).await
    }

    pub async fn recent(&self, limit: usize) -> Result<Vec<SentimentRecord>, PipelineError> {
        let store = Arc::clone(&self.store);
        let records = tokio::task::spawn_blocking(move || store.list_recent(limit)).await??;
        Ok(records)
    }
}
