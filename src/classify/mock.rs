//! Mock model for testing and offline runs

use super::{ModelError, RawPrediction, SentimentModel};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Returns a fixed prediction or a fixed failure, and remembers what it was
/// asked.
pub struct MockModel {
    outcome: Result<RawPrediction, String>,
    calls: AtomicUsize,
    last_input: Mutex<Option<String>>,
}

impl MockModel {
    /// A model that always predicts `label` with `score`.
    pub fn returning(label: impl Into<String>, score: f32) -> Self {
        Self::with_outcome(Ok(RawPrediction::new(label, score)))
    }

    /// A model whose every invocation fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_outcome(Err(message.into()))
    }

    fn with_outcome(outcome: Result<RawPrediction, String>) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_input: Mutex::new(None),
        }
    }

    /// Number of times `predict` has been called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Text passed to the most recent `predict` call.
    pub fn last_input(&self) -> Option<String> {
        self.last_input.lock().unwrap().clone()
    }
}

#[async_trait]
impl SentimentModel for MockModel {
    fn name(&self) -> &str {
        "mock"
    }

    async fn predict(&self, text: &str) -> Result<RawPrediction, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_input.lock().unwrap() = Some(text.to_string());

        match &self.outcome {
            Ok(prediction) => Ok(prediction.clone()),
            Err(message) => Err(ModelError::Unavailable(message.clone())),
        }
    }
}
