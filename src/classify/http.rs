//! HTTP model backend
//!
//! Talks to a Hugging Face inference-compatible endpoint:
//! `POST {endpoint}/models/{name}` with body `{"inputs": "<text>"}`.
//! The text-classification response is either `[[{label, score}, ...]]` or
//! `[{label, score}, ...]`; the highest-scoring entry wins.

use super::{ModelError, RawPrediction, SentimentModel};
use crate::config::ModelConfig;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Nested(Vec<Vec<RawPrediction>>),
    Flat(Vec<RawPrediction>),
    Error { error: String },
}

impl InferenceResponse {
    fn into_top(self) -> Result<RawPrediction, ModelError> {
        let candidates = match self {
            InferenceResponse::Nested(batches) => batches.into_iter().next().unwrap_or_default(),
            InferenceResponse::Flat(predictions) => predictions,
            InferenceResponse::Error { error } => return Err(ModelError::Unavailable(error)),
        };
        candidates
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .ok_or(ModelError::EmptyResult)
    }
}

/// Production model client.
pub struct HttpModel {
    client: reqwest::Client,
    url: String,
    name: String,
    api_token: Option<String>,
}

impl HttpModel {
    pub fn new(endpoint: &str, name: &str, timeout: Duration) -> Result<Self, ModelError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ModelError::Request(e.to_string()))?;
        Ok(Self {
            client,
            url: format!("{}/models/{}", endpoint.trim_end_matches('/'), name),
            name: name.to_string(),
            api_token: None,
        })
    }

    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn from_config(config: &ModelConfig) -> Result<Self, ModelError> {
        let model = Self::new(
            &config.endpoint,
            &config.name,
            Duration::from_secs(config.timeout_secs),
        )?;
        Ok(match &config.api_token {
            Some(token) => model.with_api_token(token.clone()),
            None => model,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SentimentModel for HttpModel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn predict(&self, text: &str) -> Result<RawPrediction, ModelError> {
        let mut request = self
            .client
            .post(&self.url)
            .json(&serde_json::json!({ "inputs": text }));
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ModelError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: InferenceResponse = response
            .json()
            .await
            .map_err(|e| ModelError::Parse(e.to_string()))?;
        let top = parsed.into_top()?;

        tracing::debug!(model = %self.name, label = %top.label, score = top.score, "model prediction");
        Ok(top)
    }
}
