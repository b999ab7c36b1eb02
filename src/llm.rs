use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::models::{GenerateOptions, GenerateRequest, GenerateResponse};

// Failures surfaced by the text-generation backend.
#[derive(Debug, Error)]
pub enum GenerateError {
    // The backend could not be reached at all (connect failure or timeout)
    #[error("generation backend unreachable: {0}")]
    Unreachable(String),
    // The backend answered but the call or its payload was bad
    #[error("generation call failed: {0}")]
    Call(String),
}

// Capability boundary for the text-generation backend, object safe so tests
// can substitute a stub for a live Ollama instance.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}

// Ollama /api/generate client. One non-streaming call per prompt, with
// temperature pinned to zero for deterministic decoding and a bounded
// timeout. No retries; a failed call surfaces immediately.
pub struct OllamaClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl OllamaClient {
    pub fn new(endpoint: String, model: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            model,
        })
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            options: GenerateOptions { temperature: 0.0 },
        };

        debug!(endpoint = %self.endpoint, model = %self.model, "calling generation backend");

        let response = match self.client.post(&self.endpoint).json(&request).send().await {
            Ok(res) => res,
            Err(e) if e.is_connect() || e.is_timeout() => {
                return Err(GenerateError::Unreachable(e.to_string()));
            }
            Err(e) => return Err(GenerateError::Call(e.to_string())),
        };

        let response = response
            .error_for_status()
            .map_err(|e| GenerateError::Call(e.to_string()))?;

        let body = response
            .json::<GenerateResponse>()
            .await
            .map_err(|e| GenerateError::Call(format!("parse error: {e}")))?;

        Ok(body.response)
    }
}
