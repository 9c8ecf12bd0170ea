//! AiClient trait implementation for GeminiClient.

use async_trait::async_trait;
use tracing::debug;

use crate::{AiClient, AiError, Turn};

use super::client::GeminiClient;
use super::wire::{GenerateContentRequest, GenerateContentResponse};

#[async_trait]
impl AiClient for GeminiClient {
    async fn complete(&self, turns: &[Turn]) -> Result<String, AiError> {
        let body = GenerateContentRequest::from_turns(turns);
        let url = self.api_url();

        debug!(model = %self.config.model, turns = turns.len(), "Gemini API request");

        let response = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(AiError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AiError::Transport {
                status: Some(status.as_u16()),
                message: format!("HTTP {status}: {text}"),
            });
        }

        let bytes = response.bytes().await.map_err(AiError::transport)?;
        GenerateContentResponse::parse(&bytes)?.into_first_text()
    }
}
