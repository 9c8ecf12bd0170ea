//! Gemini API client struct and endpoint construction.

use crate::AiError;

use super::config::GeminiConfig;

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini API client.
pub struct GeminiClient {
    pub(crate) config: GeminiConfig,
    pub(crate) http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, AiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| AiError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    pub(crate) fn api_url(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_uses_model_and_method() {
        let client = GeminiClient::new(GeminiConfig::new("k")).unwrap();
        assert_eq!(
            client.api_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn api_url_tolerates_trailing_slash() {
        let config = GeminiConfig::new("k")
            .with_base_url("http://127.0.0.1:9000/v1beta/models/")
            .with_model("test-model");
        let client = GeminiClient::new(config).unwrap();
        assert_eq!(
            client.api_url(),
            "http://127.0.0.1:9000/v1beta/models/test-model:generateContent"
        );
    }
}
