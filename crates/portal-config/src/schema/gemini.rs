//! Text-generation backend settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Environment variable that overrides `gemini.api_key`.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiSection {
    pub model: String,
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Total request timeout in seconds; 0 disables it (valid range: 0-600).
    pub timeout_secs: u64,
    /// Connect timeout in seconds; 0 disables it (valid range: 0-600).
    pub connect_timeout_secs: u64,
}

impl std::fmt::Debug for GeminiSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiSection")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

impl Default for GeminiSection {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".into(),
            base_url: "https://generativelanguage.googleapis.com/v1beta/models".into(),
            api_key: None,
            timeout_secs: 120,
            connect_timeout_secs: 10,
        }
    }
}

impl GeminiSection {
    /// API key from `GEMINI_API_KEY`, falling back to the config file.
    pub fn resolve_api_key(&self) -> Option<String> {
        let from_env = std::env::var(API_KEY_ENV).ok();
        pick_api_key(from_env, self.api_key.clone())
    }

    pub fn timeout(&self) -> Option<Duration> {
        nonzero_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        nonzero_secs(self.connect_timeout_secs)
    }
}

fn nonzero_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

fn pick_api_key(from_env: Option<String>, from_file: Option<String>) -> Option<String> {
    [from_env, from_file]
        .into_iter()
        .flatten()
        .map(|k| k.trim().to_string())
        .find(|k| !k.is_empty())
}
