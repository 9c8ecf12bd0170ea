//! AI chat engine for the Smart Services Portal.
//!
//! Provides:
//! - `Turn` / `Role`, the unit of conversation history
//! - a Gemini `generateContent` client behind the `AiClient` trait
//! - `SessionClient`, which owns the transcript and replays it on every call

pub mod gemini;
pub mod session;

use async_trait::async_trait;

pub use gemini::{GeminiClient, GeminiConfig};
pub use session::{SessionClient, SessionState};

/// A stateless text-generation backend.
///
/// The backend sees the whole transcript on every call; it keeps no
/// conversation state of its own.
#[async_trait]
pub trait AiClient: Send + Sync {
    /// Send `turns` in order and return the generated reply text.
    async fn complete(&self, turns: &[Turn]) -> Result<String, AiError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => f.write_str("user"),
            Role::Assistant => f.write_str("assistant"),
        }
    }
}

/// One message in a conversation. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Turn {
    role: Role,
    content: String,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// No response was received, or the endpoint answered with a non-2xx status.
    #[error("transport error: {message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },
    /// The endpoint answered 2xx but the body did not have the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("configuration error: {0}")]
    Config(String),
}

impl AiError {
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        AiError::Transport {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }

    /// HTTP status carried by a transport failure, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            AiError::Transport { status, .. } => *status,
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, AiError::Transport { .. })
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, AiError::MalformedResponse(_))
    }
}
