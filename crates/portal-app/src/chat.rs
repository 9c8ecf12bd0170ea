//! Chat assistant presenter: the message log a user sees, fed by a
//! shared `SessionClient`.

use std::sync::Arc;

use portal_ai::{AiError, GeminiClient, GeminiConfig, SessionClient};
use portal_common::{NotificationKind, NotificationSink};
use portal_config::schema::{ChatSection, GeminiSection, API_KEY_ENV};
use tracing::warn;

pub const SUGGESTED_QUESTIONS: [&str; 4] = [
    "What services are available in KR Puram?",
    "How do I access parking services?",
    "What are the operating hours?",
    "How can I report an issue?",
];

const FAILURE_NOTICE: &str = "Failed to get AI response. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEntry {
    pub id: u64,
    pub sender: Sender,
    pub text: String,
}

/// Build the session client from the `[gemini]` config section.
pub fn build_session(gemini: &GeminiSection) -> Result<Arc<SessionClient>, AiError> {
    let api_key = gemini.resolve_api_key().ok_or_else(|| {
        AiError::Config(format!(
            "Gemini API not configured. Set {API_KEY_ENV} or gemini.api_key in config.toml."
        ))
    })?;

    let config = GeminiConfig::new(api_key)
        .with_model(gemini.model.clone())
        .with_base_url(gemini.base_url.clone())
        .with_timeout(gemini.timeout())
        .with_connect_timeout(gemini.connect_timeout());

    let client = GeminiClient::new(config)?;
    Ok(Arc::new(SessionClient::new(Arc::new(client))))
}

pub struct ChatPresenter {
    session: Arc<SessionClient>,
    notifier: Arc<dyn NotificationSink>,
    greeting: String,
    fallback_reply: String,
    entries: Vec<ChatEntry>,
    next_id: u64,
}

impl ChatPresenter {
    pub fn new(
        session: Arc<SessionClient>,
        notifier: Arc<dyn NotificationSink>,
        chat: &ChatSection,
    ) -> Self {
        let mut presenter = Self {
            session,
            notifier,
            greeting: chat.greeting.clone(),
            fallback_reply: chat.fallback_reply.clone(),
            entries: Vec::new(),
            next_id: 1,
        };
        presenter.push(Sender::Bot, presenter.greeting.clone());
        presenter
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    /// `true` while the session has a request outstanding.
    pub fn is_busy(&self) -> bool {
        self.session.is_busy()
    }

    fn push(&mut self, sender: Sender, text: String) -> ChatEntry {
        let entry = ChatEntry {
            id: self.next_id,
            sender,
            text,
        };
        self.next_id += 1;
        self.entries.push(entry.clone());
        entry
    }

    /// Send one line of user input. Blank input, or input while a request
    /// is outstanding, is ignored and yields `None`. Otherwise returns the
    /// bot entry that was appended: the reply, or the fallback text.
    pub async fn submit(&mut self, input: &str) -> Option<ChatEntry> {
        let message = input.trim();
        if message.is_empty() || self.is_busy() {
            return None;
        }

        self.push(Sender::User, message.to_string());

        let entry = match self.session.send_message(message).await {
            Ok(reply) => self.push(Sender::Bot, reply),
            Err(e) => {
                warn!("Chat error: {e}");
                self.notifier.notify(FAILURE_NOTICE, NotificationKind::Error);
                self.push(Sender::Bot, self.fallback_reply.clone())
            }
        };
        Some(entry)
    }

    /// Submit one of the suggested questions by index.
    pub async fn ask_suggested(&mut self, index: usize) -> Option<ChatEntry> {
        let question = SUGGESTED_QUESTIONS.get(index)?;
        self.submit(question).await
    }

    /// Reset the visible log to the greeting and forget the conversation.
    pub fn clear(&mut self) {
        self.session.clear_history();
        self.entries.clear();
        self.push(Sender::Bot, self.greeting.clone());
    }
}
