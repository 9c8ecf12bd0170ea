//! Chat assistant presentation settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatSection {
    /// First bot message shown when a chat opens.
    pub greeting: String,
    /// Bot message shown in place of a reply when a send fails.
    pub fallback_reply: String,
}

impl Default for ChatSection {
    fn default() -> Self {
        Self {
            greeting: "Hello! I'm your AI assistant for the Smart Services Portal. \
                       How can I help you today?"
                .into(),
            fallback_reply: "I'm sorry, I'm experiencing some technical difficulties. \
                             Please try again in a moment."
                .into(),
        }
    }
}
