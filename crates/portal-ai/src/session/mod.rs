//! Conversation session management.
//!
//! A `SessionClient` owns the transcript, replays it in full on every call
//! and commits the reply only when the backend answered well-formed.

mod chat;
mod manager;
mod types;

pub use manager::SessionClient;
pub use types::SessionState;
