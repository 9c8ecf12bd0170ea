//! SessionClient struct and transcript access.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::{AiClient, Turn};

use super::types::{SessionState, Transcript};

/// Owns one conversation transcript and talks to a stateless backend.
///
/// Share it as `Arc<SessionClient>`; all methods take `&self`.
pub struct SessionClient {
    pub(super) backend: Arc<dyn AiClient>,
    /// Short critical sections only, never held across an `.await`.
    pub(super) transcript: Mutex<Transcript>,
    /// Serializes `send_message` calls for the whole request/response cycle.
    pub(super) gate: tokio::sync::Mutex<()>,
    pub(super) in_flight: AtomicUsize,
}

impl SessionClient {
    pub fn new(backend: Arc<dyn AiClient>) -> Self {
        Self {
            backend,
            transcript: Mutex::new(Transcript::default()),
            gate: tokio::sync::Mutex::new(()),
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Snapshot of the transcript at call time.
    pub fn history(&self) -> Vec<Turn> {
        self.transcript.lock().turns.clone()
    }

    /// Empty the transcript. A reply still in flight is returned to its
    /// caller but not recorded.
    pub fn clear_history(&self) {
        let mut transcript = self.transcript.lock();
        transcript.turns.clear();
        transcript.epoch = transcript.epoch.wrapping_add(1);
        debug!("Conversation history cleared");
    }

    pub fn len(&self) -> usize {
        self.transcript.lock().turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transcript.lock().turns.is_empty()
    }

    pub fn state(&self) -> SessionState {
        if self.in_flight.load(Ordering::Acquire) > 0 {
            SessionState::Sending
        } else {
            SessionState::Idle
        }
    }

    pub fn is_busy(&self) -> bool {
        self.state() == SessionState::Sending
    }
}
