//! Session state and in-flight tracking.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::Turn;

/// Externally visible state of a session client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    /// At least one `send_message` call is queued or waiting on the network.
    Sending,
}

/// Transcript plus a counter bumped on every clear.
#[derive(Debug, Default)]
pub(super) struct Transcript {
    pub(super) turns: Vec<Turn>,
    pub(super) epoch: u64,
}

/// Guard that counts an outstanding call and releases it on drop, even if
/// the future is cancelled or an early return occurs.
pub(super) struct InFlightGuard<'a> {
    count: &'a AtomicUsize,
}

impl<'a> InFlightGuard<'a> {
    pub(super) fn enter(count: &'a AtomicUsize) -> Self {
        count.fetch_add(1, Ordering::AcqRel);
        Self { count }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.count.fetch_sub(1, Ordering::AcqRel);
    }
}
