use std::collections::VecDeque;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Kind tag for a user-facing status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

impl NotificationKind {
    /// Heading shown above the message body.
    pub fn title(self) -> &'static str {
        match self {
            NotificationKind::Success => "Success",
            NotificationKind::Error => "Error",
            NotificationKind::Info => "Information",
        }
    }

    fn ttl(self) -> Duration {
        match self {
            NotificationKind::Success | NotificationKind::Info => Duration::from_secs(5),
            NotificationKind::Error => Duration::from_secs(10),
        }
    }
}

/// Anything that can display a human-readable status message.
///
/// Implementations must not block; callers fire notifications from inside
/// async flows.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, message: &str, kind: NotificationKind);
}

/// A single displayed notification.
#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub created_at: Instant,
    pub ttl: Duration,
}

impl Notification {
    pub fn new(kind: NotificationKind, body: impl Into<String>) -> Self {
        Self {
            kind,
            title: kind.title().to_string(),
            body: body.into(),
            created_at: Instant::now(),
            ttl: kind.ttl(),
        }
    }

    pub fn success(body: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, body)
    }

    pub fn error(body: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, body)
    }

    pub fn info(body: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, body)
    }

    /// Returns `true` if this notification has exceeded its TTL.
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.ttl
    }
}

/// A bounded queue of notifications that auto-evicts expired entries.
#[derive(Debug)]
pub struct NotificationQueue {
    items: Mutex<VecDeque<Notification>>,
    capacity: usize,
}

impl NotificationQueue {
    /// Creates a new queue with the given maximum capacity, at least one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Pushes a notification, evicting expired entries first.
    /// If still at capacity after eviction, the oldest entry is removed.
    pub fn push(&self, notification: Notification) {
        let mut items = self.items.lock();
        items.retain(|n| !n.is_expired());
        if items.len() >= self.capacity {
            items.pop_front();
        }
        items.push_back(notification);
    }

    /// Returns all currently visible (non-expired) notifications, oldest first.
    pub fn visible(&self) -> Vec<Notification> {
        let mut items = self.items.lock();
        items.retain(|n| !n.is_expired());
        items.iter().cloned().collect()
    }

    /// Removes and returns everything in the queue, expired or not.
    pub fn drain(&self) -> Vec<Notification> {
        self.items.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(16)
    }
}

impl NotificationSink for NotificationQueue {
    fn notify(&self, message: &str, kind: NotificationKind) {
        self.push(Notification::new(kind, message));
    }
}

/// Sink that forwards notifications to the tracing subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, message: &str, kind: NotificationKind) {
        match kind {
            NotificationKind::Error => tracing::warn!(title = kind.title(), "{message}"),
            _ => tracing::info!(title = kind.title(), "{message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_titles() {
        assert_eq!(NotificationKind::Success.title(), "Success");
        assert_eq!(NotificationKind::Error.title(), "Error");
        assert_eq!(NotificationKind::Info.title(), "Information");
    }

    #[test]
    fn errors_live_longer_than_info() {
        let err = Notification::error("boom");
        let info = Notification::info("hello");
        assert!(err.ttl > info.ttl);
        assert_eq!(err.title, "Error");
        assert!(!err.is_expired());
    }

    #[test]
    fn queue_keeps_insertion_order() {
        let queue = NotificationQueue::new(4);
        queue.notify("first", NotificationKind::Info);
        queue.notify("second", NotificationKind::Success);

        let visible = queue.visible();
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].body, "first");
        assert_eq!(visible[1].body, "second");
        assert_eq!(visible[1].kind, NotificationKind::Success);
    }

    #[test]
    fn queue_drops_oldest_at_capacity() {
        let queue = NotificationQueue::new(2);
        queue.push(Notification::info("a"));
        queue.push(Notification::info("b"));
        queue.push(Notification::info("c"));

        let bodies: Vec<_> = queue.visible().into_iter().map(|n| n.body).collect();
        assert_eq!(bodies, vec!["b", "c"]);
    }

    #[test]
    fn zero_capacity_holds_one() {
        let queue = NotificationQueue::new(0);
        queue.push(Notification::info("a"));
        queue.push(Notification::info("b"));

        let bodies: Vec<_> = queue.visible().into_iter().map(|n| n.body).collect();
        assert_eq!(bodies, vec!["b"]);
    }

    #[test]
    fn expired_entries_are_evicted() {
        let queue = NotificationQueue::new(4);
        let mut stale = Notification::info("stale");
        stale.ttl = Duration::ZERO;
        queue.push(stale);
        queue.push(Notification::error("fresh"));

        let visible = queue.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].body, "fresh");
    }

    #[test]
    fn sinks_are_object_safe() {
        let sinks: Vec<Box<dyn NotificationSink>> =
            vec![Box::new(TracingSink), Box::new(NotificationQueue::new(1))];
        for sink in &sinks {
            sink.notify("saved", NotificationKind::Success);
            sink.notify("failed", NotificationKind::Error);
        }
    }

    #[test]
    fn drain_empties_queue() {
        let queue = NotificationQueue::default();
        queue.notify("x", NotificationKind::Error);
        assert_eq!(queue.len(), 1);

        let drained = queue.drain();
        assert_eq!(drained.len(), 1);
        assert!(queue.is_empty());
    }
}
