//! Async send path for SessionClient.

use tracing::debug;

use crate::{AiError, Turn};

use super::manager::SessionClient;
use super::types::InFlightGuard;

impl SessionClient {
    /// Append a user turn, send the whole transcript, and return the reply.
    ///
    /// The caller trims and rejects empty input. On success the reply is
    /// appended as an assistant turn; on failure only the user turn remains.
    /// Exactly one request is made per call, and calls on the same client
    /// run one at a time in arrival order.
    pub async fn send_message(&self, text: impl Into<String>) -> Result<String, AiError> {
        let _in_flight = InFlightGuard::enter(&self.in_flight);
        let _gate = self.gate.lock().await;

        let (snapshot, epoch) = {
            let mut transcript = self.transcript.lock();
            transcript.turns.push(Turn::user(text));
            (transcript.turns.clone(), transcript.epoch)
        };

        debug!(turns = snapshot.len(), "Sending transcript");

        let reply = match self.backend.complete(&snapshot).await {
            Ok(reply) => reply,
            Err(e) => {
                debug!("Send failed, keeping user turn only: {e}");
                return Err(e);
            }
        };

        let mut transcript = self.transcript.lock();
        if transcript.epoch == epoch {
            transcript.turns.push(Turn::assistant(reply.clone()));
        } else {
            debug!("History cleared while request was in flight; reply not recorded");
        }

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Arc;

    use async_trait::async_trait;
    use parking_lot::Mutex;
    use tokio::sync::Notify;

    use crate::session::SessionState;
    use crate::{AiClient, AiError, Role, SessionClient, Turn};

    /// Backend that replays queued results and records every request.
    #[derive(Default)]
    struct ScriptedClient {
        replies: Mutex<VecDeque<Result<String, AiError>>>,
        requests: Mutex<Vec<Vec<Turn>>>,
        hold: Option<Arc<Notify>>,
    }

    impl ScriptedClient {
        fn new(replies: Vec<Result<String, AiError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                ..Default::default()
            }
        }

        fn with_hold(mut self, hold: Arc<Notify>) -> Self {
            self.hold = Some(hold);
            self
        }

        fn requests(&self) -> Vec<Vec<Turn>> {
            self.requests.lock().clone()
        }

        fn request_count(&self) -> usize {
            self.requests.lock().len()
        }
    }

    #[async_trait]
    impl AiClient for ScriptedClient {
        async fn complete(&self, turns: &[Turn]) -> Result<String, AiError> {
            self.requests.lock().push(turns.to_vec());
            if let Some(hold) = &self.hold {
                hold.notified().await;
            }
            self.replies
                .lock()
                .pop_front()
                .unwrap_or_else(|| Err(AiError::MalformedResponse("script exhausted".into())))
        }
    }

    fn ok(text: &str) -> Result<String, AiError> {
        Ok(text.to_string())
    }

    fn http_500() -> Result<String, AiError> {
        Err(AiError::Transport {
            status: Some(500),
            message: "HTTP 500 Internal Server Error".into(),
        })
    }

    fn session(backend: &Arc<ScriptedClient>) -> SessionClient {
        SessionClient::new(backend.clone())
    }

    async fn wait_for_requests(backend: &ScriptedClient, n: usize) {
        while backend.request_count() < n {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn successful_send_commits_both_turns() {
        let backend = Arc::new(ScriptedClient::new(vec![ok("hello")]));
        let client = session(&backend);

        let reply = client.send_message("hi").await.unwrap();

        assert_eq!(reply, "hello");
        assert_eq!(
            client.history(),
            vec![Turn::user("hi"), Turn::assistant("hello")]
        );
    }

    #[tokio::test]
    async fn transport_failure_keeps_only_user_turn() {
        let backend = Arc::new(ScriptedClient::new(vec![http_500()]));
        let client = session(&backend);

        let err = client.send_message("hi").await.unwrap_err();

        assert!(err.is_transport());
        assert_eq!(err.status(), Some(500));
        assert_eq!(client.history(), vec![Turn::user("hi")]);
        assert_eq!(backend.request_count(), 1);
    }

    #[tokio::test]
    async fn malformed_reply_keeps_only_user_turn() {
        let backend = Arc::new(ScriptedClient::new(vec![Err(
            AiError::MalformedResponse("empty candidates".into()),
        )]));
        let client = session(&backend);

        let err = client.send_message("hi").await.unwrap_err();

        assert!(err.is_malformed());
        assert_eq!(client.history(), vec![Turn::user("hi")]);
    }

    #[tokio::test]
    async fn n_successful_sends_alternate_roles() {
        let replies = (0..5).map(|i| Ok(format!("reply {i}"))).collect();
        let backend = Arc::new(ScriptedClient::new(replies));
        let client = session(&backend);

        for i in 0..5 {
            client.send_message(format!("question {i}")).await.unwrap();
        }

        let history = client.history();
        assert_eq!(history.len(), 10);
        for (i, turn) in history.iter().enumerate() {
            let expected = if i % 2 == 0 { Role::User } else { Role::Assistant };
            assert_eq!(turn.role(), expected, "turn {i}");
        }
    }

    #[tokio::test]
    async fn kth_request_replays_committed_turns_in_order() {
        let backend = Arc::new(ScriptedClient::new(vec![ok("r1"), ok("r2"), ok("r3")]));
        let client = session(&backend);

        for text in ["a", "b", "c"] {
            client.send_message(text).await.unwrap();
        }

        let requests = backend.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0], vec![Turn::user("a")]);
        assert_eq!(
            requests[1],
            vec![Turn::user("a"), Turn::assistant("r1"), Turn::user("b")]
        );
        assert_eq!(
            requests[2],
            vec![
                Turn::user("a"),
                Turn::assistant("r1"),
                Turn::user("b"),
                Turn::assistant("r2"),
                Turn::user("c"),
            ]
        );
    }

    #[tokio::test]
    async fn unanswered_question_is_replayed_next_time() {
        let backend = Arc::new(ScriptedClient::new(vec![http_500(), ok("answer")]));
        let client = session(&backend);

        assert!(client.send_message("first").await.is_err());
        client.send_message("second").await.unwrap();

        assert_eq!(
            backend.requests()[1],
            vec![Turn::user("first"), Turn::user("second")]
        );
        assert_eq!(
            client.history(),
            vec![
                Turn::user("first"),
                Turn::user("second"),
                Turn::assistant("answer"),
            ]
        );
    }

    #[tokio::test]
    async fn clear_history_empties_and_is_idempotent() {
        let backend = Arc::new(ScriptedClient::new(vec![ok("x")]));
        let client = session(&backend);
        client.send_message("hi").await.unwrap();

        client.clear_history();
        assert!(client.history().is_empty());
        client.clear_history();
        assert!(client.is_empty());
        assert_eq!(backend.request_count(), 1);
    }

    #[tokio::test]
    async fn history_is_a_snapshot() {
        let backend = Arc::new(ScriptedClient::new(vec![ok("hello")]));
        let client = session(&backend);
        client.send_message("hi").await.unwrap();

        let mut snapshot = client.history();
        snapshot.push(Turn::user("injected"));
        snapshot.remove(0);

        assert_eq!(
            client.history(),
            vec![Turn::user("hi"), Turn::assistant("hello")]
        );
    }

    #[tokio::test]
    async fn concurrent_sends_are_serialized() {
        let hold = Arc::new(Notify::new());
        let backend = Arc::new(
            ScriptedClient::new(vec![ok("r1"), ok("r2")]).with_hold(hold.clone()),
        );
        let client = Arc::new(SessionClient::new(backend.clone()));

        let c1 = client.clone();
        let first = tokio::spawn(async move { c1.send_message("a").await });
        wait_for_requests(&backend, 1).await;

        let c2 = client.clone();
        let second = tokio::spawn(async move { c2.send_message("b").await });
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        // The second call waits for the first to commit before appending.
        assert_eq!(backend.request_count(), 1);
        assert_eq!(client.history(), vec![Turn::user("a")]);

        hold.notify_one();
        assert_eq!(first.await.unwrap().unwrap(), "r1");

        wait_for_requests(&backend, 2).await;
        hold.notify_one();
        assert_eq!(second.await.unwrap().unwrap(), "r2");

        assert_eq!(
            backend.requests()[1],
            vec![Turn::user("a"), Turn::assistant("r1"), Turn::user("b")]
        );
        assert_eq!(client.len(), 4);
    }

    #[tokio::test]
    async fn state_reports_sending_while_in_flight() {
        let hold = Arc::new(Notify::new());
        let backend = Arc::new(ScriptedClient::new(vec![ok("r1")]).with_hold(hold.clone()));
        let client = Arc::new(SessionClient::new(backend.clone()));
        assert_eq!(client.state(), SessionState::Idle);

        let c1 = client.clone();
        let task = tokio::spawn(async move { c1.send_message("a").await });
        wait_for_requests(&backend, 1).await;

        assert_eq!(client.state(), SessionState::Sending);
        assert!(client.is_busy());

        hold.notify_one();
        task.await.unwrap().unwrap();
        assert_eq!(client.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn clear_during_flight_drops_late_reply() {
        let hold = Arc::new(Notify::new());
        let backend = Arc::new(ScriptedClient::new(vec![ok("late")]).with_hold(hold.clone()));
        let client = Arc::new(SessionClient::new(backend.clone()));

        let c1 = client.clone();
        let task = tokio::spawn(async move { c1.send_message("a").await });
        wait_for_requests(&backend, 1).await;

        client.clear_history();
        hold.notify_one();

        assert_eq!(task.await.unwrap().unwrap(), "late");
        assert!(client.history().is_empty());
    }

    #[tokio::test]
    async fn failure_releases_busy_state() {
        let backend = Arc::new(ScriptedClient::new(vec![http_500()]));
        let client = session(&backend);

        let _ = client.send_message("hi").await;
        assert_eq!(client.state(), SessionState::Idle);
    }
}
