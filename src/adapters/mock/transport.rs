//! Mock transport for testing.
//!
//! Allows injecting `receive_message` pushes and inspecting what the client
//! emitted.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{broadcast, watch, Mutex};

use crate::error::TransportFailure;
use crate::models::{OutgoingMessage, WireMessage};
use crate::traits::{ChatTransport, ConnectionState};

/// Mock transport for testing.
///
/// # Example
///
/// ```ignore
/// use chitchat::adapters::mock::MockTransport;
/// use chitchat::traits::ChatTransport;
///
/// let mock = MockTransport::new();
/// let mut rx = mock.subscribe();
/// mock.inject_message(wire("bob", "me", "hey"));
/// let push = rx.recv().await?;
///
/// mock.send(outgoing).await?;
/// assert_eq!(mock.get_sent_messages().await.len(), 1);
/// ```
pub struct MockTransport {
    /// Broadcast sender for incoming pushes
    incoming_tx: broadcast::Sender<WireMessage>,
    /// Watch sender for connection state
    state_tx: Arc<watch::Sender<ConnectionState>>,
    /// Watch receiver for connection state
    state_rx: watch::Receiver<ConnectionState>,
    /// Captured outgoing messages
    sent_messages: Arc<Mutex<Vec<OutgoingMessage>>>,
    /// Captured join announcements
    joined: Arc<Mutex<Vec<String>>>,
    /// Whether send should fail
    send_should_fail: Arc<Mutex<bool>>,
}

impl MockTransport {
    /// Create a new mock transport in connected state.
    pub fn new() -> Self {
        Self::with_state(ConnectionState::Connected)
    }

    /// Create a new mock transport in disconnected state.
    pub fn disconnected() -> Self {
        Self::with_state(ConnectionState::Disconnected)
    }

    fn with_state(state: ConnectionState) -> Self {
        let (incoming_tx, _) = broadcast::channel(100);
        let (state_tx, state_rx) = watch::channel(state);

        Self {
            incoming_tx,
            state_tx: Arc::new(state_tx),
            state_rx,
            sent_messages: Arc::new(Mutex::new(Vec::new())),
            joined: Arc::new(Mutex::new(Vec::new())),
            send_should_fail: Arc::new(Mutex::new(false)),
        }
    }

    /// Inject an incoming push. Delivered to all current subscribers.
    pub fn inject_message(&self, msg: WireMessage) {
        // Ignore send errors (no subscribers)
        let _ = self.incoming_tx.send(msg);
    }

    /// Set the connection state.
    pub fn set_state(&self, state: ConnectionState) {
        let _ = self.state_tx.send(state);
    }

    /// Get all sent messages.
    pub async fn get_sent_messages(&self) -> Vec<OutgoingMessage> {
        self.sent_messages.lock().await.clone()
    }

    /// Get all user ids announced with `join`.
    pub async fn get_joined(&self) -> Vec<String> {
        self.joined.lock().await.clone()
    }

    /// Configure whether send should fail.
    pub async fn set_send_should_fail(&self, should_fail: bool) {
        *self.send_should_fail.lock().await = should_fail;
    }

    /// Get the number of subscribers to incoming pushes.
    pub fn subscriber_count(&self) -> usize {
        self.incoming_tx.receiver_count()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MockTransport {
    fn clone(&self) -> Self {
        Self {
            incoming_tx: self.incoming_tx.clone(),
            state_tx: self.state_tx.clone(),
            state_rx: self.state_rx.clone(),
            sent_messages: self.sent_messages.clone(),
            joined: self.joined.clone(),
            send_should_fail: self.send_should_fail.clone(),
        }
    }
}

#[async_trait]
impl ChatTransport for MockTransport {
    async fn join(&self, user_id: &str) -> Result<(), TransportFailure> {
        self.joined.lock().await.push(user_id.to_string());
        Ok(())
    }

    async fn send(&self, msg: OutgoingMessage) -> Result<(), TransportFailure> {
        if *self.send_should_fail.lock().await {
            return Err(TransportFailure::SendFailed("Mock send failure".to_string()));
        }
        if *self.state_rx.borrow() != ConnectionState::Connected {
            return Err(TransportFailure::Disconnected);
        }

        self.sent_messages.lock().await.push(msg);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<WireMessage> {
        self.incoming_tx.subscribe()
    }

    fn state(&self) -> watch::Receiver<ConnectionState> {
        self.state_rx.clone()
    }

    fn shutdown(&self) {
        let _ = self.state_tx.send(ConnectionState::Disconnected);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push(text: &str) -> WireMessage {
        WireMessage {
            sender_id: "bob".to_string(),
            receiver_id: "me".to_string(),
            message: text.to_string(),
            timestamp: None,
            created_at: None,
        }
    }

    fn outgoing(text: &str) -> OutgoingMessage {
        OutgoingMessage {
            sender_id: "me".to_string(),
            receiver_id: "bob".to_string(),
            message: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_inject_message() {
        let mock = MockTransport::new();
        let mut rx = mock.subscribe();

        mock.inject_message(push("hey"));

        let msg = rx.recv().await.unwrap();
        assert_eq!(msg.message, "hey");
    }

    #[tokio::test]
    async fn test_send_and_join_are_recorded() {
        let mock = MockTransport::new();
        mock.join("me").await.unwrap();
        mock.send(outgoing("hello")).await.unwrap();

        assert_eq!(mock.get_joined().await, vec!["me".to_string()]);
        let sent = mock.get_sent_messages().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].message, "hello");
    }

    #[tokio::test]
    async fn test_send_failure() {
        let mock = MockTransport::new();
        mock.set_send_should_fail(true).await;

        let result = mock.send(outgoing("x")).await;
        assert!(matches!(result, Err(TransportFailure::SendFailed(_))));
        assert!(mock.get_sent_messages().await.is_empty());
    }

    #[tokio::test]
    async fn test_send_while_disconnected() {
        let mock = MockTransport::disconnected();
        let result = mock.send(outgoing("x")).await;
        assert_eq!(result, Err(TransportFailure::Disconnected));
    }

    #[test]
    fn test_set_state_and_shutdown() {
        let mock = MockTransport::new();
        let state = mock.state();

        mock.set_state(ConnectionState::Reconnecting { attempt: 3 });
        assert_eq!(*state.borrow(), ConnectionState::Reconnecting { attempt: 3 });

        mock.shutdown();
        assert_eq!(*state.borrow(), ConnectionState::Disconnected);
    }

    #[test]
    fn test_subscriber_count() {
        let mock = MockTransport::new();
        assert_eq!(mock.subscriber_count(), 0);

        let rx1 = mock.subscribe();
        let _rx2 = mock.clone().subscribe();
        assert_eq!(mock.subscriber_count(), 2);

        drop(rx1);
        assert_eq!(mock.subscriber_count(), 1);
    }
}
