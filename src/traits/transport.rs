//! Real-time transport trait abstraction.
//!
//! The chat server speaks a tiny event protocol over one socket per user:
//! the client announces itself with `join`, emits `send_message`, and
//! receives `receive_message` pushes. Delivery is fire-and-forget.

use async_trait::async_trait;
use tokio::sync::{broadcast, watch};

use crate::error::TransportFailure;
use crate::models::{OutgoingMessage, WireMessage};

/// Connection state of a transport.
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionState {
    Connected,
    Reconnecting { attempt: u8 },
    Disconnected,
}

/// Trait for the bidirectional real-time channel.
///
/// Pushes are fanned out on a broadcast channel so several subscribers can
/// exist; each [`crate::subscription::Subscription`] owns one receiver.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Announce the session user. Must be called once after connecting;
    /// implementations re-announce after a reconnect.
    async fn join(&self, user_id: &str) -> Result<(), TransportFailure>;

    /// Emit an outgoing message.
    async fn send(&self, msg: OutgoingMessage) -> Result<(), TransportFailure>;

    /// Subscribe to `receive_message` pushes.
    fn subscribe(&self) -> broadcast::Receiver<WireMessage>;

    /// Watch the connection state.
    fn state(&self) -> watch::Receiver<ConnectionState>;

    /// Close the channel.
    fn shutdown(&self);
}
