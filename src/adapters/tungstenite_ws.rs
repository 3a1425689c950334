//! Tungstenite-based transport adapter.
//!
//! Wraps [`WsClient`] and implements the [`ChatTransport`] trait.

use async_trait::async_trait;
use tokio::sync::{broadcast, watch};

use crate::error::TransportFailure;
use crate::models::{OutgoingMessage, WireMessage};
use crate::traits::{ChatTransport, ConnectionState};
use crate::websocket::{ClientFrame, WsClient, WsClientConfig};

/// Real-time transport over tokio-tungstenite.
///
/// # Example
///
/// ```ignore
/// use chitchat::adapters::TungsteniteTransport;
/// use chitchat::traits::ChatTransport;
///
/// let transport = TungsteniteTransport::connect(config.ws_client_config()).await?;
/// transport.join(&user.id).await?;
/// let mut pushes = transport.subscribe();
/// ```
pub struct TungsteniteTransport {
    client: WsClient,
}

impl TungsteniteTransport {
    /// Connect to the chat socket.
    pub async fn connect(config: WsClientConfig) -> Result<Self, TransportFailure> {
        let client = WsClient::connect(config).await?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ChatTransport for TungsteniteTransport {
    async fn join(&self, user_id: &str) -> Result<(), TransportFailure> {
        self.client
            .send_frame(ClientFrame::Join(user_id.to_string()))
            .await
    }

    async fn send(&self, msg: OutgoingMessage) -> Result<(), TransportFailure> {
        self.client.send_frame(ClientFrame::SendMessage(msg)).await
    }

    fn subscribe(&self) -> broadcast::Receiver<WireMessage> {
        self.client.subscribe()
    }

    fn state(&self) -> watch::Receiver<ConnectionState> {
        self.client.state_receiver()
    }

    fn shutdown(&self) {
        self.client.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_failure_maps_to_connection_failed() {
        let config = WsClientConfig {
            url: "ws://127.0.0.1:59997/ws".to_string(),
            max_retries: 0,
            max_backoff_secs: 1,
        };
        let result = TungsteniteTransport::connect(config).await;
        assert!(matches!(result, Err(TransportFailure::ConnectionFailed(_))));
    }
}
