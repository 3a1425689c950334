use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{broadcast, mpsc, oneshot, watch, Notify};
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, warn};

use super::messages::{ClientFrame, ServerFrame};
use crate::error::TransportFailure;
use crate::models::WireMessage;
use crate::traits::ConnectionState;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;

/// Configuration for WebSocket client
#[derive(Debug, Clone)]
pub struct WsClientConfig {
    pub url: String,
    pub max_retries: u8,
    pub max_backoff_secs: u64,
}

impl Default for WsClientConfig {
    fn default() -> Self {
        Self {
            url: crate::config::DEFAULT_WS_URL.to_string(),
            max_retries: 5,
            max_backoff_secs: 30,
        }
    }
}

/// Backoff before reconnection `attempt` (1-based): 1s, 2s, 4s, ... capped.
pub fn backoff_secs(attempt: u8, max_backoff_secs: u64) -> u64 {
    let shift = u32::from(attempt.saturating_sub(1)).min(63);
    std::cmp::min(1u64 << shift, max_backoff_secs)
}

/// A queued frame and the channel that learns whether it was written.
struct Outgoing {
    frame: ClientFrame,
    ack: oneshot::Sender<Result<(), TransportFailure>>,
}

/// WebSocket client for the chat server
pub struct WsClient {
    /// Frames waiting to be written to the socket
    outgoing_tx: mpsc::Sender<Outgoing>,
    /// Fan-out of `receive_message` pushes
    incoming_tx: broadcast::Sender<WireMessage>,
    /// Watch receiver for connection state changes
    state_rx: watch::Receiver<ConnectionState>,
    /// Flag to signal shutdown
    shutdown: Arc<AtomicBool>,
    /// Wakes the connection loop on shutdown
    shutdown_notify: Arc<Notify>,
}

impl WsClient {
    /// Connect to the WebSocket server
    ///
    /// Returns a WsClient on success, or an error if the initial connection fails
    pub async fn connect(config: WsClientConfig) -> Result<Self, TransportFailure> {
        let (ws_stream, _) = connect_async(config.url.as_str())
            .await
            .map_err(|e| TransportFailure::ConnectionFailed(e.to_string()))?;

        info!("Connected to WebSocket server at {}", config.url);

        let (ws_sink, ws_source) = ws_stream.split();

        let (incoming_tx, _) = broadcast::channel::<WireMessage>(100);
        let (outgoing_tx, outgoing_rx) = mpsc::channel::<Outgoing>(100);
        let (state_tx, state_rx) = watch::channel(ConnectionState::Connected);

        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_notify = Arc::new(Notify::new());

        let connection = Connection {
            config,
            incoming_tx: incoming_tx.clone(),
            state_tx,
            shutdown: shutdown.clone(),
            shutdown_notify: shutdown_notify.clone(),
            joined: None,
        };
        tokio::spawn(connection.run(ws_sink, ws_source, outgoing_rx));

        Ok(Self {
            outgoing_tx,
            incoming_tx,
            state_rx,
            shutdown,
            shutdown_notify,
        })
    }

    /// Check if currently connected
    pub fn is_connected(&self) -> bool {
        matches!(*self.state_rx.borrow(), ConnectionState::Connected)
    }

    /// Subscribe to connection state changes
    pub fn state_receiver(&self) -> watch::Receiver<ConnectionState> {
        self.state_rx.clone()
    }

    /// Subscribe to incoming pushes
    pub fn subscribe(&self) -> broadcast::Receiver<WireMessage> {
        self.incoming_tx.subscribe()
    }

    /// Send a frame and wait until it has been written to the socket.
    ///
    /// Fails with `Disconnected` while the socket is down, or when the
    /// connection loop ends before the frame was written.
    pub async fn send_frame(&self, frame: ClientFrame) -> Result<(), TransportFailure> {
        if !self.is_connected() {
            return Err(TransportFailure::Disconnected);
        }
        let (ack, written) = oneshot::channel();
        self.outgoing_tx
            .send(Outgoing { frame, ack })
            .await
            .map_err(|_| TransportFailure::Disconnected)?;
        // A dropped ack means the frame was discarded with the loop
        written.await.unwrap_or(Err(TransportFailure::Disconnected))
    }

    /// Gracefully shutdown the WebSocket connection
    pub fn shutdown(&self) {
        if !self.shutdown.swap(true, Ordering::SeqCst) {
            info!("Shutting down WebSocket client");
        }
        self.shutdown_notify.notify_one();
    }
}

impl Drop for WsClient {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// State owned by the background connection task.
struct Connection {
    config: WsClientConfig,
    incoming_tx: broadcast::Sender<WireMessage>,
    state_tx: watch::Sender<ConnectionState>,
    shutdown: Arc<AtomicBool>,
    shutdown_notify: Arc<Notify>,
    /// Last announced user id, replayed after a reconnect
    joined: Option<String>,
}

impl Connection {
    /// Run the main connection loop with reconnection logic
    async fn run(
        mut self,
        mut ws_sink: WsSink,
        mut ws_source: WsSource,
        mut outgoing_rx: mpsc::Receiver<Outgoing>,
    ) {
        loop {
            if self.shutdown.load(Ordering::SeqCst) {
                debug!("Shutdown signal received, closing connection");
                let _ = ws_sink.close().await;
                break;
            }

            tokio::select! {
                _ = self.shutdown_notify.notified() => {
                    // Loop back to the shutdown check
                }
                msg = ws_source.next() => {
                    let lost = match msg {
                        Some(Ok(Message::Text(text))) => {
                            self.dispatch(&text);
                            false
                        }
                        Some(Ok(Message::Ping(data))) => {
                            debug!("Received ping, sending pong");
                            let _ = ws_sink.send(Message::Pong(data)).await;
                            false
                        }
                        Some(Ok(Message::Close(_))) => {
                            info!("Received close frame from server");
                            true
                        }
                        Some(Ok(_)) => false,
                        Some(Err(e)) => {
                            error!("WebSocket error: {}", e);
                            true
                        }
                        None => {
                            info!("WebSocket stream ended");
                            true
                        }
                    };

                    if lost {
                        let _ = self.state_tx.send(ConnectionState::Disconnected);
                        match self.reconnect().await {
                            Some((new_sink, new_source)) => {
                                ws_sink = new_sink;
                                ws_source = new_source;
                                let _ = self.state_tx.send(ConnectionState::Connected);
                                self.rejoin(&mut ws_sink).await;
                            }
                            None => break,
                        }
                    }
                }
                frame = outgoing_rx.recv() => {
                    match frame {
                        Some(Outgoing { frame, ack }) => {
                            if let ClientFrame::Join(user_id) = &frame {
                                self.joined = Some(user_id.clone());
                            }
                            let result = write_frame(&mut ws_sink, &frame).await;
                            // The sender may have given up waiting
                            let _ = ack.send(result);
                        }
                        None => {
                            debug!("Outgoing channel closed, shutting down");
                            let _ = ws_sink.close().await;
                            break;
                        }
                    }
                }
            }
        }

        info!("Connection loop ended");
        let _ = self.state_tx.send(ConnectionState::Disconnected);
        // Frames still queued were never written
        outgoing_rx.close();
        while let Ok(Outgoing { ack, .. }) = outgoing_rx.try_recv() {
            let _ = ack.send(Err(TransportFailure::Disconnected));
        }
    }

    /// Parse a text frame and fan it out. Malformed frames are skipped.
    fn dispatch(&self, text: &str) {
        match serde_json::from_str::<ServerFrame>(text) {
            Ok(ServerFrame::ReceiveMessage(msg)) => {
                debug!(sender = %msg.sender_id, "Received message push");
                // No subscribers is not an error
                let _ = self.incoming_tx.send(msg);
            }
            Err(e) => {
                warn!("Failed to parse frame: {} - {}", e, text);
            }
        }
    }

    async fn rejoin(&self, ws_sink: &mut WsSink) {
        if let Some(user_id) = &self.joined {
            info!("Re-announcing user {} after reconnect", user_id);
            if let Err(e) = write_frame(ws_sink, &ClientFrame::Join(user_id.clone())).await {
                warn!("Failed to re-announce user: {}", e);
            }
        }
    }

    /// Attempt to reconnect with exponential backoff
    async fn reconnect(&self) -> Option<(WsSink, WsSource)> {
        for attempt in 1..=self.config.max_retries {
            if self.shutdown.load(Ordering::SeqCst) {
                debug!("Shutdown requested during reconnection");
                return None;
            }

            let _ = self
                .state_tx
                .send(ConnectionState::Reconnecting { attempt });

            let wait = backoff_secs(attempt, self.config.max_backoff_secs);
            info!(
                "Reconnection attempt {} of {}, waiting {}s",
                attempt, self.config.max_retries, wait
            );

            tokio::select! {
                _ = tokio::time::sleep(Duration::from_secs(wait)) => {}
                _ = self.shutdown_notify.notified() => {
                    debug!("Shutdown requested during backoff");
                    return None;
                }
            }

            match connect_async(self.config.url.as_str()).await {
                Ok((ws_stream, _)) => {
                    info!("Reconnected successfully on attempt {}", attempt);
                    return Some(ws_stream.split());
                }
                Err(e) => {
                    warn!("Reconnection attempt {} failed: {}", attempt, e);
                }
            }
        }

        error!(
            "Failed to reconnect after {} attempts, giving up",
            self.config.max_retries
        );
        None
    }
}

/// Write one frame. A broken socket is noticed again on the read side.
async fn write_frame(ws_sink: &mut WsSink, frame: &ClientFrame) -> Result<(), TransportFailure> {
    let json = serde_json::to_string(frame).map_err(|e| {
        error!("Failed to serialize frame: {}", e);
        TransportFailure::SendFailed(e.to_string())
    })?;
    debug!("Sending frame: {}", json);
    ws_sink.send(Message::Text(json)).await.map_err(|e| {
        error!("Failed to send frame: {}", e);
        TransportFailure::SendFailed(e.to_string())
    })
}
