//! WebSocket client for the chat server's real-time channel.
//!
//! The client keeps one socket per session, fans incoming `receive_message`
//! pushes out on a broadcast channel, reconnects with exponential backoff and
//! re-announces the session user after every reconnect.

pub mod client;
pub mod messages;

pub use client::{backoff_secs, WsClient, WsClientConfig};
pub use messages::{ClientFrame, ServerFrame};
