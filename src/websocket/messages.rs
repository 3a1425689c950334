//! Socket frames.
//!
//! Every frame is a JSON text message of the form `{"event": <name>, "data": <payload>}`.
//! The client does not speak Socket.IO, so the server end must accept this framing.

use serde::{Deserialize, Serialize};

use crate::models::{OutgoingMessage, WireMessage};

/// Frames sent by the client. Encoded as `{"event": ..., "data": ...}`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(tag = "event", content = "data")]
pub enum ClientFrame {
    /// Announce the session user id so the server routes pushes to us
    #[serde(rename = "join")]
    Join(String),
    #[serde(rename = "send_message")]
    SendMessage(OutgoingMessage),
}

/// Frames pushed by the server.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(tag = "event", content = "data")]
pub enum ServerFrame {
    #[serde(rename = "receive_message")]
    ReceiveMessage(WireMessage),
}
