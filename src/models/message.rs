use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a message in the thread came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Sent by the session user
    Local,
    /// Sent by the peer
    Remote,
}

/// Delivery marker attached to a locally composed message.
///
/// Markers live beside the thread's messages rather than inside them, so a
/// `Message` never changes after it has been appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryState {
    /// Appended optimistically, transport has not answered yet
    Pending,
    /// Handed to the transport without error
    Sent,
    /// The transport rejected the emission
    Failed,
}

/// Message format on the wire, shared by the history endpoint and the
/// `receive_message` socket event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WireMessage {
    pub sender_id: String,
    pub receiver_id: String,
    /// Message text
    pub message: String,
    /// Server timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Document creation time; used when `timestamp` is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `GET /chat/messages/{user}/{contact}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub messages: Vec<WireMessage>,
}

/// Payload of the outgoing `send_message` socket event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingMessage {
    pub sender_id: String,
    pub receiver_id: String,
    pub message: String,
}

/// A message as displayed in a thread.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Client-side identifier, never sent to the server
    pub id: Uuid,
    pub sender_id: String,
    pub receiver_id: String,
    pub body: String,
    pub timestamp: DateTime<Utc>,
    pub origin: Origin,
}

impl Message {
    /// Compose a message typed by the session user.
    pub fn local(sender_id: &str, receiver_id: &str, body: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender_id: sender_id.to_string(),
            receiver_id: receiver_id.to_string(),
            body: body.to_string(),
            timestamp: Utc::now(),
            origin: Origin::Local,
        }
    }

    /// Convert a history record, deriving the origin from the sender id.
    pub fn from_history(wire: WireMessage, session_user_id: &str) -> Self {
        let origin = if wire.sender_id == session_user_id {
            Origin::Local
        } else {
            Origin::Remote
        };
        Self::from_wire(wire, origin)
    }

    /// Convert a pushed `receive_message` payload. Pushes are always remote.
    pub fn from_push(wire: WireMessage) -> Self {
        Self::from_wire(wire, Origin::Remote)
    }

    fn from_wire(wire: WireMessage, origin: Origin) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender_id: wire.sender_id,
            receiver_id: wire.receiver_id,
            body: wire.message,
            timestamp: wire.timestamp.or(wire.created_at).unwrap_or_else(Utc::now),
            origin,
        }
    }

    /// The payload handed to the transport for this message.
    pub fn to_outgoing(&self) -> OutgoingMessage {
        OutgoingMessage {
            sender_id: self.sender_id.clone(),
            receiver_id: self.receiver_id.clone(),
            message: self.body.clone(),
        }
    }

    pub fn is_local(&self) -> bool {
        self.origin == Origin::Local
    }
}
