//! Real-time channel failures.

use std::fmt;

/// Errors raised by the socket transport.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportFailure {
    /// Connection failed
    ConnectionFailed(String),
    /// Channel is not connected
    Disconnected,
    /// Failed to emit a frame
    SendFailed(String),
    /// Failed to parse a frame
    ParseError(String),
}

impl TransportFailure {
    pub fn is_retryable(&self) -> bool {
        !matches!(self, TransportFailure::ParseError(_))
    }

    pub fn user_message(&self) -> String {
        match self {
            TransportFailure::ConnectionFailed(_) => {
                "Could not open the live chat connection.".to_string()
            }
            TransportFailure::Disconnected => {
                "Live chat is disconnected. Messages will not be delivered.".to_string()
            }
            TransportFailure::SendFailed(_) => "The message could not be sent.".to_string(),
            TransportFailure::ParseError(_) => {
                "Received an unreadable message from the server.".to_string()
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            TransportFailure::ConnectionFailed(_) => "E_WS_CONN",
            TransportFailure::Disconnected => "E_WS_DISCONNECTED",
            TransportFailure::SendFailed(_) => "E_WS_SEND",
            TransportFailure::ParseError(_) => "E_WS_PARSE",
        }
    }
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportFailure::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            TransportFailure::Disconnected => write!(f, "Disconnected from server"),
            TransportFailure::SendFailed(msg) => write!(f, "Send failed: {}", msg),
            TransportFailure::ParseError(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for TransportFailure {}
