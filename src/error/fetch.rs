//! REST request failures.
//!
//! Every profile, contacts, history or signup request that does not produce a
//! usable body ends up as a [`FetchFailure`].

use std::fmt;

use crate::traits::HttpError;

/// A failed REST request, tagged with the resource that was requested.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchFailure {
    /// Could not reach the server.
    ConnectionFailed { resource: String, message: String },

    /// No answer within the configured request timeout.
    Timeout { resource: String, duration_secs: u64 },

    /// Server answered with a non-2xx status.
    HttpStatus {
        resource: String,
        status: u16,
        message: String,
    },

    /// Body could not be decoded.
    InvalidResponse { resource: String, message: String },
}

impl FetchFailure {
    /// Classify a transport-level [`HttpError`].
    pub fn from_http(resource: &str, err: HttpError, timeout_secs: u64) -> Self {
        let resource = resource.to_string();
        match err {
            HttpError::Timeout(_) => FetchFailure::Timeout {
                resource,
                duration_secs: timeout_secs,
            },
            HttpError::ServerError { status, message } => FetchFailure::HttpStatus {
                resource,
                status,
                message,
            },
            HttpError::ConnectionFailed(message)
            | HttpError::InvalidUrl(message)
            | HttpError::Other(message) => FetchFailure::ConnectionFailed { resource, message },
        }
    }

    /// Which resource was being fetched (`"history"`, `"contacts"`, ...).
    pub fn resource(&self) -> &str {
        match self {
            FetchFailure::ConnectionFailed { resource, .. }
            | FetchFailure::Timeout { resource, .. }
            | FetchFailure::HttpStatus { resource, .. }
            | FetchFailure::InvalidResponse { resource, .. } => resource,
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            FetchFailure::ConnectionFailed { .. } | FetchFailure::Timeout { .. } => true,
            FetchFailure::HttpStatus { status, .. } => {
                *status >= 500 || *status == 429 || *status == 408
            }
            FetchFailure::InvalidResponse { .. } => false,
        }
    }

    /// True when the bearer token was rejected.
    pub fn requires_reauth(&self) -> bool {
        matches!(
            self,
            FetchFailure::HttpStatus {
                status: 401 | 403,
                ..
            }
        )
    }

    pub fn user_message(&self) -> String {
        match self {
            FetchFailure::ConnectionFailed { resource, .. } => {
                format!("Could not load {}: the server is unreachable.", resource)
            }
            FetchFailure::Timeout {
                resource,
                duration_secs,
            } => format!(
                "Loading {} timed out after {} seconds.",
                resource, duration_secs
            ),
            FetchFailure::HttpStatus {
                resource, status, ..
            } => match *status {
                401 | 403 => "Your session has expired. Please sign in again.".to_string(),
                404 => format!("No {} found.", resource),
                500..=599 => format!("The server failed to return {}.", resource),
                _ => format!("Loading {} failed (HTTP {}).", resource, status),
            },
            FetchFailure::InvalidResponse { resource, .. } => {
                format!("The server sent an unreadable {} response.", resource)
            }
        }
    }

    /// Short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            FetchFailure::ConnectionFailed { .. } => "E_FETCH_CONN",
            FetchFailure::Timeout { .. } => "E_FETCH_TIMEOUT",
            FetchFailure::HttpStatus { .. } => "E_FETCH_HTTP",
            FetchFailure::InvalidResponse { .. } => "E_FETCH_DECODE",
        }
    }
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailure::ConnectionFailed { resource, message } => {
                write!(f, "Fetching {} failed: {}", resource, message)
            }
            FetchFailure::Timeout {
                resource,
                duration_secs,
            } => write!(f, "Fetching {} timed out after {}s", resource, duration_secs),
            FetchFailure::HttpStatus {
                resource,
                status,
                message,
            } => write!(f, "Fetching {} returned HTTP {}: {}", resource, status, message),
            FetchFailure::InvalidResponse { resource, message } => {
                write!(f, "Invalid {} response: {}", resource, message)
            }
        }
    }
}

impl std::error::Error for FetchFailure {}
