//! Unified error type for the chat client.

use std::fmt;

use super::category::ErrorCategory;
use super::fetch::FetchFailure;
use super::transport::TransportFailure;
use crate::config::ConfigError;

/// Every error the client can surface to the user.
#[derive(Debug)]
pub enum ChatError {
    /// A REST request failed.
    Fetch(FetchFailure),

    /// The real-time channel failed.
    Transport(TransportFailure),

    /// No bearer token is available for this session.
    MissingToken,

    /// Invalid configuration.
    Config(ConfigError),

    /// Reading or writing the credentials file failed.
    Storage { path: String, message: String },
}

impl ChatError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ChatError::Fetch(err) => {
                if err.requires_reauth() {
                    ErrorCategory::Auth
                } else {
                    match err {
                        FetchFailure::HttpStatus { status, .. } if *status >= 500 => {
                            ErrorCategory::Server
                        }
                        FetchFailure::InvalidResponse { .. } => ErrorCategory::Client,
                        FetchFailure::HttpStatus { .. } => ErrorCategory::Client,
                        _ => ErrorCategory::Network,
                    }
                }
            }
            ChatError::Transport(TransportFailure::ParseError(_)) => ErrorCategory::Client,
            ChatError::Transport(_) => ErrorCategory::Network,
            ChatError::MissingToken => ErrorCategory::Auth,
            ChatError::Config(_) => ErrorCategory::Configuration,
            ChatError::Storage { .. } => ErrorCategory::System,
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            ChatError::Fetch(err) => err.is_retryable(),
            ChatError::Transport(err) => err.is_retryable(),
            _ => false,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            ChatError::Fetch(err) => err.user_message(),
            ChatError::Transport(err) => err.user_message(),
            ChatError::MissingToken => {
                "You are not signed in. Start chitchat with --token <token>.".to_string()
            }
            ChatError::Config(err) => format!("Invalid configuration: {}", err),
            ChatError::Storage { path, .. } => {
                format!("Could not access the credentials file at {}.", path)
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ChatError::Fetch(err) => err.error_code(),
            ChatError::Transport(err) => err.error_code(),
            ChatError::MissingToken => "E_AUTH_NO_TOKEN",
            ChatError::Config(_) => "E_CONFIG",
            ChatError::Storage { .. } => "E_STORAGE",
        }
    }

    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatError::Fetch(err) => write!(f, "{}", err),
            ChatError::Transport(err) => write!(f, "{}", err),
            ChatError::MissingToken => write!(f, "No bearer token available"),
            ChatError::Config(err) => write!(f, "Configuration error: {}", err),
            ChatError::Storage { path, message } => {
                write!(f, "Storage error at {}: {}", path, message)
            }
        }
    }
}

impl std::error::Error for ChatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChatError::Fetch(err) => Some(err),
            ChatError::Transport(err) => Some(err),
            ChatError::Config(err) => Some(err),
            ChatError::MissingToken | ChatError::Storage { .. } => None,
        }
    }
}

impl From<FetchFailure> for ChatError {
    fn from(err: FetchFailure) -> Self {
        ChatError::Fetch(err)
    }
}

impl From<TransportFailure> for ChatError {
    fn from(err: TransportFailure) -> Self {
        ChatError::Transport(err)
    }
}

impl From<ConfigError> for ChatError {
    fn from(err: ConfigError) -> Self {
        ChatError::Config(err)
    }
}
