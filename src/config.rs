//! Client configuration.
//!
//! Defaults point at a chat server on `localhost:5000`. Every value can be
//! overridden through `CHITCHAT_*` environment variables.
//!
//! # Example
//!
//! ```ignore
//! use chitchat::config::ClientConfig;
//!
//! let config = ClientConfig::from_env()?
//!     .with_request_timeout_secs(5);
//! ```

use std::time::Duration;

use thiserror::Error;

use crate::thread::RemotePolicy;
use crate::websocket::WsClientConfig;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_WS_URL: &str = "ws://localhost:5000/ws";

pub const ENV_API_URL: &str = "CHITCHAT_API_URL";
pub const ENV_WS_URL: &str = "CHITCHAT_WS_URL";
pub const ENV_TIMEOUT_SECS: &str = "CHITCHAT_TIMEOUT_SECS";
pub const ENV_REMOTE_POLICY: &str = "CHITCHAT_REMOTE_POLICY";

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{var} must be an http(s) URL, got {value:?}")]
    InvalidApiUrl { var: &'static str, value: String },

    #[error("{var} must be a ws(s) URL, got {value:?}")]
    InvalidWsUrl { var: &'static str, value: String },

    #[error("{var} must be a positive number of seconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },

    #[error("{var} must be 'active' or 'all', got {value:?}")]
    InvalidRemotePolicy { var: &'static str, value: String },
}

/// Settings for the REST client, the socket transport and the thread core.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the REST API, without trailing slash
    pub api_base_url: String,
    /// Full URL of the WebSocket endpoint
    pub ws_url: String,
    /// Timeout applied to every REST request
    pub request_timeout_secs: u64,
    /// Reconnection attempts before the socket gives up
    pub max_retries: u8,
    /// Upper bound of the reconnection backoff
    pub max_backoff_secs: u64,
    /// Which pushes are applied to the open thread
    pub remote_policy: RemotePolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            ws_url: DEFAULT_WS_URL.to_string(),
            request_timeout_secs: 10,
            max_retries: 5,
            max_backoff_secs: 30,
            remote_policy: RemotePolicy::default(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_ws_url(mut self, url: impl Into<String>) -> Self {
        self.ws_url = url.into();
        self
    }

    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    pub fn with_max_retries(mut self, retries: u8) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn with_remote_policy(mut self, policy: RemotePolicy) -> Self {
        self.remote_policy = policy;
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Settings handed to the WebSocket client.
    pub fn ws_client_config(&self) -> WsClientConfig {
        WsClientConfig {
            url: self.ws_url.clone(),
            max_retries: self.max_retries,
            max_backoff_secs: self.max_backoff_secs,
        }
    }

    /// Build a config from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_API_URL) {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(ConfigError::InvalidApiUrl {
                    var: ENV_API_URL,
                    value,
                });
            }
            config = config.with_api_base_url(value);
        }

        if let Some(value) = lookup(ENV_WS_URL) {
            if !(value.starts_with("ws://") || value.starts_with("wss://")) {
                return Err(ConfigError::InvalidWsUrl {
                    var: ENV_WS_URL,
                    value,
                });
            }
            config = config.with_ws_url(value);
        }

        if let Some(value) = lookup(ENV_TIMEOUT_SECS) {
            match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config = config.with_request_timeout_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidTimeout {
                        var: ENV_TIMEOUT_SECS,
                        value,
                    })
                }
            }
        }

        if let Some(value) = lookup(ENV_REMOTE_POLICY) {
            let policy = value
                .parse::<RemotePolicy>()
                .map_err(|_| ConfigError::InvalidRemotePolicy {
                    var: ENV_REMOTE_POLICY,
                    value: value.clone(),
                })?;
            config = config.with_remote_policy(policy);
        }

        Ok(config)
    }
}
