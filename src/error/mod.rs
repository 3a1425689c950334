//! Error handling for chitchat.
//!
//! The two failures the chat core cares about are [`FetchFailure`] (a REST
//! request did not produce a usable body) and [`TransportFailure`] (the
//! socket could not emit or is gone). [`ChatError`] wraps them together with
//! session and configuration problems for the binary.
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Connection, timeout, socket down | Yes |
//! | Server | Backend 5xx | Yes |
//! | Auth | Missing or rejected token | No |
//! | Client | Undecodable payloads | No |
//! | Configuration | Bad environment values | No |
//! | System | Credentials file access | No |

mod category;
mod chat_error;
mod fetch;
mod transport;

pub use category::ErrorCategory;
pub use chat_error::ChatError;
pub use fetch::FetchFailure;
pub use transport::TransportFailure;

/// Type alias for results using [`ChatError`].
pub type ChatResult<T> = Result<T, ChatError>;
