//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - REST requests (GET, multipart POST)
//! - [`ChatTransport`] - the real-time message channel

pub mod http;
pub mod transport;

pub use http::{Headers, HttpClient, HttpError, Response};
pub use transport::{ChatTransport, ConnectionState};
