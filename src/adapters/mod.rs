//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`TungsteniteTransport`] - real-time channel using tokio-tungstenite
//!
//! The [`mock`] submodule provides test doubles for both.

pub mod mock;
pub mod reqwest_http;
pub mod tungstenite_ws;

pub use mock::{MockHttpClient, MockTransport};
pub use reqwest_http::ReqwestHttpClient;
pub use tungstenite_ws::TungsteniteTransport;
