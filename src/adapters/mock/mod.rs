//! Mock implementations for testing.
//!
//! - [`MockHttpClient`] - HTTP client with configurable, optionally delayed responses
//! - [`MockTransport`] - transport with push injection and send capture

pub mod http;
pub mod transport;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use transport::MockTransport;
