//! Authentication for chitchat.
//!
//! The client never logs in by itself: it is handed a bearer token (on the
//! command line or from the credentials file) and turns it into a
//! [`Session`] by fetching the profile it belongs to.

pub mod credentials;
pub mod session;

pub use credentials::{Credentials, CredentialsManager, CREDENTIALS_DIR};
pub use session::Session;
