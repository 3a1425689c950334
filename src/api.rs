//! REST client for the chat server.
//!
//! Wraps an [`HttpClient`] and knows the four endpoints the client uses:
//! profile, contacts, message history and signup. Every failure comes back as
//! a [`FetchFailure`] tagged with the resource that was requested.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::auth::Session;
use crate::config::ClientConfig;
use crate::error::FetchFailure;
use crate::models::{
    Contact, ContactsResponse, HistoryResponse, ProfileRecord, SessionUser, SignupForm,
    WireMessage,
};
use crate::traits::{Headers, HttpClient, Response};

/// Client for the chat REST API.
#[derive(Clone)]
pub struct ChatApi {
    /// Base URL without trailing slash
    pub base_url: String,
    timeout_secs: u64,
    http: Arc<dyn HttpClient>,
}

impl ChatApi {
    pub fn new(config: &ClientConfig, http: Arc<dyn HttpClient>) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            timeout_secs: config.request_timeout_secs,
            http,
        }
    }

    /// Fetch the user a bearer token belongs to.
    ///
    /// `GET /api/profile`
    pub async fn fetch_profile(&self, token: &str) -> Result<SessionUser, FetchFailure> {
        let url = format!("{}/api/profile", self.base_url);
        let record: ProfileRecord = self.get_json("profile", &url, token).await?;
        Ok(SessionUser::from(record))
    }

    /// Fetch the contacts of the session user.
    ///
    /// `GET /chat/contacts/{userId}`
    pub async fn fetch_contacts(&self, session: &Session) -> Result<Vec<Contact>, FetchFailure> {
        let url = format!("{}/chat/contacts/{}", self.base_url, session.user.id);
        let body: ContactsResponse = self.get_json("contacts", &url, &session.token).await?;
        debug!(count = body.contacts.len(), "Fetched contacts");
        Ok(body.contacts.into_iter().map(Contact::from).collect())
    }

    /// Fetch the stored conversation between the session user and a contact,
    /// oldest first.
    ///
    /// `GET /chat/messages/{userId}/{contactId}`
    pub async fn fetch_history(
        &self,
        session: &Session,
        contact_id: &str,
    ) -> Result<Vec<WireMessage>, FetchFailure> {
        let url = format!(
            "{}/chat/messages/{}/{}",
            self.base_url, session.user.id, contact_id
        );
        let body: HistoryResponse = self.get_json("history", &url, &session.token).await?;
        debug!(contact_id, count = body.messages.len(), "Fetched history");
        Ok(body.messages)
    }

    /// Register a new account.
    ///
    /// `POST /api/signup` (multipart). The server does not return a token.
    pub async fn signup(&self, form: &SignupForm) -> Result<(), FetchFailure> {
        let url = format!("{}/api/signup", self.base_url);
        let response = self
            .http
            .post_multipart(&url, &form.fields(), &Headers::new())
            .await
            .map_err(|e| FetchFailure::from_http("signup", e, self.timeout_secs))?;
        Self::check_status("signup", &response)?;
        debug!(email = %form.email, "Signup accepted");
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        url: &str,
        token: &str,
    ) -> Result<T, FetchFailure> {
        let response = self
            .http
            .get(url, &Self::auth_headers(token))
            .await
            .map_err(|e| FetchFailure::from_http(resource, e, self.timeout_secs))?;

        Self::check_status(resource, &response)?;

        response.json::<T>().map_err(|e| {
            warn!(resource, error = %e, "Undecodable response body");
            FetchFailure::InvalidResponse {
                resource: resource.to_string(),
                message: e.to_string(),
            }
        })
    }

    fn check_status(resource: &str, response: &Response) -> Result<(), FetchFailure> {
        if response.is_success() {
            return Ok(());
        }
        let message = response
            .text()
            .unwrap_or_else(|_| "Unknown error".to_string());
        warn!(resource, status = response.status, "Request rejected");
        Err(FetchFailure::HttpStatus {
            resource: resource.to_string(),
            status: response.status,
            message,
        })
    }

    fn auth_headers(token: &str) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Authorization".to_string(), format!("Bearer {}", token));
        headers
    }
}
