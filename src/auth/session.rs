//! Session context: bearer token plus the user it belongs to.
//!
//! Every contact and message operation takes a `&Session`, so nothing can run
//! before the profile fetch has succeeded.

use std::fmt;

use tracing::info;

use crate::api::ChatApi;
use crate::error::{ChatError, ChatResult, FetchFailure};
use crate::models::SessionUser;

use super::credentials::{Credentials, CredentialsManager};

/// An authenticated session.
#[derive(Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

impl Session {
    pub fn new(token: impl Into<String>, user: SessionUser) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    /// Fetch the profile for `token` and open a session with it.
    pub async fn establish(api: &ChatApi, token: &str) -> Result<Self, FetchFailure> {
        let user = api.fetch_profile(token).await?;
        info!(user_id = %user.id, "Session established");
        Ok(Self::new(token, user))
    }

    /// Pick the token to use: an explicit one wins over the stored one.
    ///
    /// An explicit token is persisted so later runs can reuse it.
    pub fn resolve_token(
        explicit: Option<String>,
        store: &CredentialsManager,
    ) -> ChatResult<String> {
        if let Some(token) = explicit.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()) {
            store.save(&Credentials::with_token(token.clone()))?;
            return Ok(token);
        }
        store
            .load()
            .token()
            .map(str::to_string)
            .ok_or(ChatError::MissingToken)
    }

    /// End the session and forget the stored token.
    pub fn logout(self, store: &CredentialsManager) -> ChatResult<()> {
        info!(user_id = %self.user.id, "Logging out");
        store.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn user() -> SessionUser {
        SessionUser {
            id: "me".to_string(),
            display_name: "Me".to_string(),
            avatar: None,
        }
    }

    fn store(dir: &TempDir) -> CredentialsManager {
        CredentialsManager::with_path(dir.path().join("creds.json"))
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = Session::new("secret-token", user());
        let debug = format!("{:?}", session);
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("redacted"));
    }

    #[test]
    fn test_resolve_token_prefers_explicit_and_persists_it() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save(&Credentials::with_token("old")).unwrap();

        let token = Session::resolve_token(Some("new".to_string()), &store).unwrap();

        assert_eq!(token, "new");
        assert_eq!(store.load().token(), Some("new"));
    }

    #[test]
    fn test_resolve_token_falls_back_to_store() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save(&Credentials::with_token("stored")).unwrap();

        assert_eq!(Session::resolve_token(None, &store).unwrap(), "stored");
        assert_eq!(
            Session::resolve_token(Some("  ".to_string()), &store).unwrap(),
            "stored"
        );
    }

    #[test]
    fn test_resolve_token_missing() {
        let dir = TempDir::new().unwrap();
        let result = Session::resolve_token(None, &store(&dir));
        assert!(matches!(result, Err(ChatError::MissingToken)));
    }

    #[test]
    fn test_logout_clears_store() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save(&Credentials::with_token("tok")).unwrap();

        Session::new("tok", user()).logout(&store).unwrap();

        assert_eq!(store.load().token(), None);
    }
}
