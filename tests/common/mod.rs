//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use chitchat::adapters::mock::{MockHttpClient, MockTransport};
use chitchat::api::ChatApi;
use chitchat::app::{App, AppMessage};
use chitchat::auth::Session;
use chitchat::config::ClientConfig;
use chitchat::models::{Contact, SessionUser, WireMessage};
use chitchat::thread::RemotePolicy;
use tokio::sync::mpsc::UnboundedReceiver;

pub const BASE_URL: &str = "http://api.test";
pub const USER_ID: &str = "me";
pub const TOKEN: &str = "test-token";

pub fn session_user() -> SessionUser {
    SessionUser {
        id: USER_ID.to_string(),
        display_name: "Test User".to_string(),
        avatar: None,
    }
}

pub fn session() -> Session {
    Session::new(TOKEN, session_user())
}

pub fn contact(id: &str) -> Contact {
    Contact {
        id: id.to_string(),
        display_name: id.to_uppercase(),
        avatar: None,
    }
}

pub fn wire(sender: &str, receiver: &str, text: &str) -> WireMessage {
    WireMessage {
        sender_id: sender.to_string(),
        receiver_id: receiver.to_string(),
        message: text.to_string(),
        timestamp: None,
        created_at: None,
    }
}

/// URL of the history endpoint for `contact_id` on the mock base.
pub fn history_url(contact_id: &str) -> String {
    format!("{}/chat/messages/{}/{}", BASE_URL, USER_ID, contact_id)
}

pub fn contacts_url() -> String {
    format!("{}/chat/contacts/{}", BASE_URL, USER_ID)
}

/// JSON body for a history response.
pub fn history_json(messages: &[WireMessage]) -> String {
    serde_json::json!({ "messages": messages }).to_string()
}

pub fn contacts_json(ids: &[&str]) -> String {
    let contacts: Vec<_> = ids
        .iter()
        .map(|id| serde_json::json!({ "_id": id, "firstName": id.to_uppercase() }))
        .collect();
    serde_json::json!({ "contacts": contacts }).to_string()
}

/// Build an app over mocks and take its message receiver.
pub fn test_app(
    http: &MockHttpClient,
    transport: &MockTransport,
    policy: RemotePolicy,
) -> (App, UnboundedReceiver<AppMessage>) {
    let config = ClientConfig::default().with_api_base_url(BASE_URL);
    let api = ChatApi::new(&config, Arc::new(http.clone()));
    let mut app = App::new(session(), api, Arc::new(transport.clone()), policy);
    let rx = app.message_rx.take().expect("receiver already taken");
    (app, rx)
}

/// Wait for the next app message and apply it.
pub async fn pump(app: &mut App, rx: &mut UnboundedReceiver<AppMessage>) {
    let msg = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for app message")
        .expect("channel closed");
    app.handle_message(msg);
}
