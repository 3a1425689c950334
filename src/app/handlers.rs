//! Message handling for the App.

use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, warn};

use crate::models::DeliveryState;
use crate::thread::{ApplyOutcome, PushOutcome};
use crate::traits::ConnectionState;

use super::{App, AppMessage, ContactsState};

impl App {
    /// Handle an incoming async message.
    pub fn handle_message(&mut self, msg: AppMessage) {
        self.mark_dirty();
        match msg {
            AppMessage::ContactsLoaded(Ok(contacts)) => {
                info!(count = contacts.len(), "Contacts loaded");
                self.contacts = contacts;
                self.cursor = self.cursor.min(self.contacts.len().saturating_sub(1));
                self.contacts_state = ContactsState::Loaded;
            }
            AppMessage::ContactsLoaded(Err(error)) => {
                warn!(error = %error, "Contacts fetch failed");
                self.contacts_state = ContactsState::Failed(error);
            }
            AppMessage::HistoryLoaded { ticket, result } => {
                match self.thread.apply_history(ticket, result) {
                    ApplyOutcome::Applied { count } => debug!(count, "Thread seeded"),
                    ApplyOutcome::Stale => {}
                    ApplyOutcome::Failed(error) => {
                        if error.requires_reauth() {
                            self.notice = Some(error.user_message());
                        }
                    }
                }
            }
            AppMessage::RemoteMessage(wire) => {
                if let PushOutcome::Unread { contact_id } = self.thread.on_remote_message(wire) {
                    debug!(contact_id = %contact_id, "Push counted as unread");
                }
            }
            AppMessage::Delivery { id, result } => {
                let state = match result {
                    Ok(()) => DeliveryState::Sent,
                    Err(error) => {
                        warn!(message_id = %id, error = %error, "Send failed");
                        self.notice = Some(error.user_message());
                        DeliveryState::Failed
                    }
                };
                self.thread.mark_delivery(id, state);
            }
            AppMessage::ConnectionChanged(state) => {
                info!(state = ?state, "Connection state changed");
                if state == ConnectionState::Connected {
                    self.notice = None;
                }
                self.connection = state;
            }
            AppMessage::JoinFailed(error) => {
                self.notice = Some(error.user_message());
            }
        }
    }

    /// Apply every message already waiting on the channel.
    ///
    /// Returns the number handled. Used by the event loop after a wake-up so
    /// a burst of pushes costs one redraw.
    pub fn drain_messages(&mut self, rx: &mut UnboundedReceiver<AppMessage>) -> usize {
        let mut handled = 0;
        while let Ok(msg) = rx.try_recv() {
            self.handle_message(msg);
            handled += 1;
        }
        handled
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse, MockTransport};
    use crate::api::ChatApi;
    use crate::app::Focus;
    use crate::auth::Session;
    use crate::config::ClientConfig;
    use crate::input::Command;
    use crate::models::{SessionUser, WireMessage};
    use crate::thread::{RemotePolicy, ThreadPhase};

    const BASE: &str = "http://api.test";

    fn app_with(
        http: &MockHttpClient,
        transport: &MockTransport,
    ) -> (App, UnboundedReceiver<AppMessage>) {
        let config = ClientConfig::default().with_api_base_url(BASE);
        let session = Session::new(
            "tok",
            SessionUser {
                id: "me".to_string(),
                display_name: "Me".to_string(),
                avatar: None,
            },
        );
        let api = ChatApi::new(&config, Arc::new(http.clone()));
        let mut app = App::new(
            session,
            api,
            Arc::new(transport.clone()),
            RemotePolicy::ActiveContactOnly,
        );
        let rx = app.message_rx.take().unwrap();
        (app, rx)
    }

    async fn next(rx: &mut UnboundedReceiver<AppMessage>) -> AppMessage {
        tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("timed out waiting for app message")
            .expect("channel closed")
    }

    fn contacts_body() -> &'static str {
        r#"{"contacts":[{"_id":"alice","firstName":"Alice"},{"_id":"bob","firstName":"Bob"}]}"#
    }

    fn wire(sender: &str, receiver: &str, text: &str) -> WireMessage {
        WireMessage {
            sender_id: sender.to_string(),
            receiver_id: receiver.to_string(),
            message: text.to_string(),
            timestamp: None,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_contacts_load_into_sidebar() {
        let http = MockHttpClient::new();
        http.set_response(
            "http://api.test/chat/contacts/me",
            MockResponse::json(200, contacts_body()),
        );
        let (mut app, mut rx) = app_with(&http, &MockTransport::new());

        app.load_contacts();
        let msg = next(&mut rx).await;
        app.handle_message(msg);

        assert_eq!(app.contacts_state, ContactsState::Loaded);
        assert_eq!(app.contacts.len(), 2);
        assert_eq!(app.highlighted_contact().unwrap().id, "alice");
    }

    #[tokio::test]
    async fn test_contacts_failure_then_retry() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::json(503, "down"));
        let (mut app, mut rx) = app_with(&http, &MockTransport::new());

        app.load_contacts();
        let msg = next(&mut rx).await;
        app.handle_message(msg);
        assert!(matches!(app.contacts_state, ContactsState::Failed(_)));

        http.set_response(
            "http://api.test/chat/contacts/me",
            MockResponse::json(200, contacts_body()),
        );
        app.execute_command(Command::Retry);
        let msg = next(&mut rx).await;
        app.handle_message(msg);
        assert_eq!(app.contacts_state, ContactsState::Loaded);
    }

    #[tokio::test]
    async fn test_open_contact_send_and_deliver() {
        let http = MockHttpClient::new();
        http.set_response(
            "http://api.test/chat/contacts/me",
            MockResponse::json(200, contacts_body()),
        );
        http.set_response(
            "http://api.test/chat/messages/me/alice",
            MockResponse::json(
                200,
                r#"{"messages":[{"senderId":"alice","receiverId":"me","message":"m1"}]}"#,
            ),
        );
        let transport = MockTransport::new();
        let (mut app, mut rx) = app_with(&http, &transport);

        app.load_contacts();
        let msg = next(&mut rx).await;
        app.handle_message(msg);

        app.execute_command(Command::OpenSelectedContact);
        assert_eq!(app.focus, Focus::Input);
        let msg = next(&mut rx).await;
        app.handle_message(msg);
        assert_eq!(app.thread.phase(), &ThreadPhase::Populated);

        for c in "hello".chars() {
            app.execute_command(Command::InsertChar(c));
        }
        app.execute_command(Command::Submit);
        assert!(app.input.is_empty());
        let local = app.thread.messages().last().unwrap().clone();
        assert_eq!(local.body, "hello");
        assert_eq!(app.thread.delivery(&local.id), Some(DeliveryState::Pending));

        let msg = next(&mut rx).await;
        app.handle_message(msg);
        assert_eq!(app.thread.delivery(&local.id), Some(DeliveryState::Sent));

        let sent = transport.get_sent_messages().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].receiver_id, "alice");
    }

    #[tokio::test]
    async fn test_failed_send_marks_message_failed() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::json(200, r#"{"messages":[]}"#));
        let transport = MockTransport::new();
        transport.set_send_should_fail(true).await;
        let (mut app, mut rx) = app_with(&http, &transport);
        app.contacts = vec![crate::models::Contact {
            id: "alice".to_string(),
            display_name: "Alice".to_string(),
            avatar: None,
        }];

        app.open_selected_contact();
        let msg = next(&mut rx).await;
        app.handle_message(msg);

        app.input.set("hi");
        app.submit_input();
        let id = app.thread.messages()[0].id;
        let msg = next(&mut rx).await;
        app.handle_message(msg);

        assert_eq!(app.thread.delivery(&id), Some(DeliveryState::Failed));
        assert!(app.notice.is_some());
        // The message stays in the thread
        assert_eq!(app.thread.messages().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_without_contact_keeps_text() {
        let (mut app, _rx) = app_with(&MockHttpClient::new(), &MockTransport::new());

        app.input.set("hello");
        app.submit_input();

        assert_eq!(app.input.text(), "hello");
        assert_eq!(app.notice.as_deref(), Some("Select a contact first"));
        assert!(app.thread.messages().is_empty());
    }

    #[tokio::test]
    async fn test_blank_submit_does_nothing() {
        let (mut app, _rx) = app_with(&MockHttpClient::new(), &MockTransport::new());
        app.input.set("   ");
        app.submit_input();
        assert!(app.notice.is_none());
        assert!(app.thread.messages().is_empty());
    }

    #[tokio::test]
    async fn test_pushes_and_connection_flow_through_subscription() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::json(200, r#"{"contacts":[]}"#));
        let transport = MockTransport::new();
        let (mut app, mut rx) = app_with(&http, &transport);

        app.start();
        assert!(app.is_subscribed());
        // Contacts result
        let msg = next(&mut rx).await;
        app.handle_message(msg);
        assert_eq!(transport.get_joined().await, vec!["me".to_string()]);

        transport.inject_message(wire("bob", "me", "psst"));
        let msg = next(&mut rx).await;
        app.handle_message(msg);
        assert_eq!(app.thread.unread("bob"), 1);

        transport.set_state(ConnectionState::Reconnecting { attempt: 2 });
        let msg = next(&mut rx).await;
        app.handle_message(msg);
        assert_eq!(app.connection, ConnectionState::Reconnecting { attempt: 2 });

        app.shutdown().await;
        assert!(!app.is_subscribed());
        assert_eq!(transport.subscriber_count(), 0);
        assert_eq!(app.thread.phase(), &ThreadPhase::Idle);
    }

    #[tokio::test]
    async fn test_drain_messages() {
        let (mut app, mut rx) = app_with(&MockHttpClient::new(), &MockTransport::new());
        app.message_tx
            .send(AppMessage::ConnectionChanged(ConnectionState::Disconnected))
            .unwrap();
        app.message_tx
            .send(AppMessage::RemoteMessage(wire("bob", "me", "x")))
            .unwrap();

        assert_eq!(app.drain_messages(&mut rx), 2);
        assert_eq!(app.connection, ConnectionState::Disconnected);
        assert_eq!(app.drain_messages(&mut rx), 0);
    }

    #[test]
    fn test_navigation_bounds() {
        let (mut app, _rx) = app_with(&MockHttpClient::new(), &MockTransport::new());

        app.move_down();
        assert_eq!(app.cursor, 0);

        app.handle_message(AppMessage::ContactsLoaded(Ok(vec![
            crate::models::Contact {
                id: "a".to_string(),
                display_name: "A".to_string(),
                avatar: None,
            },
            crate::models::Contact {
                id: "b".to_string(),
                display_name: "B".to_string(),
                avatar: None,
            },
        ])));
        app.move_down();
        app.move_down();
        assert_eq!(app.cursor, 1);
        app.move_up();
        app.move_up();
        assert_eq!(app.cursor, 0);

        app.cycle_focus();
        assert_eq!(app.focus, Focus::Input);
    }
}
