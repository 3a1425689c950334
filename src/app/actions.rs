//! Actions that start background work.
//!
//! Each action spawns a tokio task that performs one request and posts the
//! result back as an [`AppMessage`].

use tracing::{debug, warn};

use crate::thread::{HistoryTicket, ThreadPhase};

use super::{App, AppMessage, ContactsState};

impl App {
    /// Announce the session user on the socket.
    pub(crate) fn announce(&self) {
        let transport = self.transport.clone();
        let tx = self.message_tx.clone();
        let user_id = self.session.user.id.clone();

        tokio::spawn(async move {
            if let Err(e) = transport.join(&user_id).await {
                warn!(error = %e, "Join failed");
                let _ = tx.send(AppMessage::JoinFailed(e));
            }
        });
    }

    /// Fetch the contact directory.
    pub fn load_contacts(&mut self) {
        self.contacts_state = ContactsState::Loading;
        let api = self.api.clone();
        let session = self.session.clone();
        let tx = self.message_tx.clone();

        tokio::spawn(async move {
            let result = api.fetch_contacts(&session).await;
            let _ = tx.send(AppMessage::ContactsLoaded(result));
        });
    }

    /// Fetch history for a selection. The result carries the ticket back so
    /// the reconciler can drop it if the selection moved on.
    pub fn request_history(&self, ticket: HistoryTicket) {
        let api = self.api.clone();
        let session = self.session.clone();
        let tx = self.message_tx.clone();

        debug!(epoch = ticket.epoch, contact_id = %ticket.contact_id, "Requesting history");
        tokio::spawn(async move {
            let result = api.fetch_history(&session, &ticket.contact_id).await;
            let _ = tx.send(AppMessage::HistoryLoaded { ticket, result });
        });
    }

    /// Send the input line to the selected contact.
    ///
    /// The message is appended before the transport is asked to emit it; the
    /// outcome arrives later as a delivery marker.
    pub fn submit_input(&mut self) {
        let text = self.input.take();
        let Some((id, outgoing)) = self.thread.send_message(&text) else {
            if !text.trim().is_empty() {
                self.input.set(text);
                self.notice = Some("Select a contact first".to_string());
            }
            return;
        };

        let transport = self.transport.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let result = transport.send(outgoing).await;
            let _ = tx.send(AppMessage::Delivery { id, result });
        });
    }

    /// Retry whatever failed: the contact list first, then the history of
    /// the open thread.
    pub fn retry(&mut self) {
        if matches!(self.contacts_state, ContactsState::Failed(_)) {
            self.load_contacts();
            return;
        }
        if matches!(self.thread.phase(), ThreadPhase::Failed { .. }) {
            if let Some(ticket) = self.thread.retry_history() {
                self.request_history(ticket);
            }
        }
    }
}
