//! Application state and event handling.
//!
//! [`App`] is owned by the event loop. It holds the session, the contact
//! list, the [`ThreadReconciler`] and the input line. Background tokio tasks
//! (fetches, sends, the transport subscription) report back through
//! [`AppMessage`]s on an unbounded channel, and only
//! [`App::handle_message`] applies them.

mod actions;
mod handlers;
mod messages;
mod navigation;
mod types;

pub use messages::AppMessage;
pub use types::{ContactsState, Focus};

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::info;

use crate::api::ChatApi;
use crate::auth::Session;
use crate::input::{InputBuffer, KeybindingConfig};
use crate::models::Contact;
use crate::subscription::Subscription;
use crate::thread::{RemotePolicy, ThreadReconciler};
use crate::traits::{ChatTransport, ConnectionState};

/// Main application state
pub struct App {
    /// Flag to track if the app should quit
    pub should_quit: bool,
    /// Current focus pane
    pub focus: Focus,
    pub session: Session,
    /// Contacts in server order
    pub contacts: Vec<Contact>,
    pub contacts_state: ContactsState,
    /// Sidebar cursor, an index into `contacts`
    pub cursor: usize,
    /// The open thread
    pub thread: ThreadReconciler,
    pub input: InputBuffer,
    /// Last reported socket state
    pub connection: ConnectionState,
    /// Transient one-line notice (send failures, hints)
    pub notice: Option<String>,
    /// Dirty flag: set on state mutations, cleared after each draw
    pub needs_redraw: bool,
    /// Receiver for async messages; taken by the event loop
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    /// Sender for async messages (clone this to pass to async tasks)
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    pub(crate) keybindings: KeybindingConfig,
    api: ChatApi,
    transport: Arc<dyn ChatTransport>,
    subscription: Option<Subscription>,
}

impl App {
    pub fn new(
        session: Session,
        api: ChatApi,
        transport: Arc<dyn ChatTransport>,
        policy: RemotePolicy,
    ) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        let connection = transport.state().borrow().clone();
        let thread = ThreadReconciler::new(session.user.id.clone(), policy);

        Self {
            should_quit: false,
            focus: Focus::default(),
            session,
            contacts: Vec::new(),
            contacts_state: ContactsState::default(),
            cursor: 0,
            thread,
            input: InputBuffer::new(),
            connection,
            notice: None,
            needs_redraw: true,
            message_rx: Some(message_rx),
            message_tx,
            keybindings: KeybindingConfig::new(),
            api,
            transport,
            subscription: None,
        }
    }

    /// Subscribe to the transport, announce the session user and load the
    /// contact list.
    pub fn start(&mut self) {
        self.subscription = Some(Subscription::spawn(
            self.transport.as_ref(),
            self.message_tx.clone(),
        ));
        self.announce();
        self.load_contacts();
    }

    /// Tear the session down: stop listening and close the transport.
    pub async fn shutdown(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.release().await;
        }
        self.thread.reset();
        self.transport.shutdown();
        info!(user_id = %self.session.user.id, "Session closed");
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.as_ref().is_some_and(Subscription::is_active)
    }

    /// Contact under the sidebar cursor.
    pub fn highlighted_contact(&self) -> Option<&Contact> {
        self.contacts.get(self.cursor)
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }
}
