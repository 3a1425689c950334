//! AppMessage enum for async communication within the application.

use uuid::Uuid;

use crate::error::{FetchFailure, TransportFailure};
use crate::models::{Contact, WireMessage};
use crate::subscription::TransportEvent;
use crate::thread::HistoryTicket;
use crate::traits::ConnectionState;

/// Results posted back to the event loop by background tasks.
///
/// Tasks never touch the app state directly; every mutation happens when
/// the loop handles one of these.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// Contact directory fetch finished
    ContactsLoaded(Result<Vec<Contact>, FetchFailure>),
    /// History fetch for `ticket` finished
    HistoryLoaded {
        ticket: HistoryTicket,
        result: Result<Vec<WireMessage>, FetchFailure>,
    },
    /// A `receive_message` push arrived
    RemoteMessage(WireMessage),
    /// The transport answered an emission of local message `id`
    Delivery {
        id: Uuid,
        result: Result<(), TransportFailure>,
    },
    /// The socket connection state changed
    ConnectionChanged(ConnectionState),
    /// Announcing the session user on the socket failed
    JoinFailed(TransportFailure),
}

impl From<TransportEvent> for AppMessage {
    fn from(event: TransportEvent) -> Self {
        match event {
            TransportEvent::Push(wire) => AppMessage::RemoteMessage(wire),
            TransportEvent::Connection(state) => AppMessage::ConnectionChanged(state),
        }
    }
}
