//! Local sends and delivery markers for ThreadReconciler

use tracing::debug;
use uuid::Uuid;

use crate::models::{DeliveryState, Message, OutgoingMessage};

use super::{ThreadPhase, ThreadReconciler};

impl ThreadReconciler {
    /// Append a locally composed message and return the payload to emit.
    ///
    /// Returns `None` without touching the thread when `text` is blank or no
    /// contact is selected. The message starts out [`DeliveryState::Pending`].
    pub fn send_message(&mut self, text: &str) -> Option<(Uuid, OutgoingMessage)> {
        if text.trim().is_empty() {
            return None;
        }
        let contact = self.selected.as_ref()?;

        let message = Message::local(&self.session_user_id, &contact.id, text);
        let id = message.id;
        let outgoing = message.to_outgoing();

        match self.phase {
            ThreadPhase::Populated => self.messages.push(message),
            _ => self.early.push(message),
        }
        self.deliveries.insert(id, DeliveryState::Pending);

        debug!(message_id = %id, receiver_id = %outgoing.receiver_id, "Appended local message");
        Some((id, outgoing))
    }

    /// Record the transport outcome for a local message.
    ///
    /// Returns `false` when the message belongs to a discarded thread.
    pub fn mark_delivery(&mut self, id: Uuid, state: DeliveryState) -> bool {
        match self.deliveries.get_mut(&id) {
            Some(current) => {
                *current = state;
                true
            }
            None => {
                debug!(message_id = %id, "Ignoring delivery marker for discarded thread");
                false
            }
        }
    }
}
