//! Remote push handling for ThreadReconciler

use tracing::debug;

use crate::models::{Message, WireMessage};

use super::{PushOutcome, ThreadPhase, ThreadReconciler};

impl ThreadReconciler {
    /// The other party of a pushed message. Echoes of the session user's own
    /// messages are attributed to their receiver.
    pub fn peer_of<'a>(&self, wire: &'a WireMessage) -> &'a str {
        if wire.sender_id == self.session_user_id {
            &wire.receiver_id
        } else {
            &wire.sender_id
        }
    }

    /// Handle a `receive_message` push.
    ///
    /// Accepted pushes are appended with origin Remote (buffered while
    /// history is loading). Pushes the policy rejects, or that arrive with no
    /// thread to append to, bump the peer's unread counter. No deduplication
    /// is done: the same payload twice appends twice.
    pub fn on_remote_message(&mut self, wire: WireMessage) -> PushOutcome {
        let peer = self.peer_of(&wire).to_string();

        let accepted = self
            .selected
            .as_ref()
            .is_some_and(|contact| self.policy.accepts(&peer, &contact.id));

        let outcome = match (&self.phase, accepted) {
            (ThreadPhase::Populated, true) => {
                self.messages.push(Message::from_push(wire));
                PushOutcome::Appended
            }
            (ThreadPhase::Loading { .. }, true) => {
                self.early.push(Message::from_push(wire));
                PushOutcome::Buffered
            }
            _ => {
                *self.unread.entry(peer.clone()).or_insert(0) += 1;
                PushOutcome::Unread { contact_id: peer }
            }
        };

        debug!(outcome = ?outcome, "Remote message");
        outcome
    }
}
