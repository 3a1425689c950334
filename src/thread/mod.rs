//! Thread reconciliation core
//!
//! Owns the single materialized thread (session user + selected contact) and
//! merges three sources into it: the history snapshot, local sends and
//! remote pushes. Switching contacts discards the thread and bumps the epoch,
//! so history results requested for an older selection are dropped on
//! arrival.
//!
//! The reconciler is plain data with no I/O. Whoever owns it (the app event
//! loop) performs the fetch for a [`HistoryTicket`] and hands the result back
//! through [`ThreadReconciler::apply_history`].

mod history;
mod policy;
mod remote;
mod send;

use std::collections::HashMap;

use uuid::Uuid;

use crate::error::FetchFailure;
use crate::models::{Contact, DeliveryState, Message};

pub use policy::RemotePolicy;

/// Identifies one history request. Only the ticket of the latest selection
/// can be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryTicket {
    pub epoch: u64,
    pub contact_id: String,
}

/// Observable lifecycle of the thread.
///
/// `Idle`, `Loading` and `Failed` are all "empty": the thread holds no
/// messages until a history result for the current epoch succeeds.
#[derive(Debug, Clone, PartialEq)]
pub enum ThreadPhase {
    /// No contact selected
    Idle,
    /// History requested under `epoch`
    Loading { epoch: u64 },
    /// History request failed; retryable with [`ThreadReconciler::retry_history`]
    Failed { error: FetchFailure },
    /// History applied; local sends and pushes append
    Populated,
}

impl ThreadPhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, ThreadPhase::Loading { .. })
    }
}

/// Result of [`ThreadReconciler::apply_history`].
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    /// Thread seeded with `count` messages (history plus buffered arrivals)
    Applied { count: usize },
    /// Ticket belongs to an older selection; nothing changed
    Stale,
    /// Fetch failed for the current selection; thread stays empty
    Failed(FetchFailure),
}

/// Result of [`ThreadReconciler::on_remote_message`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    /// Appended to the open thread
    Appended,
    /// Held until the pending history result arrives
    Buffered,
    /// Not applied; counted as unread for this contact
    Unread { contact_id: String },
}

/// The thread state machine.
#[derive(Debug)]
pub struct ThreadReconciler {
    /// Id of the logged-in user; decides history origins and push peers
    pub(crate) session_user_id: String,
    pub(crate) policy: RemotePolicy,
    /// Bumped on every selection and retry
    pub(crate) epoch: u64,
    pub(crate) selected: Option<Contact>,
    pub(crate) phase: ThreadPhase,
    /// The thread, in arrival order
    pub(crate) messages: Vec<Message>,
    /// Local sends and accepted pushes received before history landed
    pub(crate) early: Vec<Message>,
    /// Delivery markers for local messages of the current thread
    pub(crate) deliveries: HashMap<Uuid, DeliveryState>,
    /// Pushes not applied to the open thread, per peer id
    pub(crate) unread: HashMap<String, usize>,
}

impl ThreadReconciler {
    pub fn new(session_user_id: impl Into<String>, policy: RemotePolicy) -> Self {
        Self {
            session_user_id: session_user_id.into(),
            policy,
            epoch: 0,
            selected: None,
            phase: ThreadPhase::Idle,
            messages: Vec::new(),
            early: Vec::new(),
            deliveries: HashMap::new(),
            unread: HashMap::new(),
        }
    }

    /// Messages of the current thread in arrival order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Arrivals held back while history is loading.
    pub fn buffered(&self) -> &[Message] {
        &self.early
    }

    pub fn phase(&self) -> &ThreadPhase {
        &self.phase
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn policy(&self) -> RemotePolicy {
        self.policy
    }

    pub fn session_user_id(&self) -> &str {
        &self.session_user_id
    }

    pub fn selected_contact(&self) -> Option<&Contact> {
        self.selected.as_ref()
    }

    /// Delivery marker of a local message, if it belongs to this thread.
    pub fn delivery(&self, id: &Uuid) -> Option<DeliveryState> {
        self.deliveries.get(id).copied()
    }

    pub fn unread(&self, contact_id: &str) -> usize {
        self.unread.get(contact_id).copied().unwrap_or(0)
    }

    pub fn clear_unread(&mut self, contact_id: &str) {
        self.unread.remove(contact_id);
    }

    /// Drop the thread and the selection, e.g. on logout.
    ///
    /// Bumps the epoch so in-flight history results are discarded.
    pub fn reset(&mut self) {
        self.epoch += 1;
        self.selected = None;
        self.phase = ThreadPhase::Idle;
        self.messages.clear();
        self.early.clear();
        self.deliveries.clear();
        self.unread.clear();
    }
}
