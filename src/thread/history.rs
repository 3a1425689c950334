//! Selection and history seeding for ThreadReconciler

use tracing::{debug, warn};

use crate::error::FetchFailure;
use crate::models::{Contact, Message, WireMessage};

use super::{ApplyOutcome, HistoryTicket, ThreadPhase, ThreadReconciler};

impl ThreadReconciler {
    /// Open the thread with `contact`.
    ///
    /// The previous thread, its buffered arrivals and its delivery markers
    /// are discarded. The returned ticket must accompany the history result.
    pub fn select_contact(&mut self, contact: &Contact) -> HistoryTicket {
        self.epoch += 1;
        self.selected = Some(contact.clone());
        self.phase = ThreadPhase::Loading { epoch: self.epoch };
        self.messages.clear();
        self.early.clear();
        self.deliveries.clear();
        self.unread.remove(&contact.id);

        debug!(epoch = self.epoch, contact_id = %contact.id, "Selected contact");

        HistoryTicket {
            epoch: self.epoch,
            contact_id: contact.id.clone(),
        }
    }

    /// Apply the history result requested under `ticket`.
    ///
    /// Results for any epoch other than the one currently loading are
    /// dropped. On success the thread becomes the fetched sequence followed
    /// by whatever arrived while loading.
    pub fn apply_history(
        &mut self,
        ticket: HistoryTicket,
        result: Result<Vec<WireMessage>, FetchFailure>,
    ) -> ApplyOutcome {
        let current = matches!(self.phase, ThreadPhase::Loading { epoch } if epoch == ticket.epoch);
        if !current {
            debug!(
                ticket_epoch = ticket.epoch,
                epoch = self.epoch,
                contact_id = %ticket.contact_id,
                "Dropping stale history result"
            );
            return ApplyOutcome::Stale;
        }

        match result {
            Ok(history) => {
                let user_id = self.session_user_id.clone();
                let mut seeded: Vec<Message> = history
                    .into_iter()
                    .map(|wire| Message::from_history(wire, &user_id))
                    .collect();
                seeded.append(&mut self.early);
                self.messages = seeded;
                self.phase = ThreadPhase::Populated;
                // Pushes counted while the thread was unavailable are in the history now
                self.unread.remove(&ticket.contact_id);

                debug!(
                    epoch = ticket.epoch,
                    count = self.messages.len(),
                    "History applied"
                );
                ApplyOutcome::Applied {
                    count: self.messages.len(),
                }
            }
            Err(error) => {
                warn!(
                    epoch = ticket.epoch,
                    contact_id = %ticket.contact_id,
                    error = %error,
                    "History fetch failed"
                );
                // Local sends survive the failure; buffered pushes will come
                // back with the next history fetch.
                self.early.retain(Message::is_local);
                self.messages.clear();
                self.phase = ThreadPhase::Failed {
                    error: error.clone(),
                };
                ApplyOutcome::Failed(error)
            }
        }
    }

    /// Re-request history for the selected contact after a failure.
    ///
    /// Returns `None` unless the thread is in the `Failed` phase.
    pub fn retry_history(&mut self) -> Option<HistoryTicket> {
        if !matches!(self.phase, ThreadPhase::Failed { .. }) {
            return None;
        }
        let contact_id = self.selected.as_ref()?.id.clone();

        self.epoch += 1;
        self.phase = ThreadPhase::Loading { epoch: self.epoch };
        debug!(epoch = self.epoch, contact_id = %contact_id, "Retrying history");

        Some(HistoryTicket {
            epoch: self.epoch,
            contact_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::RemotePolicy;
    use super::*;
    use crate::models::Origin;

    fn reconciler() -> ThreadReconciler {
        ThreadReconciler::new("me", RemotePolicy::default())
    }

    fn timeout() -> FetchFailure {
        FetchFailure::Timeout {
            resource: "history".to_string(),
            duration_secs: 10,
        }
    }

    #[test]
    fn test_select_contact_bumps_epoch_and_loads() {
        let mut thread = reconciler();
        let ticket = thread.select_contact(&contact("alice"));

        assert_eq!(ticket.epoch, 1);
        assert_eq!(ticket.contact_id, "alice");
        assert_eq!(thread.phase(), &ThreadPhase::Loading { epoch: 1 });
        assert_eq!(thread.selected_contact().unwrap().id, "alice");

        let second = thread.select_contact(&contact("bob"));
        assert_eq!(second.epoch, 2);
    }

    #[test]
    fn test_apply_history_keeps_fetch_order_and_origins() {
        let mut thread = reconciler();
        let ticket = thread.select_contact(&contact("alice"));

        let outcome = thread.apply_history(
            ticket,
            Ok(vec![wire("alice", "me", "m1"), wire("me", "alice", "m2")]),
        );

        assert_eq!(outcome, ApplyOutcome::Applied { count: 2 });
        assert_eq!(thread.phase(), &ThreadPhase::Populated);
        let bodies: Vec<_> = thread.messages().iter().map(|m| m.body.as_str()).collect();
        assert_eq!(bodies, vec!["m1", "m2"]);
        assert_eq!(thread.messages()[0].origin, Origin::Remote);
        assert_eq!(thread.messages()[1].origin, Origin::Local);
    }

    #[test]
    fn test_stale_result_is_dropped() {
        let mut thread = reconciler();
        let old = thread.select_contact(&contact("alice"));
        let new = thread.select_contact(&contact("bob"));

        // Alice's slow response lands after Bob was selected
        let outcome = thread.apply_history(old, Ok(vec![wire("alice", "me", "old")]));
        assert_eq!(outcome, ApplyOutcome::Stale);
        assert!(thread.messages().is_empty());
        assert_eq!(thread.phase(), &ThreadPhase::Loading { epoch: new.epoch });

        let outcome = thread.apply_history(new, Ok(vec![wire("bob", "me", "new")]));
        assert_eq!(outcome, ApplyOutcome::Applied { count: 1 });
        assert_eq!(thread.messages()[0].body, "new");
    }

    #[test]
    fn test_same_ticket_applies_once() {
        let mut thread = reconciler();
        let ticket = thread.select_contact(&contact("alice"));
        thread.apply_history(ticket.clone(), Ok(vec![wire("alice", "me", "m1")]));
        thread.send_message("after");

        let outcome = thread.apply_history(ticket, Ok(vec![]));
        assert_eq!(outcome, ApplyOutcome::Stale);
        assert_eq!(thread.messages().len(), 2);
    }

    #[test]
    fn test_failure_leaves_thread_empty() {
        let mut thread = reconciler();
        let ticket = thread.select_contact(&contact("alice"));

        let outcome = thread.apply_history(ticket, Err(timeout()));

        assert_eq!(outcome, ApplyOutcome::Failed(timeout()));
        assert!(thread.messages().is_empty());
        assert_eq!(thread.phase(), &ThreadPhase::Failed { error: timeout() });
    }

    #[test]
    fn test_stale_failure_is_dropped() {
        let mut thread = reconciler();
        let old = thread.select_contact(&contact("alice"));
        thread.select_contact(&contact("bob"));

        assert_eq!(thread.apply_history(old, Err(timeout())), ApplyOutcome::Stale);
        assert!(thread.phase().is_loading());
    }

    #[test]
    fn test_retry_after_failure() {
        let mut thread = reconciler();
        let ticket = thread.select_contact(&contact("alice"));
        thread.apply_history(ticket.clone(), Err(timeout()));

        let retry = thread.retry_history().unwrap();
        assert_eq!(retry.contact_id, "alice");
        assert_eq!(retry.epoch, ticket.epoch + 1);
        assert_eq!(thread.phase(), &ThreadPhase::Loading { epoch: retry.epoch });

        // The failed ticket can no longer land
        assert_eq!(thread.apply_history(ticket, Ok(vec![])), ApplyOutcome::Stale);
        let outcome = thread.apply_history(retry, Ok(vec![wire("alice", "me", "m1")]));
        assert_eq!(outcome, ApplyOutcome::Applied { count: 1 });
    }

    #[test]
    fn test_successful_retry_clears_unread_for_open_contact() {
        let mut thread = reconciler();
        let ticket = thread.select_contact(&contact("alice"));
        thread.apply_history(ticket, Err(timeout()));
        thread.on_remote_message(wire("alice", "me", "hey"));
        assert_eq!(thread.unread("alice"), 1);

        let retry = thread.retry_history().unwrap();
        thread.apply_history(retry, Ok(vec![wire("alice", "me", "hey")]));

        assert_eq!(thread.phase(), &ThreadPhase::Populated);
        assert_eq!(thread.unread("alice"), 0);
    }

    #[test]
    fn test_successful_history_keeps_other_unread() {
        let mut thread = reconciler();
        let ticket = thread.select_contact(&contact("alice"));
        thread.on_remote_message(wire("bob", "me", "psst"));

        thread.apply_history(ticket, Ok(vec![]));

        assert_eq!(thread.unread("bob"), 1);
    }

    #[test]
    fn test_retry_only_from_failed() {
        let mut thread = reconciler();
        assert!(thread.retry_history().is_none());

        let ticket = thread.select_contact(&contact("alice"));
        assert!(thread.retry_history().is_none());

        thread.apply_history(ticket, Ok(vec![]));
        assert!(thread.retry_history().is_none());
        assert_eq!(thread.epoch(), 1);
    }

    #[test]
    fn test_arrivals_while_loading_follow_history() {
        let mut thread = reconciler();
        let ticket = thread.select_contact(&contact("alice"));

        thread.send_message("early local");
        thread.on_remote_message(wire("alice", "me", "early push"));
        assert!(thread.messages().is_empty());
        assert_eq!(thread.buffered().len(), 2);

        thread.apply_history(ticket, Ok(vec![wire("alice", "me", "m1")]));

        let bodies: Vec<_> = thread.messages().iter().map(|m| m.body.as_str()).collect();
        assert_eq!(bodies, vec!["m1", "early local", "early push"]);
        assert!(thread.buffered().is_empty());
    }

    #[test]
    fn test_failure_drops_buffered_pushes_but_keeps_local_sends() {
        let mut thread = reconciler();
        let ticket = thread.select_contact(&contact("alice"));
        thread.send_message("mine");
        thread.on_remote_message(wire("alice", "me", "theirs"));

        thread.apply_history(ticket, Err(timeout()));

        assert_eq!(thread.buffered().len(), 1);
        assert_eq!(thread.buffered()[0].body, "mine");
    }

    #[test]
    fn test_selection_discards_buffer() {
        let mut thread = reconciler();
        thread.select_contact(&contact("alice"));
        thread.on_remote_message(wire("alice", "me", "early"));

        let ticket = thread.select_contact(&contact("bob"));
        thread.apply_history(ticket, Ok(vec![]));

        assert!(thread.messages().is_empty());
    }
}
