//! Transport subscription handle.
//!
//! A [`Subscription`] owns the background task that forwards transport
//! pushes and connection state changes into the application channel. The
//! task lives exactly as long as the handle: dropping it (or awaiting
//! [`Subscription::release`]) aborts the task and releases the broadcast
//! receiver, so no listener outlives the session that created it.

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::models::WireMessage;
use crate::traits::{ChatTransport, ConnectionState};

/// Something the transport reported.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    /// A `receive_message` push
    Push(WireMessage),
    /// The connection state changed
    Connection(ConnectionState),
}

/// Handle to a running forwarding task.
#[derive(Debug)]
pub struct Subscription {
    handle: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Subscribe to `transport` and forward its events into `tx`.
    ///
    /// The task stops on its own when the transport closes or `tx` has no
    /// receiver left.
    pub fn spawn<T>(transport: &dyn ChatTransport, tx: mpsc::UnboundedSender<T>) -> Self
    where
        T: From<TransportEvent> + Send + 'static,
    {
        let mut pushes = transport.subscribe();
        let mut state_rx = transport.state();

        let handle = tokio::spawn(async move {
            loop {
                let event = tokio::select! {
                    push = pushes.recv() => match push {
                        Ok(wire) => TransportEvent::Push(wire),
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            warn!("Subscription lagged, {} pushes dropped", skipped);
                            continue;
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            info!("Transport closed, ending subscription");
                            break;
                        }
                    },
                    changed = state_rx.changed() => match changed {
                        Ok(()) => TransportEvent::Connection(state_rx.borrow_and_update().clone()),
                        Err(_) => {
                            info!("Transport state channel closed, ending subscription");
                            break;
                        }
                    },
                };

                if tx.send(T::from(event)).is_err() {
                    debug!("Application channel closed, ending subscription");
                    break;
                }
            }
        });

        Self {
            handle: Some(handle),
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop forwarding and wait until the task has finished.
    pub async fn release(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            let _ = handle.await;
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
