//! In-process reminder scheduler backed by tokio timers
//!
//! Each reminder is a spawned task sleeping for its delay. Fired reminders are
//! sent on a channel; the receiver is handed back by [`TokioReminderScheduler::new`].
//! Nothing is persisted, so pending reminders are lost when the process exits.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};
use tokio::task::AbortHandle;
use tracing::{debug, warn};
use uuid::Uuid;

use super::scheduler::{DeliveredReminder, ReminderId, ReminderPayload, ReminderScheduler};
use crate::{Error, Result};

/// Timer-based scheduler delivering over an unbounded channel
#[derive(Clone)]
pub struct TokioReminderScheduler {
    /// Reminders that have neither fired nor been cancelled
    pending: Arc<Mutex<HashMap<ReminderId, AbortHandle>>>,
    delivered_tx: mpsc::UnboundedSender<DeliveredReminder>,
}

impl TokioReminderScheduler {
    /// Create a scheduler and the receiver its reminders are delivered to
    pub fn new() -> (Self, mpsc::UnboundedReceiver<DeliveredReminder>) {
        let (delivered_tx, delivered_rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            pending: Arc::new(Mutex::new(HashMap::new())),
            delivered_tx,
        };
        (scheduler, delivered_rx)
    }

    /// Number of reminders still waiting to fire
    pub async fn pending_count(&self) -> usize {
        self.pending.lock().await.len()
    }
}

#[async_trait]
impl ReminderScheduler for TokioReminderScheduler {
    async fn schedule(&self, delay: Duration, payload: ReminderPayload) -> Result<ReminderId> {
        if self.delivered_tx.is_closed() {
            return Err(Error::Reminder("delivery channel closed".to_string()));
        }

        let id = ReminderId::new(Uuid::new_v4().to_string());

        // Hold the lock across spawn + insert so the timer task cannot remove
        // its entry before it exists.
        let mut pending = self.pending.lock().await;

        let task_pending = Arc::clone(&self.pending);
        let tx = self.delivered_tx.clone();
        let reminder_id = id.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task_pending.lock().await.remove(&reminder_id);
            debug!("Reminder {} fired", reminder_id);
            if tx.send(DeliveredReminder { reminder_id, payload }).is_err() {
                warn!("Reminder fired after the receiver was dropped");
            }
        });

        pending.insert(id.clone(), handle.abort_handle());
        debug!("Scheduled reminder {} in {:?}", id, delay);
        Ok(id)
    }

    async fn cancel(&self, id: &ReminderId) -> Result<()> {
        let handle = self.pending.lock().await.remove(id);
        match handle {
            Some(handle) => {
                handle.abort();
                debug!("Cancelled reminder {}", id);
                Ok(())
            }
            None => Err(Error::Reminder(format!("no pending reminder {}", id))),
        }
    }
}
