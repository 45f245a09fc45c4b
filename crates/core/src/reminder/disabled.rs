use std::time::Duration;

use async_trait::async_trait;

use super::scheduler::{ReminderId, ReminderPayload, ReminderScheduler};
use crate::{Error, Result};

/// Scheduler for environments without local notifications.
///
/// Every call fails with [`Error::Unsupported`], which the store reports as a
/// soft warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledReminderScheduler;

#[async_trait]
impl ReminderScheduler for DisabledReminderScheduler {
    async fn schedule(&self, _delay: Duration, _payload: ReminderPayload) -> Result<ReminderId> {
        Err(Error::Unsupported("reminders are disabled".to_string()))
    }

    async fn cancel(&self, id: &ReminderId) -> Result<()> {
        Err(Error::Unsupported(format!("cannot cancel reminder {}", id)))
    }
}
