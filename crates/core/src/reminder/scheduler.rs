//! Reminder scheduler trait
//!
//! Defines the interface the store uses to schedule and cancel reminders.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Result;

/// Opaque handle of a scheduled reminder
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReminderId(String);

impl ReminderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ReminderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the user sees when a reminder fires
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderPayload {
    pub title: String,
    pub body: String,
    /// Id of the task the reminder belongs to
    pub correlation_id: Uuid,
}

/// A reminder that reached its delivery time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveredReminder {
    pub reminder_id: ReminderId,
    pub payload: ReminderPayload,
}

/// Scheduler interface for one-shot delayed reminders
#[async_trait]
pub trait ReminderScheduler: Send + Sync {
    /// Schedule `payload` to fire once after `delay`
    async fn schedule(&self, delay: Duration, payload: ReminderPayload) -> Result<ReminderId>;

    /// Cancel a reminder that has not fired yet
    async fn cancel(&self, id: &ReminderId) -> Result<()>;
}
