//! Task store and reminder controller
//!
//! Owns the task list and the presentation session state (filter, selected
//! priority, pending delete, open edit). Every mutation runs to completion on
//! `&mut self`, then writes the whole list back to the key-value store.
//! Failures of the storage or scheduler calls never abort a mutation; they are
//! logged and returned as [`SoftWarning`]s next to the result.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{SoftWarning, WarningKind};
use crate::priority::Priority;
use crate::reminder::{ReminderId, ReminderPayload, ReminderScheduler};
use crate::storage::KeyValueStore;
use crate::task::{
    decode_tasks, encode_tasks, validate_text, visible_tasks, Filter, Task, TaskStats,
};
use crate::Result;

/// Key the task list is persisted under
pub const STORAGE_KEY: &str = "tasks";

/// Result of an operation plus the side effects that degraded
#[derive(Debug)]
pub struct Outcome<T> {
    pub value: T,
    pub warnings: Vec<SoftWarning>,
}

impl<T> Outcome<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    fn with_warnings(value: T, warnings: Vec<SoftWarning>) -> Self {
        Self { value, warnings }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// A freshly added task
#[derive(Debug, Clone)]
pub struct Added {
    pub task: Task,
    /// Present when the reminder was scheduled
    pub confirmation: Option<String>,
}

pub struct TaskStore {
    tasks: Vec<Task>,
    storage: Arc<dyn KeyValueStore>,
    scheduler: Arc<dyn ReminderScheduler>,
    filter: Filter,
    selected_priority: Priority,
    pending_delete: Option<Uuid>,
    editing: Option<Uuid>,
}

impl TaskStore {
    /// Load the persisted list and build the store.
    ///
    /// A missing blob yields an empty list. An unreadable or malformed blob
    /// also yields an empty list, with a storage-read warning.
    pub async fn open(
        storage: Arc<dyn KeyValueStore>,
        scheduler: Arc<dyn ReminderScheduler>,
    ) -> Outcome<Self> {
        let mut warnings = Vec::new();

        let loaded = match storage.get(STORAGE_KEY).await {
            Ok(Some(blob)) => decode_tasks(&blob),
            Ok(None) => Ok(Vec::new()),
            Err(e) => Err(e),
        };
        let tasks = match loaded {
            Ok(tasks) => {
                info!("Loaded {} tasks", tasks.len());
                tasks
            }
            Err(e) => {
                warn!("Failed to load tasks, starting empty: {}", e);
                warnings.push(SoftWarning::new(WarningKind::StorageRead, None, &e));
                Vec::new()
            }
        };

        let store = Self {
            tasks,
            storage,
            scheduler,
            filter: Filter::default(),
            selected_priority: Priority::default(),
            pending_delete: None,
            editing: None,
        };
        Outcome::with_warnings(store, warnings)
    }

    /// All tasks in list order, newest first
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// The list as presentation shows it under the current filter
    pub fn visible_tasks(&self) -> Vec<&Task> {
        visible_tasks(&self.tasks, self.filter)
    }

    pub fn stats(&self) -> TaskStats {
        TaskStats::from_tasks(&self.tasks)
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Priority used by [`TaskStore::add`] when none is given
    pub fn selected_priority(&self) -> Priority {
        self.selected_priority
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.selected_priority = priority;
    }

    /// Add a task at the front of the list and schedule its reminder.
    ///
    /// Fails only on blank text. A scheduling failure still adds the task,
    /// without a reminder.
    pub async fn add(&mut self, text: &str, priority: Option<Priority>) -> Result<Outcome<Added>> {
        let priority = priority.unwrap_or(self.selected_priority);
        let mut task = Task::new(text, priority)?;
        let mut warnings = Vec::new();

        let config = priority.config();
        let payload = ReminderPayload {
            title: format!("Task reminder ({} priority)", config.label),
            body: task.text.clone(),
            correlation_id: task.id,
        };
        let confirmation = match self
            .scheduler
            .schedule(priority.reminder_delay(), payload)
            .await
        {
            Ok(reminder_id) => {
                task = task.with_reminder(reminder_id);
                Some(format!(
                    "Task added. Reminder set for {} seconds.",
                    config.reminder_delay_secs
                ))
            }
            Err(e) => {
                warn!("Failed to schedule reminder for task {}: {}", task.id, e);
                warnings.push(SoftWarning::new(WarningKind::ScheduleFailed, Some(task.id), &e));
                None
            }
        };

        info!("Added task {} ({})", task.id, priority);
        self.tasks.insert(0, task.clone());
        warnings.extend(self.persist().await);

        Ok(Outcome::with_warnings(Added { task, confirmation }, warnings))
    }

    /// Flip completion of `id`; unknown ids are ignored.
    ///
    /// Completing releases the outstanding reminder. Reopening does not
    /// schedule a new one.
    pub async fn toggle(&mut self, id: Uuid) -> Outcome<Option<Task>> {
        let Some(index) = self.position(id) else {
            debug!("Toggle ignored for unknown task {}", id);
            return Outcome::new(None);
        };

        let mut warnings = Vec::new();
        let task = &mut self.tasks[index];
        task.completed = !task.completed;

        let released = if task.completed {
            task.reminder_id.take()
        } else {
            None
        };
        let snapshot = task.clone();
        info!("Task {} completed={}", id, snapshot.completed);

        if let Some(reminder_id) = released {
            warnings.extend(self.cancel_reminder(id, &reminder_id).await);
        }
        warnings.extend(self.persist().await);

        Outcome::with_warnings(Some(snapshot), warnings)
    }

    /// First phase of delete: remember the target without touching the list.
    ///
    /// Returns false, and leaves no pending target, when `id` is unknown.
    pub fn request_delete(&mut self, id: Uuid) -> bool {
        if self.position(id).is_none() {
            self.pending_delete = None;
            return false;
        }
        self.pending_delete = Some(id);
        true
    }

    pub fn pending_delete(&self) -> Option<Uuid> {
        self.pending_delete
    }

    /// Second phase of delete: remove the pending target.
    pub async fn confirm_delete(&mut self) -> Outcome<Option<Task>> {
        let Some(id) = self.pending_delete.take() else {
            return Outcome::new(None);
        };
        let Some(index) = self.position(id) else {
            return Outcome::new(None);
        };

        let mut warnings = Vec::new();
        let mut task = self.tasks.remove(index);
        if self.editing == Some(id) {
            self.editing = None;
        }
        info!("Deleted task {}", id);

        if let Some(reminder_id) = task.reminder_id.take() {
            warnings.extend(self.cancel_reminder(id, &reminder_id).await);
        }
        warnings.extend(self.persist().await);

        Outcome::with_warnings(Some(task), warnings)
    }

    /// Discard the pending delete, returning its target
    pub fn cancel_delete(&mut self) -> Option<Uuid> {
        self.pending_delete.take()
    }

    /// Open an edit session on `id`
    pub fn start_edit(&mut self, id: Uuid) -> Option<&Task> {
        let index = self.position(id)?;
        self.editing = Some(id);
        Some(&self.tasks[index])
    }

    /// Task currently being edited
    pub fn editing(&self) -> Option<&Task> {
        self.editing.and_then(|id| self.get(id))
    }

    /// Replace the text of the task being edited.
    ///
    /// Blank text fails and keeps the session open. With no open session
    /// this is a no-op.
    pub async fn save_edit(&mut self, text: &str) -> Result<Outcome<Option<Task>>> {
        let Some(id) = self.editing else {
            return Ok(Outcome::new(None));
        };
        let text = validate_text(text)?;

        self.editing = None;
        let Some(index) = self.position(id) else {
            return Ok(Outcome::new(None));
        };
        self.tasks[index].text = text;
        let snapshot = self.tasks[index].clone();
        info!("Edited task {}", id);

        let warnings = self.persist().await.into_iter().collect();
        Ok(Outcome::with_warnings(Some(snapshot), warnings))
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Record that the scheduler delivered `reminder_id`.
    ///
    /// Clears the handle from its task so it is not cancelled later.
    pub async fn reminder_delivered(&mut self, reminder_id: &ReminderId) -> Outcome<Option<Uuid>> {
        let Some(task) = self
            .tasks
            .iter_mut()
            .find(|t| t.reminder_id.as_ref() == Some(reminder_id))
        else {
            return Outcome::new(None);
        };

        task.reminder_id = None;
        let id = task.id;
        debug!("Reminder {} delivered for task {}", reminder_id, id);

        let warnings = self.persist().await.into_iter().collect();
        Outcome::with_warnings(Some(id), warnings)
    }

    fn position(&self, id: Uuid) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    async fn cancel_reminder(
        &self,
        task_id: Uuid,
        reminder_id: &ReminderId,
    ) -> Option<SoftWarning> {
        match self.scheduler.cancel(reminder_id).await {
            Ok(()) => None,
            Err(e) => {
                warn!(
                    "Failed to cancel reminder {} for task {}: {}",
                    reminder_id, task_id, e
                );
                Some(SoftWarning::new(WarningKind::CancelFailed, Some(task_id), &e))
            }
        }
    }

    async fn persist(&self) -> Option<SoftWarning> {
        let written = match encode_tasks(&self.tasks) {
            Ok(blob) => self.storage.set(STORAGE_KEY, &blob).await,
            Err(e) => Err(e),
        };
        match written {
            Ok(()) => None,
            Err(e) => {
                warn!("Failed to persist {} tasks: {}", self.tasks.len(), e);
                Some(SoftWarning::new(WarningKind::StorageWrite, None, &e))
            }
        }
    }
}

impl std::fmt::Debug for TaskStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskStore")
            .field("tasks", &self.tasks.len())
            .field("filter", &self.filter)
            .field("selected_priority", &self.selected_priority)
            .field("pending_delete", &self.pending_delete)
            .field("editing", &self.editing)
            .finish()
    }
}
