//! Task model definitions

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::priority::Priority;
use crate::reminder::ReminderId;
use crate::{Error, Result};

/// A task in the list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub text: String,
    pub completed: bool,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    /// Outstanding reminder, if one is still scheduled
    pub reminder_id: Option<ReminderId>,
}

impl Task {
    /// Create a new task, trimming and validating the text
    pub fn new(text: &str, priority: Priority) -> Result<Self> {
        let text = validate_text(text)?;
        Ok(Self {
            id: Uuid::new_v4(),
            text,
            completed: false,
            priority,
            created_at: Utc::now(),
            reminder_id: None,
        })
    }

    /// Set the reminder handle
    pub fn with_reminder(mut self, reminder_id: ReminderId) -> Self {
        self.reminder_id = Some(reminder_id);
        self
    }
}

/// Trim `text` and reject it when nothing is left
pub fn validate_text(text: &str) -> Result<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::validation("task text cannot be empty"));
    }
    Ok(trimmed.to_string())
}

/// Serialize the full list into the persisted blob
pub fn encode_tasks(tasks: &[Task]) -> Result<String> {
    Ok(serde_json::to_string(tasks)?)
}

/// Parse a persisted blob back into a list
///
/// A blob holding the same id twice is rejected.
pub fn decode_tasks(blob: &str) -> Result<Vec<Task>> {
    let tasks: Vec<Task> = serde_json::from_str(blob)?;

    let mut seen = HashSet::with_capacity(tasks.len());
    if let Some(dup) = tasks.iter().find(|t| !seen.insert(t.id)) {
        return Err(Error::Storage(format!("Duplicate task id {}", dup.id)));
    }
    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_task() {
        let task = Task::new("  Buy milk ", Priority::High).unwrap();
        assert_eq!(task.text, "Buy milk");
        assert_eq!(task.priority, Priority::High);
        assert!(!task.completed);
        assert!(task.reminder_id.is_none());
    }

    #[test]
    fn test_create_task_rejects_blank_text() {
        assert!(Task::new("", Priority::Low).unwrap_err().is_validation());
        assert!(Task::new(" \t\n", Priority::Low).unwrap_err().is_validation());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Task::new("a", Priority::Low).unwrap();
        let b = Task::new("a", Priority::Low).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_round_trip() {
        let tasks = vec![
            Task::new("Buy milk", Priority::High)
                .unwrap()
                .with_reminder(ReminderId::new("r-1")),
            Task {
                completed: true,
                ..Task::new("Walk dog", Priority::Low).unwrap()
            },
        ];

        let blob = encode_tasks(&tasks).unwrap();
        assert_eq!(decode_tasks(&blob).unwrap(), tasks);

        let empty = encode_tasks(&[]).unwrap();
        assert_eq!(empty, "[]");
        assert!(decode_tasks(&empty).unwrap().is_empty());
    }

    #[test]
    fn test_serialized_field_names() {
        let task = Task::new("Buy milk", Priority::Medium).unwrap();
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["priority"], "medium");
        assert_eq!(value["completed"], false);
        assert!(value["reminderId"].is_null());
        assert!(value["createdAt"].is_string());
    }

    #[test]
    fn test_decode_rejects_duplicate_ids() {
        let task = Task::new("Buy milk", Priority::High).unwrap();
        let blob = encode_tasks(&[task.clone(), task.clone()]).unwrap();

        match decode_tasks(&blob).unwrap_err() {
            Error::Storage(msg) => assert!(msg.contains(&task.id.to_string())),
            e => panic!("Expected Storage error, got: {:?}", e),
        }
    }

    #[test]
    fn test_decode_malformed() {
        assert!(decode_tasks("{not json").is_err());
        assert!(decode_tasks("{\"id\": 1}").is_err());
    }
}
