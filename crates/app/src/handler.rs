//! Applies commands to the store and renders the result as text lines

use tasklist_core::reminder::DeliveredReminder;
use tasklist_core::task::Task;
use tasklist_core::{Outcome, TaskStore};
use uuid::Uuid;

use crate::command::{Command, HELP};

/// Text to print after a command
#[derive(Debug, Default)]
pub struct Response {
    pub lines: Vec<String>,
    pub quit: bool,
}

impl Response {
    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn warnings<T>(&mut self, outcome: &Outcome<T>) {
        for warning in &outcome.warnings {
            self.push(format!("warning: {}", warning));
        }
    }
}

pub async fn dispatch(store: &mut TaskStore, command: Command) -> Response {
    let mut response = Response::default();
    let mut show_list = true;

    match command {
        Command::Add { priority, text } => match store.add(&text, priority).await {
            Ok(outcome) => {
                response.warnings(&outcome);
                if let Some(confirmation) = &outcome.value.confirmation {
                    response.push(confirmation.clone());
                } else {
                    response.push("Task added.");
                }
            }
            Err(e) => response.push(format!("error: {}", e)),
        },
        Command::Toggle(row) => match row_id(store, row) {
            Some(id) => {
                let outcome = store.toggle(id).await;
                response.warnings(&outcome);
            }
            None => response.push(no_such_row(row)),
        },
        Command::Delete(row) => match row_id(store, row) {
            Some(id) if store.request_delete(id) => {
                let text = store.get(id).map(|t| t.text.clone()).unwrap_or_default();
                response.push(format!("Delete \"{}\"? (yes/no)", text));
                show_list = false;
            }
            _ => response.push(no_such_row(row)),
        },
        Command::ConfirmDelete => {
            let outcome = store.confirm_delete().await;
            response.warnings(&outcome);
            match &outcome.value {
                Some(task) => response.push(format!("Deleted \"{}\".", task.text)),
                None => response.push("Nothing to delete."),
            }
        }
        Command::CancelDelete => {
            if store.cancel_delete().is_some() {
                response.push("Delete cancelled.");
            }
        }
        Command::Edit(row) => {
            let editing = match row_id(store, row) {
                Some(id) => store.start_edit(id).map(|t| t.text.clone()),
                None => None,
            };
            match editing {
                Some(text) => {
                    response.push(format!("Editing \"{}\". Use `save <text>` or `cancel`.", text));
                    show_list = false;
                }
                None => response.push(no_such_row(row)),
            }
        }
        Command::Save(text) => match store.save_edit(&text).await {
            Ok(outcome) => {
                response.warnings(&outcome);
                if outcome.value.is_none() {
                    response.push("Not editing anything.");
                }
            }
            Err(e) => {
                response.push(format!("error: {}", e));
                show_list = false;
            }
        },
        Command::CancelEdit => store.cancel_edit(),
        Command::Filter(filter) => store.set_filter(filter),
        Command::SelectPriority(priority) => {
            store.set_priority(priority);
            let config = priority.config();
            response.push(format!(
                "New tasks default to {} priority [{} {}] (reminder after {}s).",
                config.label, config.icon, config.color, config.reminder_delay_secs
            ));
        }
        Command::List => {}
        Command::Help => {
            response.push(HELP);
            show_list = false;
        }
        Command::Quit => {
            response.quit = true;
            show_list = false;
        }
    }

    if show_list {
        response.lines.extend(render(store));
    }
    response
}

/// Acknowledge a fired reminder and describe it
pub async fn deliver(store: &mut TaskStore, delivered: DeliveredReminder) -> Response {
    let mut response = Response::default();
    response.push(format!(
        "*** {}: {}",
        delivered.payload.title, delivered.payload.body
    ));
    let outcome = store.reminder_delivered(&delivered.reminder_id).await;
    response.warnings(&outcome);
    response
}

/// Header plus one line per visible task
pub fn render(store: &TaskStore) -> Vec<String> {
    let stats = store.stats();
    let mut lines = vec![format!(
        "{} pending, {} done | filter: {} | new: {}",
        stats.pending,
        stats.completed,
        store.filter(),
        store.selected_priority()
    )];

    let visible = store.visible_tasks();
    if visible.is_empty() {
        lines.push("  (no tasks)".to_string());
    }
    lines.extend(
        visible
            .iter()
            .enumerate()
            .map(|(i, task)| render_task(i + 1, task)),
    );
    lines
}

fn render_task(row: usize, task: &Task) -> String {
    let check = if task.completed { "x" } else { " " };
    let reminder = if task.reminder_id.is_some() { " (reminder pending)" } else { "" };
    format!(
        "{:>3}. [{}] {:<6} {}{}",
        row,
        check,
        task.priority.label(),
        task.text,
        reminder
    )
}

fn row_id(store: &TaskStore, row: usize) -> Option<Uuid> {
    let index = row.checked_sub(1)?;
    store.visible_tasks().get(index).map(|t| t.id)
}

fn no_such_row(row: usize) -> String {
    format!("No task in row {}.", row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tasklist_core::reminder::{DisabledReminderScheduler, TokioReminderScheduler};
    use tasklist_core::storage::MemoryKeyValueStore;
    use tasklist_core::Priority;

    async fn create_test_store() -> TaskStore {
        TaskStore::open(
            Arc::new(MemoryKeyValueStore::new()),
            Arc::new(DisabledReminderScheduler),
        )
        .await
        .value
    }

    async fn run(store: &mut TaskStore, line: &str) -> Response {
        let command = Command::parse(line).unwrap().unwrap();
        dispatch(store, command).await
    }

    #[tokio::test]
    async fn test_add_and_list() {
        let mut store = create_test_store().await;

        let response = run(&mut store, "add high Buy milk").await;
        assert!(response.lines[0].starts_with("warning: reminders are not available"));
        assert_eq!(response.lines[1], "Task added.");
        assert_eq!(response.lines[2], "1 pending, 0 done | filter: all | new: medium");
        assert_eq!(response.lines[3], "  1. [ ] High   Buy milk");
    }

    #[tokio::test]
    async fn test_add_blank_is_rejected() {
        let mut store = create_test_store().await;
        let response = run(&mut store, "add high").await;
        assert!(response.lines[0].starts_with("error: Validation error"));
        assert!(store.tasks().is_empty());
    }

    #[tokio::test]
    async fn test_rows_follow_view_order() {
        let mut store = create_test_store().await;
        run(&mut store, "add low Walk dog").await;
        run(&mut store, "add high Buy milk").await;
        run(&mut store, "add medium Call mom").await;

        run(&mut store, "toggle 1").await;
        let done = store.tasks().iter().find(|t| t.completed).unwrap();
        assert_eq!(done.text, "Buy milk");

        let lines = render(&store);
        assert_eq!(lines[1], "  1. [ ] Medium Call mom");
        assert_eq!(lines[3], "  3. [x] High   Buy milk");
    }

    #[tokio::test]
    async fn test_delete_flow() {
        let mut store = create_test_store().await;
        run(&mut store, "add Buy milk").await;

        let response = run(&mut store, "delete 1").await;
        assert_eq!(response.lines, vec!["Delete \"Buy milk\"? (yes/no)"]);

        run(&mut store, "no").await;
        assert_eq!(store.tasks().len(), 1);

        run(&mut store, "delete 1").await;
        let response = run(&mut store, "yes").await;
        assert_eq!(response.lines[0], "Deleted \"Buy milk\".");
        assert!(store.tasks().is_empty());

        let response = run(&mut store, "delete 4").await;
        assert_eq!(response.lines[0], "No task in row 4.");
    }

    #[tokio::test]
    async fn test_edit_flow() {
        let mut store = create_test_store().await;
        run(&mut store, "add Buy milk").await;

        run(&mut store, "edit 1").await;
        let response = run(&mut store, "save   ").await;
        assert!(response.lines[0].starts_with("error:"));
        assert!(store.editing().is_some());

        run(&mut store, "save Buy oat milk").await;
        assert_eq!(store.tasks()[0].text, "Buy oat milk");
        assert!(store.editing().is_none());
    }

    #[tokio::test]
    async fn test_filter_and_priority() {
        let mut store = create_test_store().await;
        run(&mut store, "priority high").await;
        run(&mut store, "add Buy milk").await;
        run(&mut store, "add low Walk dog").await;
        assert_eq!(store.selected_priority(), Priority::High);

        let response = run(&mut store, "priority low").await;
        assert_eq!(
            response.lines[0],
            "New tasks default to Low priority [arrow-down-circle #6BCB77] (reminder after 120s)."
        );

        let response = run(&mut store, "filter low").await;
        assert_eq!(response.lines.len(), 2);
        assert!(response.lines[1].ends_with("Walk dog"));
    }

    #[tokio::test]
    async fn test_deliver_clears_reminder() {
        let (scheduler, mut rx) = TokioReminderScheduler::new();
        let mut store = TaskStore::open(Arc::new(MemoryKeyValueStore::new()), Arc::new(scheduler))
            .await
            .value;
        store.add("Buy milk", Some(Priority::High)).await.unwrap();
        assert!(render(&store)[1].ends_with("(reminder pending)"));

        // The real delay is 30s; simulate the scheduler firing now.
        let delivered = DeliveredReminder {
            reminder_id: store.tasks()[0].reminder_id.clone().unwrap(),
            payload: tasklist_core::reminder::ReminderPayload {
                title: "Task reminder (High priority)".to_string(),
                body: "Buy milk".to_string(),
                correlation_id: store.tasks()[0].id,
            },
        };
        let response = deliver(&mut store, delivered).await;
        assert_eq!(response.lines[0], "*** Task reminder (High priority): Buy milk");
        assert!(store.tasks()[0].reminder_id.is_none());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_quit() {
        let mut store = create_test_store().await;
        let response = run(&mut store, "quit").await;
        assert!(response.quit);
        assert!(response.lines.is_empty());
    }
}
