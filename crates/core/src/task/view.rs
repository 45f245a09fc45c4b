//! Derived list view: filter by priority, then order for display

use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use super::model::Task;
use crate::priority::Priority;
use crate::Error;

/// Priority filter selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Priority(Priority),
}

impl Filter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Priority(p) => task.priority == p,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Priority(p) => write!(f, "{}", p),
        }
    }
}

impl FromStr for Filter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Priority)
    }
}

/// Tasks to display for `filter`
///
/// Incomplete tasks come first, most urgent first; ties keep list order.
/// Completed tasks follow in list order.
pub fn visible_tasks(tasks: &[Task], filter: Filter) -> Vec<&Task> {
    let (mut open, done): (Vec<&Task>, Vec<&Task>) = tasks
        .iter()
        .filter(|t| filter.matches(t))
        .partition(|t| !t.completed);

    // sort_by_key is stable
    open.sort_by_key(|t| Reverse(t.priority.rank()));
    open.extend(done);
    open
}

/// Counts for the list header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl TaskStats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|t| t.completed).count();
        Self {
            total: tasks.len(),
            completed,
            pending: tasks.len() - completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(text: &str, priority: Priority, completed: bool) -> Task {
        Task {
            completed,
            ..Task::new(text, priority).unwrap()
        }
    }

    fn texts(view: &[&Task]) -> Vec<String> {
        view.iter().map(|t| t.text.clone()).collect()
    }

    #[test]
    fn test_filter_high_keeps_completed_last() {
        let tasks = vec![
            task("done high", Priority::High, true),
            task("medium", Priority::Medium, false),
            task("open high", Priority::High, false),
        ];

        let view = visible_tasks(&tasks, Filter::Priority(Priority::High));
        assert_eq!(texts(&view), vec!["open high", "done high"]);
    }

    #[test]
    fn test_all_sorted_by_rank() {
        let tasks = vec![
            task("low", Priority::Low, false),
            task("done", Priority::High, true),
            task("medium", Priority::Medium, false),
            task("high", Priority::High, false),
        ];

        let view = visible_tasks(&tasks, Filter::All);
        assert_eq!(texts(&view), vec!["high", "medium", "low", "done"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let tasks = vec![
            task("A", Priority::High, false),
            task("x", Priority::Low, false),
            task("B", Priority::High, false),
            task("done 1", Priority::Low, true),
            task("done 2", Priority::High, true),
        ];

        let view = visible_tasks(&tasks, Filter::All);
        assert_eq!(texts(&view), vec!["A", "B", "x", "done 1", "done 2"]);
    }

    #[test]
    fn test_empty_list() {
        assert!(visible_tasks(&[], Filter::All).is_empty());
    }

    #[test]
    fn test_parse_filter() {
        assert_eq!("all".parse::<Filter>().unwrap(), Filter::All);
        assert_eq!(
            "Low".parse::<Filter>().unwrap(),
            Filter::Priority(Priority::Low)
        );
        assert!("none".parse::<Filter>().is_err());
    }

    #[test]
    fn test_stats() {
        let tasks = vec![
            task("a", Priority::High, true),
            task("b", Priority::Low, false),
            task("c", Priority::Low, false),
        ];
        let stats = TaskStats::from_tasks(&tasks);
        assert_eq!(
            stats,
            TaskStats {
                total: 3,
                completed: 1,
                pending: 2
            }
        );
    }
}
