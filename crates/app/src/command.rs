//! Line commands understood by the terminal driver

use tasklist_core::task::Filter;
use tasklist_core::Priority;
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  add [high|medium|low] <text>   add a task (default priority: the selected one)
  toggle <n>                     mark row n done / not done
  delete <n>                     ask to delete row n, then `yes` or `no`
  edit <n>                       start editing row n, then `save <text>` or `cancel`
  filter <all|high|medium|low>   show only one priority
  priority <high|medium|low>     select the default priority for `add`
  list                           show the list
  help                           show this help
  quit                           exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add {
        priority: Option<Priority>,
        text: String,
    },
    Toggle(usize),
    Delete(usize),
    ConfirmDelete,
    CancelDelete,
    Edit(usize),
    Save(String),
    CancelEdit,
    Filter(Filter),
    SelectPriority(Priority),
    List,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0} (type `help`)")]
    Unknown(String),

    #[error("`{command}` expects a row number, got {got:?}")]
    BadRow { command: &'static str, got: String },

    #[error("{0}")]
    BadArgument(String),
}

impl Command {
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "add" | "a" => parse_add(rest),
            "toggle" | "t" => Self::Toggle(parse_row("toggle", rest)?),
            "delete" | "d" => Self::Delete(parse_row("delete", rest)?),
            "yes" | "y" => Self::ConfirmDelete,
            "no" | "n" => Self::CancelDelete,
            "edit" | "e" => Self::Edit(parse_row("edit", rest)?),
            "save" => Self::Save(rest.to_string()),
            "cancel" => Self::CancelEdit,
            "filter" | "f" => Self::Filter(
                rest.parse()
                    .map_err(|e: tasklist_core::Error| CommandError::BadArgument(e.to_string()))?,
            ),
            "priority" | "p" => Self::SelectPriority(
                rest.parse()
                    .map_err(|e: tasklist_core::Error| CommandError::BadArgument(e.to_string()))?,
            ),
            "list" | "ls" => Self::List,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn parse_add(rest: &str) -> Command {
    if let Some((first, text)) = rest.split_once(char::is_whitespace) {
        if let Ok(priority) = first.parse::<Priority>() {
            return Command::Add {
                priority: Some(priority),
                text: text.to_string(),
            };
        }
    } else if let Ok(priority) = rest.parse::<Priority>() {
        return Command::Add {
            priority: Some(priority),
            text: String::new(),
        };
    }
    Command::Add {
        priority: None,
        text: rest.to_string(),
    }
}

/// 1-based row number
fn parse_row(command: &'static str, raw: &str) -> Result<usize, CommandError> {
    match raw.parse::<usize>() {
        Ok(row) if row > 0 => Ok(row),
        _ => Err(CommandError::BadRow {
            command,
            got: raw.to_string(),
        }),
    }
}
