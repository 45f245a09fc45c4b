//! Error types for the core library

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Reminder error: {0}")]
    Reminder(String),

    #[error("Not supported in this environment: {0}")]
    Unsupported(String),
}

impl Error {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Which collaborator call degraded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    StorageRead,
    StorageWrite,
    ScheduleFailed,
    SchedulingUnsupported,
    CancelFailed,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::StorageRead => "could not load saved tasks",
            Self::StorageWrite => "could not save tasks",
            Self::ScheduleFailed => "could not schedule reminder",
            Self::SchedulingUnsupported => "reminders are not available",
            Self::CancelFailed => "could not cancel reminder",
        };
        f.write_str(label)
    }
}

/// A non-fatal failure of an external side effect.
///
/// The operation that produced it still completed against the in-memory list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftWarning {
    pub kind: WarningKind,
    pub task_id: Option<Uuid>,
    pub message: String,
}

impl SoftWarning {
    pub(crate) fn new(kind: WarningKind, task_id: Option<Uuid>, source: &Error) -> Self {
        let kind = match (kind, source) {
            (WarningKind::ScheduleFailed, Error::Unsupported(_)) => {
                WarningKind::SchedulingUnsupported
            }
            (kind, _) => kind,
        };
        Self {
            kind,
            task_id,
            message: source.to_string(),
        }
    }
}

impl fmt::Display for SoftWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}
