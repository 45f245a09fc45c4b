//! Core library for the task list
//!
//! This crate contains the task-management logic, including:
//! - The task model and its priority tiers
//! - The derived, filtered and sorted list view
//! - The task store driving persistence and reminders
//! - Key-value storage and reminder scheduler implementations

pub mod error;
pub mod priority;
pub mod reminder;
pub mod storage;
pub mod store;
pub mod task;

pub use error::{Error, SoftWarning, WarningKind};
pub use priority::{Priority, PriorityConfig};
pub use store::{Added, Outcome, TaskStore, STORAGE_KEY};
pub type Result<T> = std::result::Result<T, Error>;
