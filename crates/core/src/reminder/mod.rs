//! Reminder scheduling
//!
//! The store only needs "schedule after a delay" and "cancel by handle";
//! delivery itself belongs to the scheduler implementation.

mod disabled;
mod scheduler;
mod timer;

pub use disabled::DisabledReminderScheduler;
pub use scheduler::*;
pub use timer::TokioReminderScheduler;
