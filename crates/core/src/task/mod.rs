//! Task module
//!
//! Task entity, its persisted form and the derived list view.

mod model;
mod view;

pub use model::*;
pub use view::*;
