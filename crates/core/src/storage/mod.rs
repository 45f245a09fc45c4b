//! Key-value persistence
//!
//! The store reads and writes the whole task list as one blob under a fixed key.

mod file_store;
mod memory;
mod provider;

pub use file_store::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;
pub use provider::KeyValueStore;
