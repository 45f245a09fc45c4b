//! Key-value store trait
//!
//! Defines the interface for whole-blob persistence.

use async_trait::async_trait;

use crate::Result;

/// Blob storage addressed by string keys
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the blob stored under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the blob stored under `key`
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}
