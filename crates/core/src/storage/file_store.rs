//! File-based key-value storage implementation
//!
//! Stores each key as a JSON file inside a data directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::provider::KeyValueStore;
use crate::{Error, Result};

/// File-based key-value store
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    /// Directory holding one file per key
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Create a new FileKeyValueStore
    ///
    /// The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(Error::Storage(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;

        // Ensure parent directory exists
        tokio::fs::create_dir_all(&self.dir).await?;

        tokio::fs::write(&path, value).await?;
        debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}
