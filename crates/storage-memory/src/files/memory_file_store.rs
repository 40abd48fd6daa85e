use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use hearth_core::errors::{Error, StoreError};
use hearth_core::files::FileStoreTrait;
use hearth_core::Result;

/// In-memory object store handing out `mem://` URLs.
///
/// Uploads are keyed by a fresh UUID so the same file name can be
/// uploaded more than once without clobbering earlier receipts.
pub struct MemoryFileStore {
    objects: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        MemoryFileStore {
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Bytes stored under `url`, if any. Read-side helper for tests and
    /// future export tooling.
    pub fn get(&self, url: &str) -> Result<Option<Vec<u8>>> {
        let objects = self
            .objects
            .read()
            .map_err(|e| StoreError::Internal(format!("Object store lock poisoned: {e}")))?;
        Ok(objects.get(url).cloned())
    }
}

impl Default for MemoryFileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FileStoreTrait for MemoryFileStore {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<String> {
        let url = format!("mem://receipts/{}/{file_name}", Uuid::new_v4());
        self.objects
            .write()
            .map_err(|e| StoreError::Internal(format!("Object store lock poisoned: {e}")))?
            .insert(url.clone(), bytes);
        Ok(url)
    }

    async fn delete(&self, url: &str) -> Result<()> {
        let removed = self
            .objects
            .write()
            .map_err(|e| StoreError::Internal(format!("Object store lock poisoned: {e}")))?
            .remove(url);
        if removed.is_none() {
            return Err(Error::FileStore(format!("No object stored at {url}")));
        }
        Ok(())
    }
}
