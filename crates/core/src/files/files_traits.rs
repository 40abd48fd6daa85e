use async_trait::async_trait;

use crate::errors::Result;

/// Trait for the remote object store holding expense receipt images.
///
/// The core only round-trips the returned URL string; what backs it is
/// the implementation's business.
#[async_trait]
pub trait FileStoreTrait: Send + Sync {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<String>;
    async fn delete(&self, url: &str) -> Result<()>;
}
