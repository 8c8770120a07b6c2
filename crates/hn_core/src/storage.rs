use async_trait::async_trait;
use std::path::PathBuf;
use crate::Result;

#[async_trait]
pub trait StoryCache: Send + Sync {
    /// Read the whole cached story text
    async fn read_stories(&self) -> Result<Vec<u8>>;

    /// Replace the cached story text
    async fn write_stories(&self, payload: &str) -> Result<()>;

    /// Read the raw digest stored by the previous run
    async fn read_checksum(&self) -> Result<Vec<u8>>;

    /// Replace the stored digest
    async fn write_checksum(&self, digest: &[u8]) -> Result<()>;

    /// Remove the stored digest; a missing digest is not an error
    async fn remove_checksum(&self) -> Result<()>;

    /// Remove the cached story text; a missing file is not an error
    async fn remove_stories(&self) -> Result<()>;

    /// Where the cache lives, if it lives on disk
    fn location(&self) -> Option<PathBuf> {
        None
    }
}
