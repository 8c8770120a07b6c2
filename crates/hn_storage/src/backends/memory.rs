use async_trait::async_trait;
use hn_core::{Error, Result, StoryCache};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use crate::{StorageBackend, StorageConfig, StorageKind, CHECKSUM_FILE, STORIES_FILE};

#[derive(Debug, Default)]
pub struct MemoryStore {
    stories: Option<Vec<u8>>,
    checksum: Option<Vec<u8>>,
}

fn missing(name: &str) -> Error {
    Error::cache(
        PathBuf::from(format!("memory://{}", name)),
        io::Error::new(io::ErrorKind::NotFound, "nothing stored"),
    )
}

impl MemoryStore {
    pub fn read_stories(&self) -> Result<Vec<u8>> {
        self.stories.clone().ok_or_else(|| missing(STORIES_FILE))
    }

    pub fn read_checksum(&self) -> Result<Vec<u8>> {
        self.checksum.clone().ok_or_else(|| missing(CHECKSUM_FILE))
    }
}

/// Cache that lives as long as the process. Clones share the same store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    store: Arc<RwLock<MemoryStore>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageBackend for MemoryStorage {
    fn kind() -> StorageKind {
        StorageKind::Memory
    }

    async fn open(_config: &StorageConfig) -> Result<Self> where Self: Sized {
        Ok(Self::new())
    }
}

#[async_trait]
impl StoryCache for MemoryStorage {
    async fn read_stories(&self) -> Result<Vec<u8>> {
        self.store.read().await.read_stories()
    }

    async fn write_stories(&self, payload: &str) -> Result<()> {
        self.store.write().await.stories = Some(payload.as_bytes().to_vec());
        Ok(())
    }

    async fn read_checksum(&self) -> Result<Vec<u8>> {
        self.store.read().await.read_checksum()
    }

    async fn write_checksum(&self, digest: &[u8]) -> Result<()> {
        self.store.write().await.checksum = Some(digest.to_vec());
        Ok(())
    }

    async fn remove_checksum(&self) -> Result<()> {
        self.store.write().await.checksum = None;
        Ok(())
    }

    async fn remove_stories(&self) -> Result<()> {
        self.store.write().await.stories = None;
        Ok(())
    }
}
