use async_trait::async_trait;
use hn_core::{Error, Result, StoryCache};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use crate::{StorageBackend, StorageConfig, StorageKind};

/// Story text and digest stored side by side as `topstories.txt` and
/// `topstories.sha256`.
///
/// Writes replace the whole file. Nothing is ever appended, so a reader sees
/// either the previous run's payload or the new one.
#[derive(Debug, Clone)]
pub struct FileStorage {
    config: StorageConfig,
}

impl FileStorage {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    async fn read(path: PathBuf) -> Result<Vec<u8>> {
        tokio::fs::read(&path).await.map_err(|e| Error::cache(path, e))
    }

    async fn write(&self, path: PathBuf, contents: &[u8]) -> Result<()> {
        ensure_dir(self.config.dir()).await?;
        tokio::fs::write(&path, contents)
            .await
            .map_err(|e| Error::cache(path, e))
    }

    async fn remove(path: PathBuf) -> Result<()> {
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::cache(path, e)),
        }
    }
}

async fn ensure_dir(dir: &Path) -> Result<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| Error::cache(dir, e))
}

#[async_trait]
impl StorageBackend for FileStorage {
    fn kind() -> StorageKind {
        StorageKind::File
    }

    async fn open(config: &StorageConfig) -> Result<Self> where Self: Sized {
        Ok(Self::new(config.clone()))
    }
}

#[async_trait]
impl StoryCache for FileStorage {
    async fn read_stories(&self) -> Result<Vec<u8>> {
        Self::read(self.config.stories_path()).await
    }

    async fn write_stories(&self, payload: &str) -> Result<()> {
        self.write(self.config.stories_path(), payload.as_bytes()).await
    }

    async fn read_checksum(&self) -> Result<Vec<u8>> {
        Self::read(self.config.checksum_path()).await
    }

    async fn write_checksum(&self, digest: &[u8]) -> Result<()> {
        self.write(self.config.checksum_path(), digest).await
    }

    async fn remove_checksum(&self) -> Result<()> {
        Self::remove(self.config.checksum_path()).await
    }

    async fn remove_stories(&self) -> Result<()> {
        Self::remove(self.config.stories_path()).await
    }

    fn location(&self) -> Option<PathBuf> {
        Some(self.config.dir().to_path_buf())
    }
}
