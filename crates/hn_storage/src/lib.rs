use async_trait::async_trait;
use hn_core::{Error, Result, StoryCache};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub mod backends;
pub mod checksum;

pub use backends::*;
pub use checksum::{checksum, ChangeDetector, Decision};

pub const STORIES_FILE: &str = "topstories.txt";
pub const CHECKSUM_FILE: &str = "topstories.sha256";

#[async_trait]
pub trait StorageBackend: StoryCache {
    fn kind() -> StorageKind;
    async fn open(config: &StorageConfig) -> Result<Self> where Self: Sized;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum StorageKind {
    /// Text and digest files in the cache directory
    #[default]
    File,
    /// Process-local; every run regenerates
    Memory,
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageKind::File => f.write_str("file"),
            StorageKind::Memory => f.write_str("memory"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    dir: PathBuf,
}

impl StorageConfig {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Cache files live directly in the user's home directory unless told otherwise.
    pub fn from_home() -> Result<Self> {
        dirs_next::home_dir()
            .map(Self::new)
            .ok_or_else(|| Error::Config("could not resolve the home directory".to_string()))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn stories_path(&self) -> PathBuf {
        self.dir.join(STORIES_FILE)
    }

    pub fn checksum_path(&self) -> PathBuf {
        self.dir.join(CHECKSUM_FILE)
    }
}

async fn open<T: StorageBackend + 'static>(config: &StorageConfig) -> Result<Arc<dyn StoryCache>> {
    let storage = T::open(config).await?;
    tracing::debug!("💾 Storage backend ready (using {})", T::kind());
    Ok(Arc::new(storage))
}

pub async fn create_storage(kind: StorageKind, config: &StorageConfig) -> Result<Arc<dyn StoryCache>> {
    match kind {
        StorageKind::File => open::<FileStorage>(config).await,
        StorageKind::Memory => open::<MemoryStorage>(config).await,
    }
}
