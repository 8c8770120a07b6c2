use hn_core::{Error, FormattedRecord, Result, StoryCache, StoryIdSet, StorySource};
use hn_storage::{ChangeDetector, Decision};
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{error, info, warn};
use crate::config::FetchConfig;
use crate::pool::WorkerPool;

// Stand-in for deadlines too far out to add to `Instant::now()`.
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPath {
    /// Id set unchanged and cached text readable
    Fast,
    /// Everything fetched again
    Slow,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub path: RunPath,
    /// Text to show the user, identical to what is (or was) cached.
    pub output: Vec<u8>,
    /// Records fetched on the slow path; unknown on the fast path.
    pub story_count: Option<usize>,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn summary(&self) -> String {
        // Sub-millisecond precision is noise here.
        let elapsed = humantime::format_duration(Duration::from_millis(self.elapsed.as_millis() as u64));
        match self.path {
            RunPath::Fast => format!("Cache up to date, Time elapsed: {}", elapsed),
            RunPath::Slow => format!("Downloaded stories from HackerNews, Time elapsed: {}", elapsed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStatus {
    pub location: Option<PathBuf>,
    pub cached_bytes: Option<usize>,
    pub checksum: Option<String>,
}

pub struct StoryManager {
    source: Arc<dyn StorySource>,
    cache: Arc<dyn StoryCache>,
    pool: WorkerPool,
    deadline: Duration,
}

impl StoryManager {
    pub fn new(source: Arc<dyn StorySource>, cache: Arc<dyn StoryCache>, config: &FetchConfig) -> Self {
        Self {
            source,
            cache,
            pool: WorkerPool::new(config.concurrency()),
            deadline: config.deadline(),
        }
    }

    /// Shows the top stories, from cache when the id set has not changed.
    pub async fn run(&self) -> Result<RunReport> {
        let start = Instant::now();
        let deadline = start
            .checked_add(self.deadline)
            .unwrap_or_else(|| start + FAR_FUTURE);

        let ids = StoryIdSet::new(self.within(deadline, self.source.top_story_ids()).await?);
        info!("📰 {} top stories", ids.len());

        if ChangeDetector::new(self.cache.as_ref()).detect(&ids).await == Decision::Reuse {
            match self.cache.read_stories().await {
                Ok(output) => {
                    info!("💾 Serving stories from cache");
                    return Ok(RunReport {
                        path: RunPath::Fast,
                        output,
                        story_count: None,
                        elapsed: start.elapsed(),
                    });
                }
                Err(e) => warn!("⚠️ Cached stories unreadable, fetching again: {}", e),
            }
        }

        let records = match self.within(deadline, self.pool.run(self.source.clone(), &ids)).await {
            Ok(records) => records,
            Err(e) => {
                // The new checksum is already on disk; without this the next
                // run would serve the stale text.
                self.invalidate().await;
                return Err(e);
            }
        };

        let payload = FormattedRecord::join(&records);
        if let Err(e) = self.cache.write_stories(&payload).await {
            error!("❌ Failed to save stories to cache: {}", e);
            self.invalidate().await;
        }

        info!("✨ Downloaded {} stories", records.len());
        Ok(RunReport {
            path: RunPath::Slow,
            output: payload.into_bytes(),
            story_count: Some(records.len()),
            elapsed: start.elapsed(),
        })
    }

    pub async fn status(&self) -> CacheStatus {
        CacheStatus {
            location: self.cache.location(),
            cached_bytes: self.cache.read_stories().await.ok().map(|s| s.len()),
            checksum: self.cache.read_checksum().await.ok().map(hex::encode),
        }
    }

    pub async fn clear(&self) -> Result<()> {
        self.cache.remove_checksum().await?;
        self.cache.remove_stories().await?;
        info!("🧹 Cache cleared");
        Ok(())
    }

    async fn invalidate(&self) {
        if let Err(e) = self.cache.remove_checksum().await {
            warn!("⚠️ Failed to invalidate checksum: {}", e);
        }
    }

    async fn within<T>(&self, deadline: Instant, work: impl Future<Output = Result<T>>) -> Result<T> {
        tokio::time::timeout_at(deadline, work).await.map_err(|_| {
            Error::Timeout(format!(
                "run exceeded its {} deadline",
                humantime::format_duration(self.deadline)
            ))
        })?
    }
}
