use hn_core::{Error, FormattedRecord, Result, StoryIdSet, StorySource};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::debug;

/// Fetches every story of a set concurrently, at most `concurrency` at a time.
///
/// All tasks are drained before anything is returned. The first failing task
/// aborts the others and its error is returned; no partial result is kept.
/// Records come back in completion order.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    concurrency: usize,
}

impl WorkerPool {
    /// `concurrency` comes from a validated [`FetchConfig`](crate::FetchConfig)
    /// and is at least 1.
    pub fn new(concurrency: usize) -> Self {
        Self { concurrency }
    }

    pub async fn run(&self, source: Arc<dyn StorySource>, ids: &StoryIdSet) -> Result<Vec<FormattedRecord>> {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = JoinSet::new();

        for id in ids.iter() {
            let source = source.clone();
            let semaphore = semaphore.clone();
            tasks.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| Error::Task(e.to_string()))?;
                let record = source.story(id).await?.into_record();
                if record.is_none() {
                    debug!("⏭️ Skipping item {} without title or url", id);
                }
                Ok::<_, Error>(record)
            });
        }

        let mut records = Vec::with_capacity(ids.len());
        while let Some(joined) = tasks.join_next().await {
            let outcome = joined.map_err(|e| Error::Task(e.to_string())).and_then(|r| r);
            match outcome {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {}
                Err(e) => {
                    debug!("Aborting remaining workers: {}", e);
                    tasks.abort_all();
                    return Err(e);
                }
            }
        }

        debug!("✨ Fetched {} of {} stories", records.len(), ids.len());
        Ok(records)
    }
}
