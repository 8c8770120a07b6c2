use async_trait::async_trait;
use crate::types::{Story, StoryId};
use crate::Result;

#[async_trait]
pub trait StorySource: Send + Sync {
    /// Fetch the current top-story ids, in feed order
    async fn top_story_ids(&self) -> Result<Vec<StoryId>>;

    /// Fetch a single item
    async fn story(&self, id: StoryId) -> Result<Story>;
}
