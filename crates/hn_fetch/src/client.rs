use async_trait::async_trait;
use hn_core::{Error, Result, Story, StoryId, StorySource};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;
use crate::config::FetchConfig;

const USER_AGENT: &str = concat!("hn/", env!("CARGO_PKG_VERSION"));

/// Client for the Hacker News Firebase API.
#[derive(Debug, Clone)]
pub struct HackerNewsClient {
    client: Client,
    base: Url,
}

impl HackerNewsClient {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base: config.api_base().clone(),
        })
    }

    pub fn top_stories_url(&self) -> Result<Url> {
        self.endpoint("topstories.json")
    }

    pub fn item_url(&self, id: StoryId) -> Result<Url> {
        self.endpoint(&format!("item/{}.json", id))
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| Error::Config(format!("invalid endpoint {}: {}", path, e)))
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let target = url.to_string();
        debug!("GET {}", target);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| Error::Transport { url: target.clone(), source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status { url: target, status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| Error::Transport { url: target.clone(), source })?;
        decode(&target, &body)
    }
}

/// Decodes a response body, naming `url` on failure.
pub fn decode<T: DeserializeOwned>(url: &str, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| Error::decode(url, e))
}

#[async_trait]
impl StorySource for HackerNewsClient {
    async fn top_story_ids(&self) -> Result<Vec<StoryId>> {
        self.get(self.top_stories_url()?).await
    }

    async fn story(&self, id: StoryId) -> Result<Story> {
        // Deleted or unknown items come back as `null`.
        let story: Option<Story> = self.get(self.item_url(id)?).await?;
        Ok(story.unwrap_or_default())
    }
}
