use hn_core::{Error, Result};
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_BASE: &str = "https://hacker-news.firebaseio.com/v0/";
pub const DEFAULT_CONCURRENCY: usize = 16;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(60);

/// Knobs for talking to the API and bounding a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    api_base: Url,
    concurrency: usize,
    request_timeout: Duration,
    deadline: Duration,
}

impl FetchConfig {
    pub fn new(api_base: &str, concurrency: usize, request_timeout: Duration, deadline: Duration) -> Result<Self> {
        if concurrency == 0 {
            return Err(Error::Config("concurrency must be at least 1".to_string()));
        }
        Ok(Self {
            api_base: parse_base(api_base)?,
            concurrency,
            request_timeout,
            deadline,
        })
    }

    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Maximum number of item requests in flight.
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Upper bound on the network part of a run.
    pub fn deadline(&self) -> Duration {
        self.deadline
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            api_base: Url::parse(DEFAULT_API_BASE).expect("default API base is a valid URL"),
            concurrency: DEFAULT_CONCURRENCY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            deadline: DEFAULT_DEADLINE,
        }
    }
}

// Endpoints are joined relative to the base, which only works when the base
// path ends with a slash.
fn parse_base(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw).map_err(|e| Error::Config(format!("invalid API base {}: {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(Error::Config(format!("invalid API base {}", raw)));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
