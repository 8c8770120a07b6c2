// Shared fixtures for the integration tests: an in-memory story feed and a
// throwaway HTTP server that answers with canned JSON.
#![allow(dead_code)]

use async_trait::async_trait;
use hn_core::{Error, Result, Story, StoryId, StorySource};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

#[derive(Default)]
pub struct FakeFeed {
    top: Mutex<Vec<StoryId>>,
    stories: Mutex<HashMap<StoryId, Story>>,
    broken: Mutex<Option<StoryId>>,
    item_fetches: AtomicUsize,
}

impl FakeFeed {
    pub fn new(top: &[StoryId]) -> Arc<Self> {
        let feed = Self::default();
        for &id in top {
            feed.add_link(id);
        }
        feed.set_top(top);
        Arc::new(feed)
    }

    pub fn set_top(&self, top: &[StoryId]) {
        *self.top.lock().unwrap() = top.to_vec();
    }

    pub fn add_link(&self, id: StoryId) {
        self.add_story(id, Story::new(format!("Story {}", id), format!("https://example.com/{}", id)));
    }

    pub fn add_story(&self, id: StoryId, story: Story) {
        self.stories.lock().unwrap().insert(id, story);
    }

    pub fn break_item(&self, id: StoryId) {
        *self.broken.lock().unwrap() = Some(id);
    }

    pub fn item_fetches(&self) -> usize {
        self.item_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StorySource for FakeFeed {
    async fn top_story_ids(&self) -> Result<Vec<StoryId>> {
        Ok(self.top.lock().unwrap().clone())
    }

    async fn story(&self, id: StoryId) -> Result<Story> {
        self.item_fetches.fetch_add(1, Ordering::SeqCst);
        if *self.broken.lock().unwrap() == Some(id) {
            let source = serde_json::from_str::<Story>("{").unwrap_err();
            return Err(Error::decode(format!("item/{}.json", id), source));
        }
        Ok(self.stories.lock().unwrap().get(&id).cloned().unwrap_or_default())
    }
}

/// Serves `routes` (path -> (status, body)) on a random local port until the
/// test runtime shuts down. Unknown paths get a 404.
pub async fn serve(routes: HashMap<String, (u16, String)>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let routes = Arc::new(routes);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let routes = routes.clone();
            tokio::spawn(async move {
                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => head.extend_from_slice(&buf[..n]),
                    }
                }
                let head = String::from_utf8_lossy(&head);
                let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();
                let (status, body) = routes
                    .get(&path)
                    .cloned()
                    .unwrap_or((404, "null".to_string()));
                let response = format!(
                    "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}
