pub mod cli;
pub mod client;
pub mod config;
pub mod logging;
pub mod manager;
pub mod pool;

pub use cli::{handle_command, StoryArgs, StoryCommands};
pub use client::HackerNewsClient;
pub use config::FetchConfig;
pub use manager::{CacheStatus, RunPath, RunReport, StoryManager};
pub use pool::WorkerPool;
