use anyhow::Context;
use clap::Parser;
use hn_fetch::config::{DEFAULT_API_BASE, DEFAULT_CONCURRENCY};
use hn_fetch::logging::{init_logging, level_for};
use hn_fetch::{handle_command, FetchConfig, HackerNewsClient, StoryArgs, StoryManager};
use hn_storage::{StorageConfig, StorageKind};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HumanDuration(Duration);

/// A bare number is seconds; anything else goes through `humantime`.
impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            return s
                .parse::<u64>()
                .map(|secs| HumanDuration(Duration::from_secs(secs)))
                .map_err(|e| format!("Invalid number of seconds {:?}: {}", s, e));
        }
        humantime::parse_duration(s)
            .map(HumanDuration)
            .map_err(|e| e.to_string())
    }
}

#[derive(Parser, Debug)]
#[command(name = "hn", author, version, about = "Print the Hacker News top stories, cached between runs", long_about = None)]
pub struct Cli {
    /// Where to keep the story cache
    #[arg(long, global = true, env = "HN_STORAGE", value_enum, default_value_t = StorageKind::File)]
    storage: StorageKind,
    /// Directory for topstories.txt and topstories.sha256 [default: home directory]
    #[arg(long, global = true, env = "HN_CACHE_DIR")]
    cache_dir: Option<PathBuf>,
    /// Base URL of the Hacker News API
    #[arg(long, global = true, env = "HN_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,
    /// Maximum number of stories fetched at once
    #[arg(long, global = true, env = "HN_CONCURRENCY", default_value_t = DEFAULT_CONCURRENCY)]
    concurrency: usize,
    /// Timeout for each HTTP request (e.g. 500ms, 10s, 1m)
    #[arg(long, global = true, env = "HN_TIMEOUT", default_value = "10s")]
    timeout: HumanDuration,
    /// Upper bound for fetching everything (e.g. 60s, 2m)
    #[arg(long, global = true, env = "HN_DEADLINE", default_value = "60s")]
    deadline: HumanDuration,
    /// More logging; repeat for trace output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    #[command(flatten)]
    stories: StoryArgs,
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let storage_config = match cli.cache_dir {
        Some(dir) => StorageConfig::new(dir),
        None => StorageConfig::from_home()?,
    };
    let storage = hn_storage::create_storage(cli.storage, &storage_config).await?;
    debug!("💾 Cache directory: {}", storage_config.dir().display());

    let fetch_config = FetchConfig::new(&cli.api_base, cli.concurrency, cli.timeout.0, cli.deadline.0)?;
    let client = HackerNewsClient::new(&fetch_config)?;
    let manager = StoryManager::new(Arc::new(client), storage, &fetch_config);

    handle_command(cli.stories, &manager, &mut std::io::stdout())
        .await
        .context("command failed")
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(level_for(cli.verbose, cli.quiet));

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            let code = e
                .downcast_ref::<hn_core::Error>()
                .map(hn_core::Error::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}
