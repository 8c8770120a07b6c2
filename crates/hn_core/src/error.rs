use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url}: unexpected status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("{url}: failed to decode response: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: {source}", .path.display())]
    Cache {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Worker task failed: {0}")]
    Task(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Process exit code reported by the `hn` binary for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Transport { .. } | Error::Status { .. } => 2,
            Error::Decode { .. } => 3,
            Error::Timeout(_) => 4,
            Error::Io(_) | Error::Cache { .. } => 5,
            Error::Config(_) => 64,
            Error::Task(_) => 1,
        }
    }

    pub fn decode(url: impl Into<String>, source: serde_json::Error) -> Self {
        Error::Decode {
            url: url.into(),
            source,
        }
    }

    pub fn cache(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Cache {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let decode = Error::decode(
            "https://example.com/item/1.json",
            serde_json::from_str::<Vec<u64>>("{").unwrap_err(),
        );
        assert_eq!(decode.exit_code(), 3);
        assert_eq!(Error::Timeout("deadline".into()).exit_code(), 4);
        assert_eq!(Error::Config("concurrency".into()).exit_code(), 64);

        let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(Error::cache("/tmp/topstories.txt", missing).exit_code(), 5);
    }

    #[test]
    fn test_messages_name_the_target() {
        let err = Error::decode(
            "https://example.com/topstories.json",
            serde_json::from_str::<Vec<u64>>("nope").unwrap_err(),
        );
        assert!(err.to_string().starts_with("https://example.com/topstories.json:"));

        let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::cache("/tmp/topstories.sha256", missing);
        assert_eq!(err.to_string(), "/tmp/topstories.sha256: gone");
    }
}
