use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading an episode list
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Failed to fetch feed from {url}: {source}")]
    FetchFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to read feed file {path}: {source}")]
    FileReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse RSS feed: {0}")]
    ParseFailed(#[from] rss::Error),

    #[error("Failed to parse episode list: {0}")]
    JsonParseFailed(#[from] serde_json::Error),

    #[error("Invalid feed URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Episode '{title}' has no enclosure (audio file)")]
    MissingEnclosure { title: String },
}

/// Errors reported by the playback store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlayerError {
    #[error("Episode index {index} is out of range for a playlist of {len} episodes")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Errors produced while reading an interactive command line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    #[error("Unknown command '{0}' (type 'help' for a list)")]
    UnknownCommand(String),

    #[error("'{command}' expects an episode number")]
    MissingArgument { command: String },

    #[error("'{value}' is not a valid episode number")]
    InvalidEpisodeNumber { value: String },

    #[error("Episode {number} does not exist ({available} loaded)")]
    NoSuchEpisode { number: usize, available: usize },
}
