use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("SLACK_API_TOKEN environment variable not set")]
    MissingToken,

    #[error("Slack authentication failed: {0}")]
    Auth(String),

    #[error("Slack API error: {0}")]
    SlackApi(String),

    #[error("invalid message timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("invalid cutoff year: {0}")]
    InvalidCutoffYear(i32),

    #[error("failed to read file at {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to remove file at {path}: {source}")]
    RemoveFile {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write file at {path}: {source}")]
    WriteFile {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("TOML parse error: {0}")]
    TomlParse(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
