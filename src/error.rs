use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LexiscanError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Could not open text source '{}': {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type LsResult<T> = Result<T, LexiscanError>;
