use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The server answered with an error envelope.
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("unauthorized")]
    Unauthorized,
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("cannot read image {path}: {source}")]
    Image { path: PathBuf, source: std::io::Error },
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Usage(String),
    #[error("log in first")]
    NotLoggedIn,
}

impl ConsoleError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }
}
