// src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Configuration Error: {0}")]
    Config(String),
    #[error("Network Error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Serialization Error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Search API Error (status {status}): {body}")]
    Api { status: u16, body: String },
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = FeedError> = std::result::Result<T, E>;
