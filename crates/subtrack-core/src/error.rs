//! Error types for SubTrack

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Advisor error: {0}")]
    Advisor(String),
}

pub type Result<T> = std::result::Result<T, Error>;
