//! Error types for the feed
//!
//! Most failures in the capture path are logged and swallowed; `FeedError`
//! is what crosses module boundaries before that happens.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Configuration error: {0}")] Config(String),

    #[error("Store error: {0}")] Store(String),

    #[error("Telegram error: {0}")] Telegram(String),

    #[error("Serialization error: {0}")] Serialization(#[from] serde_json::Error),

    #[error("Config file error: {0}")] Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")] Io(#[from] std::io::Error),
}

pub type FeedResult<T> = Result<T, FeedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: FeedError = io.into();
        assert!(matches!(err, FeedError::Io(_)));
        assert!(err.to_string().starts_with("IO error"));
    }
}
