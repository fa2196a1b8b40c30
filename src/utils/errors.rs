//! Error handling for FlowerBot
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the FlowerBot application
#[derive(Error, Debug)]
pub enum FlowerBotError {
    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Backend API error: {0}")]
    Backend(#[from] BackendError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Reply correlation failed: {0}")]
    Correlation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Flower shop backend API specific errors
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Backend request failed: {0}")]
    RequestFailed(String),

    #[error("Backend request timed out")]
    Timeout,

    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),

    #[error("Backend service unavailable")]
    ServiceUnavailable,
}

/// Result type alias for FlowerBot operations
pub type Result<T> = std::result::Result<T, FlowerBotError>;

impl FlowerBotError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            FlowerBotError::Telegram(_) => true,
            FlowerBotError::Backend(_) => true,
            FlowerBotError::Config(_) => false,
            FlowerBotError::Http(_) => true,
            FlowerBotError::Serialization(_) => false,
            FlowerBotError::Io(_) => true,
            FlowerBotError::UrlParse(_) => false,
            FlowerBotError::Correlation(_) => true,
            FlowerBotError::InvalidInput(_) => false,
            FlowerBotError::ServiceUnavailable(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverability() {
        assert!(FlowerBotError::Backend(BackendError::Timeout).is_recoverable());
        assert!(FlowerBotError::Correlation("no marker".to_string()).is_recoverable());
        assert!(!FlowerBotError::Config("missing token".to_string()).is_recoverable());
    }

    #[test]
    fn test_backend_error_display() {
        let err = FlowerBotError::Backend(BackendError::ServiceUnavailable);
        assert_eq!(err.to_string(), "Backend API error: Backend service unavailable");
    }
}
