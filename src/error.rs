//! Error types for debate-coach operations.
//!
//! Defines the error types for each subsystem:
//! - Analysis request validation and handling
//! - LLM API interactions
//! - Configuration loading

use thiserror::Error;

/// Errors surfaced to callers of the analysis handler.
///
/// Remote generation failures are not represented here: they are absorbed
/// by the fallback path and never reach the caller.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Debate topic is required")]
    EmptyTopic,

    #[error("Invalid mode selected")]
    InvalidMode(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("All response methods failed: {0}")]
    Internal(String),
}

impl AnalysisError {
    /// HTTP status code to report for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::EmptyTopic | Self::InvalidMode(_) | Self::InvalidBody(_) => 400,
            Self::Internal(_) => 500,
        }
    }

    /// Whether the error was caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

/// Errors that can occur during LLM operations.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse LLM response: {0}")]
    ParseError(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("API error ({code}): {message}")]
    ApiError { code: u16, message: String },
}

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable has an invalid value.
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    /// Configuration validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}
