//! debate-coach: debate preparation backend.
//!
//! Turns a debate topic and an optional position into counterarguments or a
//! logical-fallacy analysis using a chat-completion API, with built-in
//! answers when the remote model is unavailable.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod server;

// Re-export commonly used error types
pub use error::{AnalysisError, ConfigError, LlmError};
