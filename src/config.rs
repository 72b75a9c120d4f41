//! Application configuration.
//!
//! All settings are read once at startup into an immutable [`AppConfig`]
//! which is then handed to the provider, the analyzer and the server.

use std::time::Duration;

use crate::error::ConfigError;
use crate::llm::providers::openrouter::{DEFAULT_MODEL, OPENROUTER_BASE_URL};

/// Runtime configuration for the debate-coach service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // Remote model settings
    /// OpenRouter API key. Absence is allowed: remote calls then fail and fall back.
    pub api_key: Option<String>,
    /// Base URL of the chat-completion API.
    pub api_base: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Output-length cap in tokens.
    pub max_tokens: u32,
    /// Bounded wait for the single remote attempt.
    pub request_timeout: Duration,

    // Response acceptance
    /// Content at or above this many characters is treated as truncated.
    pub truncation_threshold: usize,
    /// Content ending with this marker is treated as truncated.
    pub truncation_marker: String,

    // Fallback
    /// Pause applied before a fallback answer is returned.
    pub fallback_delay: Duration,

    // Server
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: OPENROUTER_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 1500,
            request_timeout: Duration::from_secs(30),

            truncation_threshold: 1400,
            truncation_marker: "...".to_string(),

            fallback_delay: Duration::from_millis(1000),

            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl AppConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENROUTER_API_KEY`: API key (optional)
    /// - `DEBATE_API_BASE`: API base URL (default: https://openrouter.ai/api/v1)
    /// - `DEBATE_MODEL`: Model identifier (default: deepseek/deepseek-r1:free)
    /// - `DEBATE_TEMPERATURE`: Sampling temperature (default: 0.7)
    /// - `DEBATE_MAX_TOKENS`: Output token cap (default: 1500)
    /// - `DEBATE_REQUEST_TIMEOUT_SECS`: Remote call timeout (default: 30)
    /// - `DEBATE_TRUNCATION_THRESHOLD`: Truncation length in characters (default: 1400)
    /// - `DEBATE_TRUNCATION_MARKER`: Trailing truncation marker (default: "...")
    /// - `DEBATE_FALLBACK_DELAY_MS`: Delay before fallback answers (default: 1000)
    /// - `DEBATE_HOST`: Bind address (default: 0.0.0.0)
    /// - `DEBATE_PORT`: Bind port (default: 8000)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable cannot be parsed or the result fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates configuration from an arbitrary key lookup.
    ///
    /// `from_env` is this function over the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        config.api_key = lookup("OPENROUTER_API_KEY").filter(|k| !k.trim().is_empty());

        if let Some(val) = lookup("DEBATE_API_BASE") {
            config.api_base = val;
        }

        if let Some(val) = lookup("DEBATE_MODEL") {
            config.model = val;
        }

        if let Some(val) = lookup("DEBATE_TEMPERATURE") {
            config.temperature = parse_env_value(&val, "DEBATE_TEMPERATURE")?;
        }

        if let Some(val) = lookup("DEBATE_MAX_TOKENS") {
            config.max_tokens = parse_env_value(&val, "DEBATE_MAX_TOKENS")?;
        }

        if let Some(val) = lookup("DEBATE_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = parse_env_value(&val, "DEBATE_REQUEST_TIMEOUT_SECS")?;
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(val) = lookup("DEBATE_TRUNCATION_THRESHOLD") {
            config.truncation_threshold = parse_env_value(&val, "DEBATE_TRUNCATION_THRESHOLD")?;
        }

        if let Some(val) = lookup("DEBATE_TRUNCATION_MARKER") {
            config.truncation_marker = val;
        }

        if let Some(val) = lookup("DEBATE_FALLBACK_DELAY_MS") {
            let millis: u64 = parse_env_value(&val, "DEBATE_FALLBACK_DELAY_MS")?;
            config.fallback_delay = Duration::from_millis(millis);
        }

        if let Some(val) = lookup("DEBATE_HOST") {
            config.host = val;
        }

        if let Some(val) = lookup("DEBATE_PORT") {
            config.port = parse_env_value(&val, "DEBATE_PORT")?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "api_base cannot be empty".to_string(),
            ));
        }

        if !self.api_base.starts_with("http://") && !self.api_base.starts_with("https://") {
            return Err(ConfigError::ValidationFailed(
                "api_base must start with 'http://' or 'https://'".to_string(),
            ));
        }

        if self.model.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "model cannot be empty".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::ValidationFailed(
                "temperature must be between 0.0 and 2.0".to_string(),
            ));
        }

        if self.max_tokens == 0 {
            return Err(ConfigError::ValidationFailed(
                "max_tokens must be greater than 0".to_string(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(ConfigError::ValidationFailed(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        if self.truncation_threshold == 0 {
            return Err(ConfigError::ValidationFailed(
                "truncation_threshold must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Socket address string for the HTTP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Builder method to set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Builder method to set the API base URL.
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Builder method to set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Builder method to set temperature.
    pub fn with_temperature(mut self, temp: f64) -> Self {
        self.temperature = temp;
        self
    }

    /// Builder method to set the output token cap.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Builder method to set the remote call timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Builder method to set the truncation threshold.
    pub fn with_truncation_threshold(mut self, threshold: usize) -> Self {
        self.truncation_threshold = threshold;
        self
    }

    /// Builder method to set the fallback delay.
    pub fn with_fallback_delay(mut self, delay: Duration) -> Self {
        self.fallback_delay = delay;
        self
    }

    /// Builder method to set host and port.
    pub fn with_bind(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = host.into();
        self.port = port;
        self
    }
}

/// Parse an environment variable value into a type.
fn parse_env_value<T: std::str::FromStr>(value: &str, key: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("could not parse '{}'", value),
    })
}
