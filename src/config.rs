//! Configuration management for goalrunner.
//!
//! Configuration can be set via environment variables:
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `3000`.
//! - `MOCK_MODE_ENABLED` - Optional. Answer every agent call with canned results
//!   instead of calling the model provider. Defaults to `false`.
//! - `LLM_API_KEY` - Optional. Provider API key (falls back to `OPENAI_API_KEY`).
//!   Callers may also supply their own key per request.
//! - `LLM_BASE_URL` - Optional. OpenAI-compatible API root. Defaults to `https://api.openai.com/v1`.
//! - `DEFAULT_MODEL` - Optional. Defaults to `gpt-3.5-turbo`.
//! - `DEFAULT_TEMPERATURE` - Optional. Defaults to `0.9`.
//! - `DEFAULT_MAX_TOKENS` - Optional. Defaults to `400`.
//! - `LLM_TIMEOUT_SECS` - Optional. Outbound request timeout. Defaults to `60`.

use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Defaults for outbound model calls.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Provider API key. `None` means every request must bring its own.
    pub api_key: Option<String>,

    /// API root, without the trailing `/chat/completions`
    pub base_url: String,

    /// Model used when the request does not name one
    pub default_model: String,

    pub default_temperature: f64,

    pub default_max_tokens: u64,

    /// Transport-level timeout for a single completion request
    pub request_timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            default_model: "gpt-3.5-turbo".to_string(),
            default_temperature: 0.9,
            default_max_tokens: 400,
            request_timeout: Duration::from_secs(60),
        }
    }
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Serve canned results instead of calling the provider
    pub mock_mode: bool,

    /// Model provider defaults
    pub llm: LlmConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            mock_mode: false,
            llm: LlmConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a numeric or boolean variable
    /// does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = LlmConfig::default();

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = parse_var("PORT", 3000u16)?;
        let mock_mode = parse_flag("MOCK_MODE_ENABLED")?;

        let api_key = non_blank_var("LLM_API_KEY").or_else(|| non_blank_var("OPENAI_API_KEY"));

        let base_url = std::env::var("LLM_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);

        let default_model = std::env::var("DEFAULT_MODEL").unwrap_or(defaults.default_model);

        let llm = LlmConfig {
            api_key,
            base_url,
            default_model,
            default_temperature: parse_var("DEFAULT_TEMPERATURE", defaults.default_temperature)?,
            default_max_tokens: parse_var("DEFAULT_MAX_TOKENS", defaults.default_max_tokens)?,
            request_timeout: Duration::from_secs(parse_var("LLM_TIMEOUT_SECS", 60u64)?),
        };

        Ok(Self {
            host,
            port,
            mock_mode,
            llm,
        })
    }

    /// Create a config for the mock backend (useful for testing).
    pub fn mock() -> Self {
        Self {
            mock_mode: true,
            ..Self::default()
        }
    }
}

fn non_blank_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidValue(name.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}

fn parse_flag(name: &str) -> Result<bool, ConfigError> {
    let Ok(raw) = std::env::var(name) else {
        return Ok(false);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" | "off" => Ok(false),
        "1" | "true" | "yes" | "on" => Ok(true),
        other => Err(ConfigError::InvalidValue(
            name.to_string(),
            format!("expected a boolean, got '{}'", other),
        )),
    }
}
