//! Core types for the agent service.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::LlmConfig;
use crate::llm::{ChatOptions, LlmError};

/// Caller-supplied model preferences. Every field is optional; unset or blank
/// fields fall back to the server's configured defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_model_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_temperature: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_max_tokens: Option<u64>,
}

impl ModelSettings {
    /// Model name to call, given the server defaults.
    pub fn model<'a>(&'a self, defaults: &'a LlmConfig) -> &'a str {
        non_blank(&self.custom_model_name).unwrap_or(defaults.default_model.as_str())
    }

    /// Request options with these settings laid over the server defaults.
    pub fn chat_options(&self, defaults: &LlmConfig) -> ChatOptions {
        ChatOptions {
            temperature: Some(self.custom_temperature.unwrap_or(defaults.default_temperature)),
            max_tokens: Some(self.custom_max_tokens.unwrap_or(defaults.default_max_tokens)),
            api_key: non_blank(&self.custom_api_key).map(str::to_string),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Which implementation answers agent calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Calls the model provider
    Live,
    /// Canned answers, no network
    Mock,
}

/// Failure of an agent call.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("model invocation failed: {0}")]
    Llm(#[from] LlmError),
}

impl AgentError {
    /// Short classification for logs.
    pub fn kind(&self) -> String {
        match self {
            AgentError::Llm(e) => e.kind.to_string(),
        }
    }

    /// Whether the same call could succeed later.
    pub fn is_transient(&self) -> bool {
        match self {
            AgentError::Llm(e) => e.is_transient(),
        }
    }
}
