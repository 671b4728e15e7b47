//! API request and response types.

use serde::{Deserialize, Serialize};

use crate::agents::{Backend, ModelSettings};

/// Body accepted by every agent endpoint. Each endpoint reads the fields it
/// needs and ignores the rest.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRequest {
    /// Model preferences, passed through to the provider call
    #[serde(default)]
    pub model_settings: ModelSettings,

    /// The user's objective
    #[serde(default)]
    pub goal: String,

    /// Task to execute (execute endpoint)
    #[serde(default)]
    pub task: Option<String>,

    /// Pending tasks (create endpoint)
    #[serde(default)]
    pub tasks: Vec<String>,

    /// Task that was just executed (create endpoint)
    #[serde(default)]
    pub last_task: Option<String>,

    /// Result of `last_task` (create endpoint)
    #[serde(default)]
    pub result: Option<String>,

    /// Tasks already done; never proposed again (create endpoint)
    #[serde(default)]
    pub completed_tasks: Option<Vec<String>>,

    /// Response language; empty means English
    #[serde(default)]
    pub custom_language: String,
}

/// Response carrying newly proposed tasks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewTasksResponse {
    pub new_tasks: Vec<String>,
}

/// Response carrying the result of an executed task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExecuteResponse {
    pub response: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,

    /// Backend answering agent calls
    pub backend: Backend,
}

/// Error body returned for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
