//! Agents module - goal decomposition and task execution.
//!
//! # Backends
//! - **LiveAgentService**: renders a prompt, calls the model, parses the reply
//! - **MockAgentService**: canned answers for offline use and tests
//!
//! The backend is picked once at startup from [`Config::mock_mode`] and shared
//! behind [`AgentRef`]; callers never know which one they hold.

mod extract;
mod live;
mod mock;
mod types;

pub use extract::{extract_tasks, is_sentinel, normalize};
pub use live::LiveAgentService;
pub use mock::MockAgentService;
pub use types::{AgentError, Backend, ModelSettings};

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Config;
use crate::llm::{LlmError, OpenAiClient};

/// Shared handle to the active backend.
pub type AgentRef = Arc<dyn AgentService>;

/// The three agent operations.
///
/// # Invariants
/// - Calls are independent; no state carries over between them
/// - Task lists never contain an entry equal (ignoring case and whitespace)
///   to one of the completed tasks passed in
#[async_trait]
pub trait AgentService: Send + Sync {
    /// Which backend this is.
    fn backend(&self) -> Backend;

    /// Break a goal into its first tasks.
    async fn start_goal(
        &self,
        settings: &ModelSettings,
        goal: &str,
        language: &str,
    ) -> Result<Vec<String>, AgentError>;

    /// Carry out one task and return the model's answer verbatim.
    async fn execute_task(
        &self,
        settings: &ModelSettings,
        goal: &str,
        task: &str,
        language: &str,
    ) -> Result<String, AgentError>;

    /// Propose follow-up tasks given the last result.
    #[allow(clippy::too_many_arguments)]
    async fn create_tasks(
        &self,
        settings: &ModelSettings,
        goal: &str,
        tasks: &[String],
        last_task: &str,
        result: &str,
        completed_tasks: &[String],
        language: &str,
    ) -> Result<Vec<String>, AgentError>;
}

/// Build the backend selected by `config`.
pub fn from_config(config: &Config) -> Result<AgentRef, LlmError> {
    if config.mock_mode {
        tracing::info!("Agent backend: mock");
        return Ok(Arc::new(MockAgentService::new()));
    }

    let client = OpenAiClient::new(&config.llm)?;
    tracing::info!(
        "Agent backend: live (model={}, base_url={})",
        config.llm.default_model,
        config.llm.base_url
    );
    if config.llm.api_key.is_none() {
        tracing::warn!("No provider API key configured; requests must supply customApiKey");
    }
    Ok(Arc::new(LiveAgentService::new(
        Arc::new(client),
        config.llm.clone(),
    )))
}
