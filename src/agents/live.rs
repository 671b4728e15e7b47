//! Model-backed implementation of the agent operations.

use std::sync::Arc;

use async_trait::async_trait;

use super::extract::extract_tasks;
use super::{AgentError, AgentService, Backend, ModelSettings};
use crate::config::LlmConfig;
use crate::llm::{LlmChain, LlmClient};
use crate::prompts::{
    language_or_default, PromptTemplate, CREATE_TASKS_PROMPT, EXECUTE_TASK_PROMPT,
    START_GOAL_PROMPT,
};

/// Calls the model provider through an [`LlmClient`]. Holds no per-request
/// state, so one instance serves every request concurrently.
pub struct LiveAgentService {
    client: Arc<dyn LlmClient>,
    defaults: LlmConfig,
}

impl LiveAgentService {
    pub fn new(client: Arc<dyn LlmClient>, defaults: LlmConfig) -> Self {
        Self { client, defaults }
    }

    fn chain(&self, prompt: PromptTemplate, settings: &ModelSettings) -> LlmChain {
        LlmChain::new(
            Arc::clone(&self.client),
            prompt,
            settings.model(&self.defaults),
            settings.chat_options(&self.defaults),
        )
    }
}

#[async_trait]
impl AgentService for LiveAgentService {
    fn backend(&self) -> Backend {
        Backend::Live
    }

    async fn start_goal(
        &self,
        settings: &ModelSettings,
        goal: &str,
        language: &str,
    ) -> Result<Vec<String>, AgentError> {
        let completion = self
            .chain(START_GOAL_PROMPT, settings)
            .call(&[
                ("goal", goal),
                ("customLanguage", language_or_default(language)),
            ])
            .await?;

        let tasks = extract_tasks(&completion, &[]);
        tracing::debug!("start_goal produced {} task(s)", tasks.len());
        Ok(tasks)
    }

    async fn execute_task(
        &self,
        settings: &ModelSettings,
        goal: &str,
        task: &str,
        language: &str,
    ) -> Result<String, AgentError> {
        let completion = self
            .chain(EXECUTE_TASK_PROMPT, settings)
            .call(&[
                ("goal", goal),
                ("task", task),
                ("customLanguage", language_or_default(language)),
            ])
            .await?;
        Ok(completion)
    }

    async fn create_tasks(
        &self,
        settings: &ModelSettings,
        goal: &str,
        tasks: &[String],
        last_task: &str,
        result: &str,
        completed_tasks: &[String],
        language: &str,
    ) -> Result<Vec<String>, AgentError> {
        // The prompt shows pending tasks as a JSON list
        let pending = serde_json::to_string(tasks).unwrap_or_else(|_| "[]".to_string());

        let completion = self
            .chain(CREATE_TASKS_PROMPT, settings)
            .call(&[
                ("goal", goal),
                ("tasks", pending.as_str()),
                ("lastTask", last_task),
                ("result", result),
                ("customLanguage", language_or_default(language)),
            ])
            .await?;

        let new_tasks = extract_tasks(&completion, completed_tasks);
        tracing::debug!(
            "create_tasks produced {} task(s) against {} completed",
            new_tasks.len(),
            completed_tasks.len()
        );
        Ok(new_tasks)
    }
}
