//! Canned backend. Answers instantly and never touches the network.

use async_trait::async_trait;

use super::{AgentError, AgentService, Backend, ModelSettings};

#[derive(Debug, Clone, Copy, Default)]
pub struct MockAgentService;

impl MockAgentService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AgentService for MockAgentService {
    fn backend(&self) -> Backend {
        Backend::Mock
    }

    async fn start_goal(
        &self,
        _settings: &ModelSettings,
        _goal: &str,
        _language: &str,
    ) -> Result<Vec<String>, AgentError> {
        Ok(vec!["Task 1".to_string()])
    }

    async fn execute_task(
        &self,
        _settings: &ModelSettings,
        _goal: &str,
        task: &str,
        _language: &str,
    ) -> Result<String, AgentError> {
        Ok(format!("Result: {}", task))
    }

    async fn create_tasks(
        &self,
        _settings: &ModelSettings,
        _goal: &str,
        _tasks: &[String],
        _last_task: &str,
        _result: &str,
        _completed_tasks: &[String],
        _language: &str,
    ) -> Result<Vec<String>, AgentError> {
        Ok(vec!["Task 4".to_string()])
    }
}
