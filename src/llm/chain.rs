//! Single-shot prompt execution.

use std::sync::Arc;

use super::{ChatMessage, ChatOptions, LlmClient, LlmError};
use crate::prompts::PromptTemplate;

/// A prompt template bound to a client and model. One call renders the
/// template, sends it as a single user message and returns the completion text.
pub struct LlmChain {
    client: Arc<dyn LlmClient>,
    prompt: PromptTemplate,
    model: String,
    options: ChatOptions,
}

impl LlmChain {
    pub fn new(
        client: Arc<dyn LlmClient>,
        prompt: PromptTemplate,
        model: impl Into<String>,
        options: ChatOptions,
    ) -> Self {
        Self {
            client,
            prompt,
            model: model.into(),
            options,
        }
    }

    /// Run the chain.
    ///
    /// # Errors
    ///
    /// Propagates the client error unchanged, or returns an
    /// `EmptyCompletion` error if the model produced no text.
    pub async fn call(&self, values: &[(&str, &str)]) -> Result<String, LlmError> {
        let prompt = self.prompt.render(values);
        let messages = [ChatMessage::user(prompt)];

        let response = self
            .client
            .chat_completion(&self.model, &messages, self.options.clone())
            .await?;

        if let Some(usage) = &response.usage {
            tracing::debug!(
                prompt = self.prompt.name,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Completion usage"
            );
        }

        if response.finish_reason.as_deref() == Some("length") {
            tracing::warn!(
                prompt = self.prompt.name,
                model = %self.model,
                "Completion hit the max_tokens limit and may be truncated"
            );
        }

        match response.content {
            Some(text) if !text.trim().is_empty() => {
                tracing::debug!(prompt = self.prompt.name, "Completion: {}", text);
                Ok(text)
            }
            _ => Err(LlmError::empty_completion(&self.model)),
        }
    }
}
