//! Prompt templates for the three agent calls.
//!
//! Templates use `{name}` placeholders. The task-producing prompts ask for a
//! numbered list with one task per line, which is the format
//! [`crate::agents::extract_tasks`] parses.

/// A prompt with named `{placeholder}` slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    pub name: &'static str,
    pub template: &'static str,
}

impl PromptTemplate {
    pub const fn new(name: &'static str, template: &'static str) -> Self {
        Self { name, template }
    }

    /// Substitute every `{key}` with its value. Placeholders without a value
    /// are left as-is.
    pub fn render(&self, values: &[(&str, &str)]) -> String {
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template;
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let replacement = after.find('}').and_then(|close| {
                let name = &after[..close];
                values
                    .iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| (*value, close))
            });
            match replacement {
                Some((value, close)) => {
                    out.push_str(value);
                    rest = &after[close + 1..];
                }
                None => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    }
}

pub const START_GOAL_PROMPT: PromptTemplate = PromptTemplate::new(
    "start_goal",
    "You are an autonomous task creation AI called AgentGPT. You have the following objective \"{goal}\". \
Create a list of zero to three tasks to be completed by your AI system such that your goal is more closely reached or completely reached. \
Respond in the {customLanguage} language. \
Return the tasks as a numbered list with exactly one task per line and nothing else.",
);

pub const EXECUTE_TASK_PROMPT: PromptTemplate = PromptTemplate::new(
    "execute_task",
    "You are an autonomous task execution AI called AgentGPT. You have the following objective \"{goal}\". \
You have the following tasks \"{task}\". Execute the task and return the response as a string. \
Respond in the {customLanguage} language.",
);

pub const CREATE_TASKS_PROMPT: PromptTemplate = PromptTemplate::new(
    "create_tasks",
    "You are an AI task creation agent. You have the following objective \"{goal}\". \
You have the following incomplete tasks {tasks} and have just executed the following task \"{lastTask}\" and received the following result \"{result}\". \
Based on this, create a new task to be completed by your AI system ONLY IF NEEDED such that your goal is more closely reached or completely reached. \
Respond in the {customLanguage} language. \
Return the tasks as a numbered list with exactly one task per line and nothing else. \
If no further tasks are needed, reply with \"No more tasks\".",
);

/// Language used when the caller does not ask for one.
pub const DEFAULT_LANGUAGE: &str = "English";

/// Resolve the caller's language preference.
pub fn language_or_default(language: &str) -> &str {
    let trimmed = language.trim();
    if trimmed.is_empty() {
        DEFAULT_LANGUAGE
    } else {
        trimmed
    }
}
