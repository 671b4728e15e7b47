//! # goalrunner
//!
//! HTTP service that turns a user's goal into a list of tasks with the help of
//! a large language model, executes tasks one at a time, and proposes
//! follow-up tasks from the results.
//!
//! ## Request Flow
//!
//! ```text
//!   HTTP request ──► api ──► AgentService ──► LlmChain ──► model provider
//!                                  │
//!                                  ▼
//!                           extract_tasks ──► JSON response
//! ```
//!
//! ## Modules
//! - `api`: axum routes and request/response types
//! - `agents`: the agent operations, live and mock backends, task extraction
//! - `llm`: chat-completion client and prompt chain
//! - `prompts`: prompt templates
//! - `config`: environment configuration

pub mod agents;
pub mod api;
pub mod config;
pub mod llm;
pub mod prompts;

pub use agents::{AgentRef, AgentService, Backend, ModelSettings};
pub use config::Config;
