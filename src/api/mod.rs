//! HTTP API for goalrunner.
//!
//! ## Endpoints
//!
//! - `POST /api/agent/start` - Break a goal into its first tasks
//! - `POST /api/agent/execute` - Execute one task
//! - `POST /api/agent/create` - Propose follow-up tasks
//! - `GET /api/health` - Health check

mod error;
mod routes;
pub mod types;

pub use error::ApiError;
pub use routes::{router, serve, AppState};
pub use types::*;
