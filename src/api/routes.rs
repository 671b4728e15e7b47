//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::agents::{self, AgentRef};
use crate::config::Config;

use super::error::ApiError;
use super::types::*;

/// Shared application state.
pub struct AppState {
    /// The backend answering agent calls
    pub agent: AgentRef,
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/agent/start", post(start_goal))
        .route("/api/agent/execute", post(execute_task))
        .route("/api/agent/create", post(create_tasks))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let agent = agents::from_config(&config)?;
    let state = Arc::new(AppState { agent });

    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Health check endpoint.
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: state.agent.backend(),
    })
}

/// Break a goal into its first tasks.
async fn start_goal(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AgentRequest>,
) -> Result<Json<NewTasksResponse>, ApiError> {
    tracing::info!("Starting goal: {}", req.goal);

    let new_tasks = state
        .agent
        .start_goal(&req.model_settings, &req.goal, &req.custom_language)
        .await?;

    Ok(Json(NewTasksResponse { new_tasks }))
}

/// Execute a single task.
async fn execute_task(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AgentRequest>,
) -> Result<Json<ExecuteResponse>, ApiError> {
    let task = req.task.ok_or_else(|| ApiError::missing_field("task"))?;
    tracing::info!("Executing task: {}", task);

    let response = state
        .agent
        .execute_task(&req.model_settings, &req.goal, &task, &req.custom_language)
        .await?;

    Ok(Json(ExecuteResponse { response }))
}

/// Propose follow-up tasks after one has run.
async fn create_tasks(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AgentRequest>,
) -> Result<Json<NewTasksResponse>, ApiError> {
    let last_task = req
        .last_task
        .ok_or_else(|| ApiError::missing_field("lastTask"))?;
    let result = req.result.ok_or_else(|| ApiError::missing_field("result"))?;
    let completed = req.completed_tasks.unwrap_or_default();

    let new_tasks = state
        .agent
        .create_tasks(
            &req.model_settings,
            &req.goal,
            &req.tasks,
            &last_task,
            &result,
            &completed,
            &req.custom_language,
        )
        .await?;

    Ok(Json(NewTasksResponse { new_tasks }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{AgentError, AgentService, Backend, MockAgentService, ModelSettings};
    use crate::llm::{LlmError, LlmErrorKind};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    /// Live-shaped backend whose answers differ from the mock's.
    struct FixedAgent {
        fail: bool,
    }

    impl FixedAgent {
        fn check(&self) -> Result<(), AgentError> {
            if self.fail {
                Err(AgentError::Llm(LlmError::new(
                    LlmErrorKind::RateLimited,
                    Some(429),
                    "quota exceeded for key sk-secret",
                )))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl AgentService for FixedAgent {
        fn backend(&self) -> Backend {
            Backend::Live
        }

        async fn start_goal(
            &self,
            _settings: &ModelSettings,
            goal: &str,
            _language: &str,
        ) -> Result<Vec<String>, AgentError> {
            self.check()?;
            Ok(vec![format!("Plan {}", goal)])
        }

        async fn execute_task(
            &self,
            _settings: &ModelSettings,
            _goal: &str,
            task: &str,
            language: &str,
        ) -> Result<String, AgentError> {
            self.check()?;
            Ok(format!("{} done in {}", task, language))
        }

        async fn create_tasks(
            &self,
            _settings: &ModelSettings,
            _goal: &str,
            _tasks: &[String],
            last_task: &str,
            _result: &str,
            completed_tasks: &[String],
            _language: &str,
        ) -> Result<Vec<String>, AgentError> {
            self.check()?;
            Ok(vec![format!(
                "After {} ({} completed)",
                last_task,
                completed_tasks.len()
            )])
        }
    }

    fn app(agent: AgentRef) -> Router {
        router(Arc::new(AppState { agent }))
    }

    fn mock_app() -> Router {
        app(Arc::new(MockAgentService::new()))
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_execute_returns_response() {
        let (status, body) = post_json(
            mock_app(),
            "/api/agent/execute",
            json!({
                "modelSettings": {},
                "goal": "Ship v1",
                "task": "Write docs",
                "customLanguage": "English"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "response": "Result: Write docs" }));
    }

    #[tokio::test]
    async fn test_execute_without_task_is_bad_request() {
        let (status, body) = post_json(
            mock_app(),
            "/api/agent/execute",
            json!({ "modelSettings": {}, "goal": "Ship v1", "customLanguage": "" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing required field: task");
    }

    #[tokio::test]
    async fn test_start_and_create_with_mock() {
        let (status, body) = post_json(
            mock_app(),
            "/api/agent/start",
            json!({ "goal": "Anything at all" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "newTasks": ["Task 1"] }));

        let (status, body) = post_json(
            mock_app(),
            "/api/agent/create",
            json!({
                "goal": "Anything",
                "tasks": ["Task 2"],
                "lastTask": "Task 1",
                "result": "Result: Task 1",
                "completedTasks": ["Task 1"]
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "newTasks": ["Task 4"] }));
    }

    #[tokio::test]
    async fn test_create_requires_last_task_and_result() {
        let (status, body) = post_json(
            mock_app(),
            "/api/agent/create",
            json!({ "goal": "g", "result": "r" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing required field: lastTask");

        let (status, body) = post_json(
            mock_app(),
            "/api/agent/create",
            json!({ "goal": "g", "lastTask": "t" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing required field: result");
    }

    #[tokio::test]
    async fn test_backend_switch_keeps_response_shape() {
        let live = app(Arc::new(FixedAgent { fail: false }));
        let request = json!({ "goal": "g", "task": "Write docs", "customLanguage": "Deutsch" });

        let (mock_status, mock_body) =
            post_json(mock_app(), "/api/agent/execute", request.clone()).await;
        let (live_status, live_body) = post_json(live.clone(), "/api/agent/execute", request).await;

        assert_eq!(mock_status, StatusCode::OK);
        assert_eq!(live_status, StatusCode::OK);
        assert_eq!(live_body, json!({ "response": "Write docs done in Deutsch" }));
        assert_ne!(mock_body, live_body);
        assert!(mock_body["response"].is_string());

        let (_, body) = post_json(
            live,
            "/api/agent/create",
            json!({ "lastTask": "t", "result": "r" }),
        )
        .await;
        assert_eq!(body, json!({ "newTasks": ["After t (0 completed)"] }));
    }

    #[tokio::test]
    async fn test_agent_failure_is_generic_server_error() {
        let failing = app(Arc::new(FixedAgent { fail: true }));

        for (uri, body) in [
            ("/api/agent/start", json!({ "goal": "g" })),
            ("/api/agent/execute", json!({ "goal": "g", "task": "t" })),
            (
                "/api/agent/create",
                json!({ "goal": "g", "lastTask": "t", "result": "r" }),
            ),
        ] {
            let (status, body) = post_json(failing.clone(), uri, body).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, json!({ "error": "Internal server error" }));
        }
    }

    #[tokio::test]
    async fn test_invalid_json_is_rejected() {
        let response = mock_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/agent/start")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_health_reports_backend() {
        for (agent, expected) in [
            (Arc::new(MockAgentService::new()) as AgentRef, "mock"),
            (Arc::new(FixedAgent { fail: false }) as AgentRef, "live"),
        ] {
            let response = app(agent)
                .oneshot(
                    Request::builder()
                        .uri("/api/health")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let body: Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body["status"], "ok");
            assert_eq!(body["backend"], expected);
        }
    }
}
