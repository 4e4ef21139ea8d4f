//! HTTP front-end: ask questions over JSON.
//!
//! | Route          | Response                                              |
//! |----------------|-------------------------------------------------------|
//! | `POST /ask`    | `{"success", "question", "answer"[, "reason"]}`       |
//! | `GET /status`  | `{"status": "running", "deadline_ms", "providers"}`   |
//! | `GET /health`  | `{"status": "ok"}`                                    |

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio_util::sync::CancellationToken;
use trivia_search::Resolver;

use crate::config::ServerConfig;
use crate::error::{Result, TriviaError};

#[derive(Clone)]
struct ServerState {
    resolver: Resolver,
}

#[derive(serde::Deserialize)]
struct AskBody {
    #[serde(default)]
    question: String,
}

/// Build the router. Exposed separately from [`serve`] so tests can bind
/// their own listener.
pub fn router(resolver: Resolver) -> Router {
    Router::new()
        .route("/ask", post(ask))
        .route("/status", get(status))
        .route("/health", get(health))
        .with_state(ServerState { resolver })
}

/// Bind `config.host:config.port` and serve until `cancel` fires.
///
/// # Errors
///
/// Returns [`TriviaError::Server`] if the address cannot be bound or the
/// server fails.
pub async fn serve(config: &ServerConfig, resolver: Resolver, cancel: CancellationToken) -> Result<()> {
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| TriviaError::Server(format!("failed to bind {addr}: {e}")))?;
    let local_addr = listener.local_addr()?;

    tracing::info!("trivia server listening on http://{local_addr}");
    axum::serve(listener, router(resolver))
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
        .map_err(|e| TriviaError::Server(e.to_string()))?;
    tracing::info!("trivia server stopped");
    Ok(())
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok"
    }))
}

async fn status(State(state): State<ServerState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "running",
        "deadline_ms": state.resolver.deadline().as_millis() as u64,
        "providers": state.resolver.provider_names(),
    }))
}

async fn ask(
    State(state): State<ServerState>,
    body: std::result::Result<Json<AskBody>, JsonRejection>,
) -> impl IntoResponse {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "rejected /ask body");
            return (
                rejection.status(),
                Json(serde_json::json!({
                    "success": false,
                    "error": rejection.body_text()
                })),
            );
        }
    };
    let question = body.question.trim();
    if question.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "success": false,
                "error": "Please provide a question"
            })),
        );
    }

    let result = state.resolver.resolve(question).await;
    let mut response = serde_json::json!({
        "success": result.is_answered(),
        "question": question,
        "answer": result.display_text(),
    });
    if let Some(reason) = result.failure() {
        response["reason"] = serde_json::json!(reason);
    }
    (StatusCode::OK, Json(response))
}
