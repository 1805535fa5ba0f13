#[cfg(test)]
#[path = "server_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Json;
use axum::Router;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use tokio::sync::Mutex;

use crate::domain::services::Session;

/// The session is shared across requests and guarded by a mutex, so at most
/// one submit is in flight at a time.
#[derive(Clone)]
struct ServerState {
    session: Arc<Mutex<Session>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct ChatRequest {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct ChatResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

async fn chat(
    State(state): State<ServerState>,
    Json(req): Json<ChatRequest>,
) -> (StatusCode, Json<ChatResponse>) {
    let mut session = state.session.lock().await;

    match session.submit(&req.message).await {
        Ok(text) => {
            return (
                StatusCode::OK,
                Json(ChatResponse {
                    response: Some(text),
                    error: None,
                }),
            );
        }
        Err(err) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ChatResponse {
                    response: None,
                    error: Some(err.to_string()),
                }),
            );
        }
    }
}

fn router(session: Session) -> Router {
    let state = ServerState {
        session: Arc::new(Mutex::new(session)),
    };

    return Router::new().route("/chat", post(chat)).with_state(state);
}

pub async fn start(address: &str, session: Session) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(address).await?;
    tracing::info!(address = address, "listening");
    axum::serve(listener, router(session)).await?;

    return Ok(());
}
