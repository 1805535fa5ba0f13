use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tokio::sync::Mutex;

use super::chat;
use super::ChatRequest;
use super::ServerState;
use crate::domain::models::Backend;
use crate::domain::models::BackendBox;
use crate::domain::models::BackendPrompt;
use crate::domain::models::BackendResponse;
use crate::domain::services::Session;

struct TestBackend {
    reply: String,
    error: Option<String>,
}

impl TestBackend {
    fn boxed(reply: &str) -> BackendBox {
        return Box::new(TestBackend {
            reply: reply.to_string(),
            error: None,
        });
    }

    fn failing(error: &str) -> BackendBox {
        return Box::new(TestBackend {
            reply: "".to_string(),
            error: Some(error.to_string()),
        });
    }
}

#[async_trait]
impl Backend for TestBackend {
    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    async fn get_completion(&self, _prompt: BackendPrompt) -> Result<BackendResponse> {
        if let Some(error) = &self.error {
            bail!(error.clone());
        }

        return Ok(BackendResponse {
            text: self.reply.clone(),
            context: None,
        });
    }
}

fn state_with(backend: BackendBox) -> ServerState {
    return ServerState {
        session: Arc::new(Mutex::new(Session::new(backend, ""))),
    };
}

#[tokio::test]
async fn it_answers_chat_requests() {
    let state = state_with(TestBackend::boxed("INGRES is a relational database."));

    let (status, Json(body)) = chat(
        State(state),
        Json(ChatRequest {
            message: "What is INGRES?".to_string(),
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.response.unwrap(), "INGRES is a relational database.");
    assert!(body.error.is_none());
}

#[tokio::test]
async fn it_rejects_empty_messages() {
    let state = state_with(TestBackend::boxed("unused"));

    let (status, Json(body)) = chat(
        State(state.clone()),
        Json(ChatRequest {
            message: "   ".to_string(),
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.response.is_none());
    assert_eq!(body.error.unwrap(), "no input provided");
    assert!(state.session.lock().await.messages().is_empty());
}

#[tokio::test]
async fn it_keeps_generation_failures_conversational() {
    let state = state_with(TestBackend::failing("boom"));

    let (status, Json(body)) = chat(
        State(state),
        Json(ChatRequest {
            message: "What is INGRES?".to_string(),
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.response.unwrap().contains("boom"));
    assert!(body.error.is_none());
}
