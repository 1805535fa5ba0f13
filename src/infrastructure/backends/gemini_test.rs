use anyhow::Result;
use mockito::Matcher;

use super::Content;
use super::ContentPart;
use super::Gemini;
use crate::domain::models::Backend;
use crate::domain::models::BackendPrompt;

impl Gemini {
    fn with_url(url: String) -> Gemini {
        return Gemini::new(&url, "model-1", "abc", "200");
    }
}

#[tokio::test]
async fn it_successfully_health_checks() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/v1beta/models/model-1?key=abc")
        .with_status(200)
        .create();

    let backend = Gemini::with_url(server.url());
    let res = backend.health_check().await;

    assert!(res.is_ok());
    mock.assert();
}

#[tokio::test]
async fn it_fails_health_checks() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/v1beta/models/model-1?key=abc")
        .with_status(500)
        .create();

    let backend = Gemini::with_url(server.url());
    let res = backend.health_check().await;

    assert!(res.is_err());
    mock.assert();
}

#[tokio::test]
async fn it_fails_health_checks_without_a_token() {
    let backend = Gemini::new("http://localhost:0", "model-1", "", "200");
    let res = backend.health_check().await;

    assert!(res.is_err());
}

#[tokio::test]
async fn it_gets_completions() -> Result<()> {
    let context = serde_json::to_string(&vec![
        Content {
            role: "user".to_string(),
            parts: vec![ContentPart {
                text: "Hello".to_string(),
            }],
        },
        Content {
            role: "model".to_string(),
            parts: vec![ContentPart {
                text: "Hi there.".to_string(),
            }],
        },
    ])?;

    let prompt = BackendPrompt::new("Say hi to the world".to_string(), context)
        .with_system_instruction("You are a helpful assistant.");

    let body = r#"{
        "candidates": [
            {
                "content": {
                    "role": "model",
                    "parts": [{ "text": "Hello " }, { "text": "World" }]
                },
                "finishReason": "STOP"
            }
        ]
    }"#;

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1beta/models/model-1:generateContent?key=abc")
        .match_body(Matcher::Json(serde_json::json!({
            "contents": [
                { "role": "user", "parts": [{ "text": "Hello" }] },
                { "role": "model", "parts": [{ "text": "Hi there." }] },
                { "role": "user", "parts": [{ "text": "Say hi to the world" }] }
            ],
            "systemInstruction": {
                "parts": [{ "text": "You are a helpful assistant." }]
            }
        })))
        .with_status(200)
        .with_body(body)
        .create();

    let backend = Gemini::with_url(server.url());
    let res = backend.get_completion(prompt).await?;

    mock.assert();

    assert_eq!(res.text, "Hello World");

    let replay: Vec<Content> = serde_json::from_str(&res.context.unwrap())?;
    assert_eq!(replay.len(), 4);
    assert_eq!(replay[3].role, "model");
    assert_eq!(replay[3].parts[0].text, "Hello World");

    return Ok(());
}

#[tokio::test]
async fn it_omits_the_system_instruction_when_unset() -> Result<()> {
    let prompt = BackendPrompt::new("Say hi".to_string(), "".to_string());

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1beta/models/model-1:generateContent?key=abc")
        .match_body(Matcher::Json(serde_json::json!({
            "contents": [
                { "role": "user", "parts": [{ "text": "Say hi" }] }
            ]
        })))
        .with_status(200)
        .with_body(r#"{ "candidates": [] }"#)
        .create();

    let backend = Gemini::with_url(server.url());
    let res = backend.get_completion(prompt).await?;

    mock.assert();
    assert_eq!(res.text, "");

    return Ok(());
}

#[tokio::test]
async fn it_fails_completions_on_server_errors() {
    let prompt = BackendPrompt::new("Say hi".to_string(), "".to_string());

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1beta/models/model-1:generateContent?key=abc")
        .with_status(429)
        .create();

    let backend = Gemini::with_url(server.url());
    let res = backend.get_completion(prompt).await;

    mock.assert();
    assert!(res.is_err());
    assert!(res.unwrap_err().to_string().contains("429"));
}
