#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::domain::models::Backend;
use crate::domain::models::BackendPrompt;
use crate::domain::models::BackendResponse;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ContentPart {
    text: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    role: String,
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SystemInstruction {
    parts: Vec<ContentPart>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompletionRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

pub struct Gemini {
    url: String,
    model: String,
    token: String,
    timeout: String,
}

impl Gemini {
    pub fn new(url: &str, model: &str, token: &str, timeout: &str) -> Gemini {
        return Gemini {
            url: url.to_string(),
            model: model.to_string(),
            token: token.to_string(),
            timeout: timeout.to_string(),
        };
    }
}

#[async_trait]
impl Backend for Gemini {
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("Gemini URL is not defined");
        }
        if self.token.is_empty() {
            bail!("Gemini token is not defined");
        }

        let url = format!(
            "{url}/v1beta/models/{model}?key={key}",
            url = self.url,
            model = self.model,
            key = self.token
        );

        let res = reqwest::Client::new()
            .get(&url)
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        if res.is_err() {
            tracing::error!(error = ?res.unwrap_err(), "Gemini is not reachable");
            bail!("Gemini is not reachable");
        }

        let status = res.unwrap().status().as_u16();
        if status >= 400 {
            tracing::error!(status = status, "Gemini health check failed");
            bail!("Gemini health check failed");
        }

        return Ok(());
    }

    async fn get_completion(&self, prompt: BackendPrompt) -> Result<BackendResponse> {
        let mut contents: Vec<Content> = vec![];
        if !prompt.context.is_empty() {
            contents = serde_json::from_str(&prompt.context)?;
        }
        contents.push(Content {
            role: "user".to_string(),
            parts: vec![ContentPart { text: prompt.text }],
        });

        let mut req = CompletionRequest {
            contents: contents.clone(),
            system_instruction: None,
        };
        if !prompt.system_instruction.is_empty() {
            req.system_instruction = Some(SystemInstruction {
                parts: vec![ContentPart {
                    text: prompt.system_instruction,
                }],
            });
        }

        let res = reqwest::Client::new()
            .post(format!(
                "{url}/v1beta/models/{model}:generateContent?key={key}",
                url = self.url,
                model = self.model,
                key = self.token,
            ))
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to make completion request to Gemini"
            );
            bail!(format!(
                "Failed to make completion request to Gemini, {}",
                res.status().as_u16()
            ));
        }

        let ores = res.json::<CompletionResponse>().await?;
        let text = ores
            .candidates
            .first()
            .map(|candidate| {
                return candidate
                    .content
                    .parts
                    .iter()
                    .map(|part| return part.text.as_str())
                    .collect::<Vec<&str>>()
                    .join("");
            })
            .unwrap_or_default();

        contents.push(Content {
            role: "model".to_string(),
            parts: vec![ContentPart { text: text.clone() }],
        });

        return Ok(BackendResponse {
            text,
            context: Some(serde_json::to_string(&contents)?),
        });
    }
}
