#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;

pub struct BackendPrompt {
    pub text: String,
    pub system_instruction: String,
    pub context: String,
}

impl BackendPrompt {
    pub fn new(text: String, context: String) -> BackendPrompt {
        return BackendPrompt {
            text,
            system_instruction: "".to_string(),
            context,
        };
    }

    pub fn with_system_instruction(mut self, instruction: &str) -> BackendPrompt {
        self.system_instruction = instruction.to_string();
        return self;
    }
}

#[derive(Debug)]
pub struct BackendResponse {
    pub text: String,
    pub context: Option<String>,
}

#[async_trait]
pub trait Backend {
    /// Used at startup to verify all configurations are available to work with
    /// the backend.
    async fn health_check(&self) -> Result<()>;

    /// Requests a completion from the backend, blocking the calling task until
    /// the full response has arrived.
    ///
    /// In order for a backend to maintain history, a context string is
    /// returned alongside the response text. This should be provided again
    /// with the next prompt to the backend.
    async fn get_completion(&self, prompt: BackendPrompt) -> Result<BackendResponse>;
}

pub type BackendBox = Box<dyn Backend + Send + Sync>;
