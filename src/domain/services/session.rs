#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use thiserror::Error;

use crate::domain::models::Author;
use crate::domain::models::BackendBox;
use crate::domain::models::BackendPrompt;
use crate::domain::models::Message;
use crate::domain::models::MessageType;

pub const FALLBACK_RESPONSE: &str =
    "Sorry, I could not come up with a response. Please try again.";

#[derive(Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no input provided")]
    EmptyInput,
}

/// Owns the turn history for one conversation and mediates every call to the
/// generation backend. All remote failures are absorbed here and rendered as
/// error messages in the transcript, so callers always receive a string.
pub struct Session {
    backend: BackendBox,
    system_instruction: String,
    greeting: String,
    working_context: String,
    backend_context: String,
    messages: Vec<Message>,
}

impl Session {
    pub fn new(backend: BackendBox, system_instruction: &str) -> Session {
        return Session {
            backend,
            system_instruction: system_instruction.to_string(),
            greeting: "".to_string(),
            working_context: "".to_string(),
            backend_context: "".to_string(),
            messages: vec![],
        };
    }

    pub fn with_greeting(mut self, greeting: &str) -> Session {
        self.greeting = greeting.to_string();
        self.reset();
        return self;
    }

    /// Sends user input to the backend and appends both the user turn and the
    /// resulting assistant turn to history. The user turn is appended before
    /// the request goes out so callers can render it without waiting.
    pub async fn submit(&mut self, text: &str) -> Result<String, SessionError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SessionError::EmptyInput);
        }

        self.messages.push(Message::new(Author::User, trimmed));

        let mut prompt = BackendPrompt::new(
            compose_prompt(&self.working_context, trimmed),
            self.backend_context.clone(),
        );
        if !self.system_instruction.is_empty() {
            prompt = prompt.with_system_instruction(&self.system_instruction);
        }

        let reply = match self.backend.get_completion(prompt).await {
            Ok(res) => {
                if let Some(context) = res.context {
                    self.backend_context = context;
                }

                if res.text.trim().is_empty() {
                    Message::new(Author::Model, FALLBACK_RESPONSE)
                } else {
                    Message::new(Author::Model, &res.text)
                }
            }
            Err(err) => {
                tracing::error!(error = ?err, "completion request failed");
                Message::new_with_type(
                    Author::Model,
                    MessageType::Error,
                    &format!("Sorry, I ran into a problem. Please try again.\n\nError: {err}"),
                )
            }
        };

        let reply_text = reply.text.clone();
        self.messages.push(reply);

        return Ok(reply_text);
    }

    /// Clears the history and the replay context. The working context is kept
    /// as it is managed separately from the transcript.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.backend_context.clear();
        if !self.greeting.is_empty() {
            self.messages
                .push(Message::new(Author::Model, &self.greeting));
        }
    }

    pub fn messages(&self) -> &[Message] {
        return &self.messages;
    }

    pub fn set_working_context(&mut self, context: &str) {
        self.working_context = context.to_string();
    }
}

fn compose_prompt(working_context: &str, text: &str) -> String {
    if working_context.is_empty() {
        return text.to_string();
    }

    return format!("Reference context:\n{working_context}\n\nUser message:\n{text}");
}
