use std::io::Write;

use anyhow::Result;
use owo_colors::OwoColorize;
use owo_colors::Stream;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;

use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::services::Session;
use crate::domain::services::SessionError;

fn help_text() -> String {
    let text = r#"
COMMANDS:
- /history - Print the conversation so far.
- /reset - Clear the conversation and start over.
- /quit /exit (/q) - Exit mentor.
- /help (/h) - Provides this help menu.
    "#;

    return text.trim().to_string();
}

fn print_message(message: &Message) {
    let label = format!("{}:", message.author.to_string());
    match message.message_type() {
        MessageType::Normal => {
            println!(
                "{} {}",
                label.if_supports_color(Stream::Stdout, |text| return text.bold()),
                message.text
            );
        }
        MessageType::Error => {
            println!(
                "{} {}",
                label.if_supports_color(Stream::Stdout, |text| return text.bold()),
                message
                    .text
                    .if_supports_color(Stream::Stdout, |text| return text.red())
            );
        }
    }
}

fn print_prompt() -> Result<()> {
    print!("> ");
    std::io::stdout().flush()?;

    return Ok(());
}

/// Line oriented chat loop over stdin and stdout. Used both for plain chat
/// sessions and for the follow-up questions after a generated learning path.
pub async fn start(mut session: Session) -> Result<()> {
    for message in session.messages() {
        print_message(message);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    print_prompt()?;

    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "/quit" | "/exit" | "/q" => break,
            "/help" | "/h" => println!("{}", help_text()),
            "/reset" => {
                session.reset();
                for message in session.messages() {
                    print_message(message);
                }
            }
            "/history" => {
                for message in session.messages() {
                    print_message(message);
                }
            }
            text => match session.submit(text).await {
                Ok(_) => {
                    if let Some(message) = session.messages().last() {
                        print_message(message);
                    }
                }
                Err(SessionError::EmptyInput) => {
                    print_message(&Message::new_with_type(
                        Author::Mentor,
                        MessageType::Error,
                        "Enter a message to send, or /help for commands.",
                    ));
                }
            },
        }

        print_prompt()?;
    }

    return Ok(());
}
