#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

mod application;
mod configuration;
mod domain;
mod infrastructure;

use std::process;

use anyhow::Error;
use owo_colors::OwoColorize;
use owo_colors::Stream;
use tracing_subscriber::EnvFilter;

use crate::application::cli;

fn handle_error(err: Error) {
    eprintln!(
        "{}",
        format!("mentor has failed with the following error:\n\n{err}")
            .if_supports_color(Stream::Stderr, |text| return text.red())
    );

    process::exit(1);
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| return EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli::parse().await {
        handle_error(err);
    }
}
