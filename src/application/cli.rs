use anyhow::bail;
use anyhow::Result;
use clap::Arg;
use clap::ArgMatches;
use clap::Command;

use crate::application::learn;
use crate::application::learn::PlanRequest;
use crate::application::repl;
use crate::application::server;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::BackendBox;
use crate::domain::services::Session;
use crate::infrastructure::backends::gemini::Gemini;

const CHAT_GREETING: &str = "Hey there! What can I do for you?";

fn arg_gemini_token() -> Arg {
    return Arg::new("gemini-token")
        .long("gemini-token")
        .env("GEMINI_API_KEY")
        .hide_env_values(true)
        .num_args(1)
        .help("Gemini API key used to authenticate against the generation API.")
        .global(true);
}

fn arg_gemini_url() -> Arg {
    return Arg::new(ConfigKey::GeminiURL.to_string())
        .long(ConfigKey::GeminiURL.to_string())
        .env("MENTOR_GEMINI_URL")
        .num_args(1)
        .help(format!(
            "Gemini API URL. Can be swapped to a compatible proxy. [default: {}]",
            Config::default(ConfigKey::GeminiURL)
        ))
        .global(true);
}

fn arg_health_check_timeout() -> Arg {
    return Arg::new(ConfigKey::HealthCheckTimeout.to_string())
        .long(ConfigKey::HealthCheckTimeout.to_string())
        .env("MENTOR_HEALTH_CHECK_TIMEOUT")
        .num_args(1)
        .help(format!(
            "Time to wait in milliseconds before timing out when doing a healthcheck for the backend. [default: {}]",
            Config::default(ConfigKey::HealthCheckTimeout)
        ))
        .global(true);
}

fn arg_model() -> Arg {
    return Arg::new(ConfigKey::Model.to_string())
        .short('m')
        .long(ConfigKey::Model.to_string())
        .env("MENTOR_MODEL")
        .num_args(1)
        .help(format!(
            "The model to consume on the backend. [default: {}]",
            Config::default(ConfigKey::Model)
        ))
        .global(true);
}

fn arg_serve_address() -> Arg {
    return Arg::new(ConfigKey::ServeAddress.to_string())
        .long(ConfigKey::ServeAddress.to_string())
        .env("MENTOR_SERVE_ADDRESS")
        .num_args(1)
        .help(format!(
            "Address the HTTP endpoint binds to when running `serve`. [default: {}]",
            Config::default(ConfigKey::ServeAddress)
        ))
        .global(true);
}

fn arg_system_instruction() -> Arg {
    return Arg::new(ConfigKey::SystemInstruction.to_string())
        .short('s')
        .long(ConfigKey::SystemInstruction.to_string())
        .env("MENTOR_SYSTEM_INSTRUCTION")
        .num_args(1)
        .help("Fixed instruction prepended to every request to steer the assistant. Defaults to the INGRES assistant persona.")
        .global(true);
}

fn arg_username() -> Arg {
    return Arg::new(ConfigKey::Username.to_string())
        .short('u')
        .long(ConfigKey::Username.to_string())
        .env("MENTOR_USERNAME")
        .num_args(1)
        .help("Name displayed for your turns in the terminal chat. [default: your OS username]")
        .global(true);
}

fn subcommand_chat() -> Command {
    return Command::new("chat").about("Start an interactive chat session in the terminal.");
}

fn subcommand_learn() -> Command {
    return Command::new("learn")
        .about("Generate a personalized learning path, then chat about it.")
        .arg(
            Arg::new("goal")
                .short('g')
                .long("goal")
                .num_args(1)
                .required(true)
                .help("The learning goal, e.g. \"Become a Data Scientist\"."),
        )
        .arg(
            Arg::new("skills")
                .long("skills")
                .num_args(1)
                .help("Current skills or experience."),
        )
        .arg(
            Arg::new("preferences")
                .long("preferences")
                .num_args(1)
                .help("Preferences such as learning style, time commitment, or resources."),
        )
        .arg(
            Arg::new("resume")
                .long("resume")
                .num_args(1)
                .help("Path to a plain-text resume or skill list used to personalize the plan."),
        );
}

fn subcommand_serve() -> Command {
    return Command::new("serve")
        .about("Serve the assistant over HTTP with a single POST /chat endpoint.");
}

pub fn build() -> Command {
    return Command::new("mentor")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .arg_required_else_help(true)
        .subcommand(subcommand_chat())
        .subcommand(subcommand_learn())
        .subcommand(subcommand_serve())
        .arg(arg_gemini_token())
        .arg(arg_gemini_url())
        .arg(arg_health_check_timeout())
        .arg(arg_model())
        .arg(arg_serve_address())
        .arg(arg_system_instruction())
        .arg(arg_username());
}

fn build_backend(matches: &ArgMatches) -> Result<BackendBox> {
    let token = match matches.get_one::<String>("gemini-token") {
        Some(token) => token.to_string(),
        None => {
            bail!("Gemini API key not found. Set the GEMINI_API_KEY environment variable or pass --gemini-token.")
        }
    };

    let backend: BackendBox = Box::new(Gemini::new(
        &Config::get(ConfigKey::GeminiURL),
        &Config::get(ConfigKey::Model),
        &token,
        &Config::get(ConfigKey::HealthCheckTimeout),
    ));

    return Ok(backend);
}

pub async fn parse() -> Result<()> {
    let matches = build().get_matches();
    Config::load(&matches);

    match matches.subcommand() {
        Some(("chat", _)) => {
            let backend = build_backend(&matches)?;
            backend.health_check().await?;

            let session = Session::new(backend, &Config::get(ConfigKey::SystemInstruction))
                .with_greeting(CHAT_GREETING);
            repl::start(session).await?;
        }
        Some(("serve", _)) => {
            let backend = build_backend(&matches)?;
            backend.health_check().await?;

            let session = Session::new(backend, &Config::get(ConfigKey::SystemInstruction));
            server::start(&Config::get(ConfigKey::ServeAddress), session).await?;
        }
        Some(("learn", sub_matches)) => {
            let backend = build_backend(&matches)?;
            backend.health_check().await?;

            let session = Session::new(backend, learn::SYSTEM_INSTRUCTION);
            learn::start(session, PlanRequest::from_matches(sub_matches)).await?;
        }
        _ => {}
    }

    return Ok(());
}
