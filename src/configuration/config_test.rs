use anyhow::Result;

use super::Config;
use super::ConfigKey;
use crate::application::cli;

// A single test covers defaults and overrides. The config store is process
// wide, so splitting these into parallel tests would race on shared keys.
#[test]
fn it_loads_defaults_and_applies_cli_overrides() -> Result<()> {
    let matches = cli::build().try_get_matches_from(vec!["mentor", "chat"])?;
    Config::load(&matches);

    assert_eq!(
        Config::get(ConfigKey::GeminiURL),
        "https://generativelanguage.googleapis.com"
    );
    assert_eq!(Config::get(ConfigKey::ServeAddress), "0.0.0.0:5000");
    assert_eq!(Config::get(ConfigKey::HealthCheckTimeout), "1000");
    assert!(!Config::get(ConfigKey::Username).is_empty());
    assert!(Config::get(ConfigKey::SystemInstruction).contains("INGRES"));

    let matches = cli::build().try_get_matches_from(vec![
        "mentor",
        "chat",
        "--model",
        "gemini-2.5-pro",
        "--serve-address",
        "127.0.0.1:8080",
    ])?;
    Config::load(&matches);

    assert_eq!(Config::get(ConfigKey::Model), "gemini-2.5-pro");
    assert_eq!(Config::get(ConfigKey::ServeAddress), "127.0.0.1:8080");

    return Ok(());
}

#[test]
fn it_defaults_the_username_to_the_os_user() {
    assert!(!Config::default(ConfigKey::Username).is_empty());
}
