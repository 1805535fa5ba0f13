#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::env;

use clap::ArgMatches;
use dashmap::DashMap;
use once_cell::sync::Lazy;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are 'INGRES Assistant', a helpful and friendly virtual assistant specialized in the INGRES relational database management system (RDBMS). Your role is to provide clear, accurate, and concise answers to questions about INGRES, its features, SQL queries related to it, general database concepts and excel formulas. If a question is outside of this scope, politely state that you specialize in INGRES and cannot answer.";

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    GeminiURL,
    HealthCheckTimeout,
    Model,
    ServeAddress,
    SystemInstruction,
    Username,
}

const CONFIG_KEYS: [ConfigKey; 6] = [
    ConfigKey::GeminiURL,
    ConfigKey::HealthCheckTimeout,
    ConfigKey::Model,
    ConfigKey::ServeAddress,
    ConfigKey::SystemInstruction,
    ConfigKey::Username,
];

impl ToString for ConfigKey {
    fn to_string(&self) -> String {
        match self {
            ConfigKey::GeminiURL => return String::from("gemini-url"),
            ConfigKey::HealthCheckTimeout => return String::from("health-check-timeout"),
            ConfigKey::Model => return String::from("model"),
            ConfigKey::ServeAddress => return String::from("serve-address"),
            ConfigKey::SystemInstruction => return String::from("system-instruction"),
            ConfigKey::Username => return String::from("username"),
        }
    }
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        if key == ConfigKey::Username {
            let mut user = env::var("USER").unwrap_or_else(|_| return "".to_string());
            if user.is_empty() {
                user = "User".to_string();
            }

            return user;
        }

        let res = match key {
            ConfigKey::GeminiURL => "https://generativelanguage.googleapis.com",
            ConfigKey::HealthCheckTimeout => "1000",
            ConfigKey::Model => "gemini-2.5-flash",
            ConfigKey::ServeAddress => "0.0.0.0:5000",
            ConfigKey::SystemInstruction => DEFAULT_SYSTEM_INSTRUCTION,
            ConfigKey::Username => "",
        };

        return res.to_string();
    }

    /// Seeds every key with its default, then applies any overrides present in
    /// the parsed CLI matches. Called once at startup before any session is
    /// created.
    pub fn load(matches: &ArgMatches) {
        for key in CONFIG_KEYS {
            Config::set(key, &Config::default(key));
            if let Some(value) = matches.get_one::<String>(&key.to_string()) {
                Config::set(key, value);
            }
        }
    }
}
