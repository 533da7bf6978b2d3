use std::str::FromStr;

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_AI_TIMEOUT_SECS: u64 = 5;
const DEFAULT_AI_RATE_REPLENISH_SECS: u64 = 2;
const DEFAULT_AI_RATE_BURST: u32 = 5;

pub struct Config {
    pub database_url: String,
    pub bind_addr: String,

    /// Secret required to sign up as MANAGER or MASTER.
    pub admin_token: String,

    pub ai_api_url: String,
    pub ai_api_key: String,
    pub ai_timeout_secs: u64,
    pub ai_rate_replenish_secs: u64,
    pub ai_rate_burst: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            admin_token: required("ADMIN_TOKEN")?,
            ai_api_url: required("AI_API_URL")?,
            ai_api_key: required("AI_API_KEY")?,
            ai_timeout_secs: optional("AI_TIMEOUT_SECS", DEFAULT_AI_TIMEOUT_SECS)?,
            ai_rate_replenish_secs: optional(
                "AI_RATE_REPLENISH_SECS",
                DEFAULT_AI_RATE_REPLENISH_SECS,
            )?,
            ai_rate_burst: optional("AI_RATE_BURST", DEFAULT_AI_RATE_BURST)?,
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => parse_value(name, &value),
        Err(_) => Ok(default),
    }
}

fn parse_value<T: FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnvVar(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_values() {
        assert_eq!(parse_value::<u64>("AI_TIMEOUT_SECS", " 7 ").unwrap(), 7);
        assert!(matches!(
            parse_value::<u32>("AI_RATE_BURST", "many"),
            Err(ConfigError::InvalidEnvVar(name)) if name == "AI_RATE_BURST"
        ));
    }
}
