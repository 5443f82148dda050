use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};
use hangman_core::validate_mistakes_allowed;
use hangman_persistence::connection::DEFAULT_DATABASE_URL;
use hangman_types::DEFAULT_MISTAKES_ALLOWED;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub default_mistakes_allowed: i32,
    pub stats_refresh_seconds: u64,
}

impl Config {
    /// Start from `Config::default()` and override each field that is set
    /// in the environment
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_env("PORT", defaults.port)?,
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            default_mistakes_allowed: parse_env(
                "DEFAULT_MISTAKES_ALLOWED",
                defaults.default_mistakes_allowed,
            )?,
            stats_refresh_seconds: parse_env(
                "STATS_REFRESH_SECONDS",
                defaults.stats_refresh_seconds,
            )?,
        };

        validate_mistakes_allowed(config.default_mistakes_allowed)
            .context("Invalid DEFAULT_MISTAKES_ALLOWED")?;
        if config.stats_refresh_seconds == 0 {
            anyhow::bail!("STATS_REFRESH_SECONDS must be greater than zero");
        }

        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            default_mistakes_allowed: DEFAULT_MISTAKES_ALLOWED,
            stats_refresh_seconds: 60,
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(value) => value
            .parse()
            .with_context(|| format!("Invalid {}: {:?}", key, value)),
        Err(_) => Ok(default),
    }
}
