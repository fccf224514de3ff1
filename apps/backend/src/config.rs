//! Service configuration read from the environment

use std::path::PathBuf;
use std::time::Duration;

use flashforge_core::{ColorSpec, HighlightPalette};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a number, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// JSON file seeding the in-memory dictionary.
    pub dictionary_path: Option<PathBuf>,
    /// Upper bound on a single pending choice. `None` waits forever.
    pub choice_timeout: Option<Duration>,
    /// How long finished lookup sessions stay readable.
    pub session_retention: Duration,
    pub palette: HighlightPalette,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            dictionary_path: None,
            choice_timeout: None,
            session_retention: Duration::from_secs(600),
            palette: HighlightPalette::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(value) => parse_number("PORT", &value)?,
            None => defaults.port,
        };
        let choice_timeout = match var("CHOICE_TIMEOUT_SECS") {
            Some(value) => Some(Duration::from_secs(parse_number(
                "CHOICE_TIMEOUT_SECS",
                &value,
            )?)),
            None => None,
        };
        let session_retention = match var("SESSION_RETENTION_SECS") {
            Some(value) => Duration::from_secs(parse_number("SESSION_RETENTION_SECS", &value)?),
            None => defaults.session_retention,
        };

        let mut palette = defaults.palette;
        if let Some(color) = var("ADDED_COLOR") {
            palette.added = ColorSpec::new(color);
        }
        if let Some(color) = var("REMOVED_COLOR") {
            palette.removed = ColorSpec::new(color);
        }

        Ok(Self {
            host: var("HOST").unwrap_or(defaults.host),
            port,
            dictionary_path: var("DICTIONARY_PATH").map(PathBuf::from),
            choice_timeout,
            session_retention,
            palette,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_number<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        var,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.addr(), "0.0.0.0:3000");
        assert_eq!(config.choice_timeout, None);
        assert_eq!(config.dictionary_path, None);
        assert_eq!(config.session_retention, Duration::from_secs(600));
        assert_eq!(config.palette, HighlightPalette::default());
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("CHOICE_TIMEOUT_SECS", "90"),
            ("SESSION_RETENTION_SECS", "30"),
            ("DICTIONARY_PATH", "dict.json"),
            ("ADDED_COLOR", "#00ff00"),
        ])
        .unwrap();
        assert_eq!(config.addr(), "127.0.0.1:8080");
        assert_eq!(config.choice_timeout, Some(Duration::from_secs(90)));
        assert_eq!(config.session_retention, Duration::from_secs(30));
        assert_eq!(config.dictionary_path, Some(PathBuf::from("dict.json")));
        assert_eq!(config.palette.added.color, "#00ff00");
        assert_eq!(config.palette.removed.color, "#cc0000");
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = config(&[("PORT", "  "), ("HOST", "")]).unwrap();
        assert_eq!(config.addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_invalid_port() {
        let err = config(&[("PORT", "eighty")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                var: "PORT",
                value: "eighty".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_timeout() {
        assert!(config(&[("CHOICE_TIMEOUT_SECS", "-1")]).is_err());
    }
}
