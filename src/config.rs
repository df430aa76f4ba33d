//! Configuration handling for Tasklight
//!
//! Configuration is read from `tasklight.toml` in the working directory when
//! present; every field has a default so the file is optional.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration file name, looked up in the working directory
pub const CONFIG_FILE: &str = "tasklight.toml";

const DEFAULT_MESSAGE_LIMIT: usize = 50;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Longest accepted task message, enforced at the input surface
    pub message_limit: usize,

    /// Seed file loaded into the session store at startup
    pub seed: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            message_limit: DEFAULT_MESSAGE_LIMIT,
            seed: None,
        }
    }
}

impl Config {
    /// Loads configuration from `tasklight.toml` in the given directory,
    /// falling back to defaults when the file is absent
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.message_limit == 0 {
            return Err(ConfigError::Invalid(
                "message_limit must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Bounds a message to the configured limit, respecting char boundaries
    pub fn bound_message<'a>(&self, message: &'a str) -> &'a str {
        match message.char_indices().nth(self.message_limit) {
            Some((idx, _)) => &message[..idx],
            None => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_when_file_is_absent() {
        let dir = TempDir::new().unwrap();

        let config = Config::load(dir.path()).unwrap();

        assert_eq!(config.message_limit, DEFAULT_MESSAGE_LIMIT);
        assert!(config.seed.is_none());
    }

    #[test]
    fn parses_config_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "message_limit = 80\nseed = \"fixtures/tasks.json\"\n",
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();

        assert_eq!(config.message_limit, 80);
        assert_eq!(config.seed, Some(PathBuf::from("fixtures/tasks.json")));
    }

    #[test]
    fn rejects_zero_message_limit() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "message_limit = 0\n").unwrap();

        assert!(Config::load(dir.path()).is_err());
    }

    #[test]
    fn bound_message_cuts_at_the_limit() {
        let config = Config {
            message_limit: 5,
            ..Config::default()
        };

        assert_eq!(config.bound_message("short"), "short");
        assert_eq!(config.bound_message("longer than five"), "longe");
    }

    #[test]
    fn bound_message_respects_char_boundaries() {
        let config = Config {
            message_limit: 3,
            ..Config::default()
        };

        assert_eq!(config.bound_message("héllo"), "hél");
    }
}
