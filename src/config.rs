//! Client configuration.

use std::path::Path;
use std::time::Duration;

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::notify::Notifications;

/// Environment variable that overrides the configured server URL.
pub const SERVER_URL_ENV: &str = "CONNECT_FOUR_SERVER_URL";

/// Configuration for the board client.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the board authority.
    #[serde(default = "default_server_url")]
    server_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    request_timeout_secs: u64,

    /// Rows for a new game.
    #[serde(default = "default_height")]
    default_height: usize,

    /// Columns for a new game.
    #[serde(default = "default_width")]
    default_width: usize,

    /// Win length for a new game.
    #[serde(default = "default_win")]
    default_win: usize,

    /// How long error notifications stay up.
    #[serde(default = "default_error_display_secs")]
    error_display_secs: u64,

    /// How long success notifications stay up.
    #[serde(default = "default_success_display_secs")]
    success_display_secs: u64,
}

fn default_server_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_height() -> usize {
    6
}

fn default_width() -> usize {
    7
}

fn default_win() -> usize {
    4
}

fn default_error_display_secs() -> u64 {
    5
}

fn default_success_display_secs() -> u64 {
    3
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            request_timeout_secs: default_request_timeout_secs(),
            default_height: default_height(),
            default_width: default_width(),
            default_win: default_win(),
            error_display_secs: default_error_display_secs(),
            success_display_secs: default_success_display_secs(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        info!(server_url = %config.server_url, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file if it exists, otherwise falls back to defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies the environment override for the server URL.
    #[instrument(skip(self))]
    pub fn with_env_overrides(self) -> Self {
        match std::env::var(SERVER_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => {
                info!(server_url = %url, "Server URL overridden from environment");
                self.with_server_url(url)
            }
            _ => self,
        }
    }

    /// Replaces the server URL.
    pub fn with_server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = url.into();
        self
    }

    /// Replaces the new-game dimensions, keeping any that are `None`.
    pub fn with_dimensions(
        mut self,
        height: Option<usize>,
        width: Option<usize>,
        win: Option<usize>,
    ) -> Self {
        self.default_height = height.unwrap_or(self.default_height);
        self.default_width = width.unwrap_or(self.default_width);
        self.default_win = win.unwrap_or(self.default_win);
        self
    }

    /// Request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Notification slots using the configured display durations.
    pub fn notifications(&self) -> Notifications {
        Notifications::new(
            Duration::from_secs(self.error_display_secs),
            Duration::from_secs(self.success_display_secs),
        )
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = ClientConfig::from_toml("").expect("parse");
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(*config.error_display_secs(), 5);
        assert_eq!(*config.success_display_secs(), 3);
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = ClientConfig::from_toml(
            r#"
server_url = "http://example.test:9000"
default_width = 9
"#,
        )
        .expect("parse");
        assert_eq!(config.server_url(), "http://example.test:9000");
        assert_eq!(*config.default_width(), 9);
        assert_eq!(*config.default_height(), 6);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = ClientConfig::from_toml("server_url = [").expect_err("invalid");
        assert!(err.message.starts_with("Failed to parse config"));
    }

    #[test]
    fn test_dimension_overrides() {
        let config = ClientConfig::default().with_dimensions(Some(8), None, Some(5));
        assert_eq!(
            (*config.default_height(), *config.default_width(), *config.default_win()),
            (8, 7, 5)
        );
    }
}
