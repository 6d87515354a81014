//! Configuration settings for mocovoice-mcp.
//!
//! Settings come from an optional TOML file and are then overridden by the
//! process environment. The resulting value is immutable for the lifetime of
//! the process.

use crate::error::{MocoVoiceError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Environment variable holding the mocoVoice API key.
pub const ENV_API_KEY: &str = "MOCOVOICE_API_KEY";
/// Environment variable holding the mocoVoice API base URL.
pub const ENV_API_URL: &str = "MOCOVOICE_API_URL";
/// Environment variable holding the allowed root directory.
pub const ENV_ALLOWED_DIR: &str = "ALLOWED_DIR";
pub const ENV_TIMEOUT_SECS: &str = "MOCOVOICE_TIMEOUT_SECS";
pub const ENV_TRANSFER_TIMEOUT_SECS: &str = "MOCOVOICE_TRANSFER_TIMEOUT_SECS";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub api: ApiSettings,
    pub files: FileSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Language sent with new transcription jobs when the caller gives none.
    pub default_language: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            default_language: "ja".to_string(),
        }
    }
}

/// Remote API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// API key sent as `X-API-KEY`.
    pub key: String,
    /// Base URL of the mocoVoice API.
    pub url: String,
    /// Timeout for metadata calls, in seconds.
    pub timeout_secs: u64,
    /// Timeout for the upload and the transcript download, in seconds.
    pub transfer_timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            key: String::new(),
            url: String::new(),
            timeout_secs: 10,
            transfer_timeout_secs: 3600,
        }
    }
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn transfer_timeout(&self) -> Duration {
        Duration::from_secs(self.transfer_timeout_secs)
    }

    /// Parse the configured base URL.
    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.url).map_err(|e| MocoVoiceError::InvalidApiUrl {
            url: self.url.clone(),
            reason: e.to_string(),
        })
    }

    pub fn has_key(&self) -> bool {
        !self.key.trim().is_empty()
    }
}

/// Local file access settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    /// The only directory whose files may be uploaded.
    pub allowed_dir: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            allowed_dir: "/workspace".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file, then the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        let mut settings = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else if path.is_some() {
            return Err(MocoVoiceError::Config(format!(
                "Config file not found: {}",
                config_path.display()
            )));
        } else {
            Settings::default()
        };

        settings.apply_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Override values from environment-style lookups.
    ///
    /// Empty values are ignored so that an exported-but-blank variable does not
    /// clobber the file configuration.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(ENV_API_KEY) {
            self.api.key = key;
        }
        if let Some(url) = get(ENV_API_URL) {
            self.api.url = url;
        }
        if let Some(dir) = get(ENV_ALLOWED_DIR) {
            self.files.allowed_dir = dir;
        }
        if let Some(secs) = get(ENV_TIMEOUT_SECS) {
            self.api.timeout_secs = parse_secs(ENV_TIMEOUT_SECS, &secs)?;
        }
        if let Some(secs) = get(ENV_TRANSFER_TIMEOUT_SECS) {
            self.api.transfer_timeout_secs = parse_secs(ENV_TRANSFER_TIMEOUT_SECS, &secs)?;
        }
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mocovoice")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded allowed root directory.
    pub fn allowed_dir(&self) -> PathBuf {
        Self::expand_path(&self.files.allowed_dir)
    }

    /// Serialize to TOML with the API key masked.
    pub fn to_display_toml(&self) -> Result<String> {
        let mut shown = self.clone();
        if shown.api.has_key() {
            shown.api.key = "********".to_string();
        }
        Ok(toml::to_string_pretty(&shown)?)
    }
}

fn parse_secs(name: &str, value: &str) -> Result<u64> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(MocoVoiceError::Config(format!(
            "{} must be a positive number of seconds, got '{}'",
            name, value
        ))),
    }
}
