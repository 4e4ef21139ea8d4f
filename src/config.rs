//! Configuration for the trivia assistant.
//!
//! One TOML file with three sections, each falling back to defaults when
//! missing: `[search]`, `[speech]` and `[server]`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use trivia_search::SearchConfig;

use crate::error::{Result, TriviaError};

/// Environment variable holding the search API key.
pub const API_KEY_ENV: &str = "SERP_API_KEY";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriviaConfig {
    /// Answer resolution: providers, deadline, timeouts, locale.
    pub search: SearchConfig,
    /// Spoken output and typed/spoken input.
    pub speech: SpeechSettings,
    /// HTTP front-end.
    pub server: ServerConfig,
}

/// Speech input/output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechSettings {
    /// Speak answers aloud. When off, answers are only printed and logged.
    pub enabled: bool,
    /// Text-to-speech command. `None` picks the platform default.
    pub command: Option<String>,
    /// Extra arguments placed before the spoken text.
    pub args: Vec<String>,
    /// Announce "Searching for answer to: ..." while resolving.
    pub acknowledge: bool,
    /// How long to wait for a question before giving up on this turn.
    pub listen_timeout_seconds: u64,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            command: None,
            args: Vec::new(),
            acknowledge: true,
            listen_timeout_seconds: 5,
        }
    }
}

impl SpeechSettings {
    /// The TTS command to run: the configured one, or `say` on macOS and
    /// `espeak` elsewhere.
    pub fn resolved_command(&self) -> String {
        match self.command.as_deref().map(str::trim) {
            Some(cmd) if !cmd.is_empty() => cmd.to_owned(),
            _ if cfg!(target_os = "macos") => "say".to_owned(),
            _ => "espeak".to_owned(),
        }
    }
}

/// HTTP front-end bind address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 5000,
        }
    }
}

impl ServerConfig {
    /// `host:port` suitable for binding.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl TriviaConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| TriviaError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| TriviaError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path, e.g. `~/.config/trivia/config.toml`.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("trivia")
            .join("config.toml")
    }

    /// Load `path` if given, else the default path if it exists, else defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Self::default_config_path();
                if default.exists() {
                    Self::from_file(&default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Apply environment overrides. Currently only the search API key.
    pub fn apply_env(&mut self) {
        self.apply_api_key(std::env::var(API_KEY_ENV).ok());
    }

    fn apply_api_key(&mut self, key: Option<String>) {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            tracing::debug!("search API key taken from {API_KEY_ENV}");
            self.search.api_key = Some(key);
        }
    }

    /// Validate every section.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        self.search.validate()?;
        if self.speech.listen_timeout_seconds == 0 {
            return Err(TriviaError::Config(
                "speech.listen_timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.server.host.trim().is_empty() {
            return Err(TriviaError::Config("server.host must not be empty".into()));
        }
        Ok(())
    }
}
