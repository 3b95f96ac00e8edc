use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout_ms: u64,
    /// Horizontal drag distance, in display units, a release must exceed to
    /// dismiss the card.
    pub swipe_threshold: f32,
    pub cooldown_ms: u64,
    pub cooldown_step_ms: u64,
    /// How many more words to try when the dictionary has no entry for one.
    pub max_not_found_retries: u32,
    /// Fetch the next word while the current one is on screen.
    pub prefetch: bool,
    /// Display units covered by one terminal column while dragging.
    pub units_per_column: f32,
    /// Newline separated words to pick from instead of the built-in list.
    pub word_list: Option<PathBuf>,
    /// Command used to play pronunciations; the audio url is appended.
    pub audio_player: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.dictionaryapi.dev/api/v2/entries/en".to_owned(),
            request_timeout_ms: 10_000,
            swipe_threshold: 150.0,
            cooldown_ms: 1000,
            cooldown_step_ms: 100,
            max_not_found_retries: 5,
            prefetch: false,
            units_per_column: 10.0,
            word_list: None,
            audio_player: vec![
                "mpv".to_owned(),
                "--no-video".to_owned(),
                "--really-quiet".to_owned(),
            ],
        }
    }
}

impl Config {
    /// `~/.config/swipe-lingo/config.toml` or the platform equivalent.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("swipe-lingo").join("config.toml")
    }

    /// Loads the default config file, falling back to defaults when it does
    /// not exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: &str| Err(ConfigError::Invalid(message.to_owned()));
        if !(self.swipe_threshold > 0.0) {
            return invalid("swipe_threshold must be positive");
        }
        if self.cooldown_step_ms == 0 {
            return invalid("cooldown_step_ms must be positive");
        }
        if self.cooldown_step_ms > self.cooldown_ms && self.cooldown_ms > 0 {
            return invalid("cooldown_step_ms must not exceed cooldown_ms");
        }
        if self.request_timeout_ms == 0 {
            return invalid("request_timeout_ms must be positive");
        }
        if !(self.units_per_column > 0.0) {
            return invalid("units_per_column must be positive");
        }
        if self.audio_player.first().map_or(true, |program| program.is_empty()) {
            return invalid("audio_player needs a program");
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    pub fn cooldown_step(&self) -> Duration {
        Duration::from_millis(self.cooldown_step_ms)
    }
}
