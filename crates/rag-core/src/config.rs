use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TEMPERATURE: f32 = 0.0;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 800;

const CONFIG_FILE_PATH: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,
}

/// Runtime settings for the course assistant.
///
/// Loaded from `config.toml` (or the file named by `RAG_CONFIG`) and then
/// overridden by environment variables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_max_output_tokens() -> u32 {
    DEFAULT_MAX_OUTPUT_TOKENS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: default_api_base(),
            model: default_model(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

impl Config {
    /// Load the file named by `RAG_CONFIG`, falling back to `./config.toml`,
    /// then apply environment overrides. A missing file is not an error.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os("RAG_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_PATH));

        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            log::debug!("no config file at {}, using defaults", path.display());
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str::<Config>(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply overrides from a key lookup (the process environment in
    /// production, a map in tests).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_key) = lookup("GEMINI_API_KEY").filter(|v| !v.trim().is_empty()) {
            self.api_key = Some(api_key);
        }
        if let Some(api_base) = lookup("GEMINI_API_BASE") {
            self.api_base = api_base;
        }
        if let Some(model) = lookup("AI_MODEL") {
            self.model = model;
        }
        if let Some(value) = lookup("TEMPERATURE") {
            self.temperature = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "TEMPERATURE",
                    value,
                })?;
        }
        if let Some(value) = lookup("MAX_OUTPUT_TOKENS") {
            self.max_output_tokens = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "MAX_OUTPUT_TOKENS",
                    value,
                })?;
        }
        Ok(())
    }

    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref().ok_or(ConfigError::MissingApiKey)
    }
}
