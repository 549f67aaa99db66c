use crate::core::recognizer::RecognizerConfig;
use crate::core::sanitizer::DEFAULT_MAX_INPUT_CHARS;
use crate::core::scanner::DEFAULT_ADJACENCY_WINDOW;
use crate::error::{ValutaError, ValutaResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the config file location
pub const CONFIG_ENV: &str = "VALUTA_CONFIG";

/// Widest currency window the scanner accepts
const MAX_ADJACENCY_WINDOW: usize = 16;

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Engine limits
    pub max_input_chars: usize,
    pub adjacency_window: usize,

    // Behaviour
    pub strict_by_default: bool,
    pub log_level: Option<String>,

    // Conversion
    pub rates_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
            adjacency_window: DEFAULT_ADJACENCY_WINDOW,
            strict_by_default: false,
            log_level: None,
            rates_path: None,
        }
    }
}

impl Config {
    /// Load config from `$VALUTA_CONFIG` or the user config dir
    pub fn load() -> ValutaResult<Self> {
        Self::load_from(&config_path())
    }

    /// Load config from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> ValutaResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        match serde_json::from_str::<Self>(&content) {
            Ok(config) => {
                config.validate()?;
                Ok(config)
            }
            Err(e) => {
                // Graceful degradation: log warning and use defaults
                tracing::warn!("Config file corrupted or invalid, using defaults: {}", e);
                // Backup corrupt file for debugging
                let backup_path = path.with_extension("json.corrupt");
                let _ = std::fs::rename(path, &backup_path);
                Ok(Self::default())
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> ValutaResult<()> {
        self.save_to(&config_path())
    }

    /// Save config to a specific file
    pub fn save_to(&self, path: &Path) -> ValutaResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject limits the engine cannot work with
    pub fn validate(&self) -> ValutaResult<()> {
        if self.max_input_chars == 0 {
            return Err(ValutaError::Config(
                "max_input_chars must be greater than zero".to_string(),
            ));
        }
        if self.adjacency_window > MAX_ADJACENCY_WINDOW {
            return Err(ValutaError::Config(format!(
                "adjacency_window {} exceeds {}",
                self.adjacency_window, MAX_ADJACENCY_WINDOW
            )));
        }
        Ok(())
    }
}

impl From<&Config> for RecognizerConfig {
    fn from(config: &Config) -> Self {
        Self {
            max_input_chars: config.max_input_chars,
            adjacency_window: config.adjacency_window,
        }
    }
}

pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(path);
    }

    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("valuta")
        .join("config.json")
}
