// Local configuration for the Tagline client.
//
// Global config: `~/.tagline/config.toml`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::annotate::DebounceConfig;
use crate::gateway::ToolSettings;

/// Root directory for Tagline state: `~/.tagline/`.
pub fn global_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".tagline"))
}

/// Path to the global config file: `~/.tagline/config.toml`.
pub fn global_config_path() -> Option<PathBuf> {
    global_dir().map(|d| d.join("config.toml"))
}

/// Global client configuration at `~/.tagline/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Directory containing the `taghive` executable. Empty or unset means
    /// the default search location.
    pub tool_dir: Option<String>,
    /// Annotation rescan settings.
    pub annotation: AnnotationConfig,
}

impl GlobalConfig {
    /// Load from `~/.tagline/config.toml`. Returns defaults if the file
    /// doesn't exist or can't be parsed.
    pub fn load() -> Self {
        global_config_path().and_then(|p| Self::load_from(&p).ok()).unwrap_or_default()
    }

    /// Load from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        toml::from_str(&contents).map_err(ConfigError::Parse)
    }

    /// Save to `~/.tagline/config.toml`.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = global_config_path().ok_or_else(|| {
            ConfigError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "could not determine home directory",
            ))
        })?;
        self.save_to(&path)
    }

    /// Save to a specific path (creates parent directories).
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        let contents = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, contents).map_err(ConfigError::Io)
    }

    /// Gateway settings derived from this config. An empty `tool_dir` string
    /// means "use the default search location", same as unset.
    pub fn tool_settings(&self) -> ToolSettings {
        ToolSettings {
            tool_dir: self
                .tool_dir
                .as_deref()
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from),
        }
    }
}

/// Annotation rescan settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnnotationConfig {
    /// Trailing-edge debounce window for document rescans, in milliseconds.
    /// Clamped to 150–1000.
    pub debounce_ms: u64,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self { debounce_ms: 300 }
    }
}

impl AnnotationConfig {
    pub fn debounce(&self) -> DebounceConfig {
        DebounceConfig::with_millis(self.debounce_ms)
    }
}

// ── Errors ─────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "config I/O error: {e}"),
            Self::Parse(e) => write!(f, "config parse error: {e}"),
            Self::Serialize(e) => write!(f, "config serialize error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}
