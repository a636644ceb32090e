//! Configuration types for the scripting host

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Errors raised while loading configuration or resolving script names
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid script name: {0}")]
    InvalidScriptName(String),
}

/// Configuration for script locations and host cadence
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScriptingConfig {
    /// Root directory for all assets
    pub asset_root: PathBuf,
    /// Directory name for scripts (relative to asset_root)
    pub scripts_dir: String,
    /// File extension for script files, without the dot
    pub extension: String,
    /// Script paths registered before the first tick
    pub startup_scripts: Vec<String>,
    /// Host frames per second
    pub tick_rate_hz: u32,
    /// Stop the host after this many frames
    pub max_frames: Option<u64>,
}

impl ScriptingConfig {
    /// Load configuration from a JSON file; missing fields use defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        debug!(path = ?path, config = ?config, "Loaded scripting config");
        Ok(config)
    }

    /// Like [`ScriptingConfig::load`] but falls back to defaults when the file is absent
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = ?path, "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Directory scripts are created in by name
    pub fn scripts_path(&self) -> PathBuf {
        self.asset_root.join(&self.scripts_dir)
    }

    /// Get the full path to a script file
    pub fn script_path(&self, name: &str) -> Result<PathBuf, ConfigError> {
        // Validate name to prevent path traversal
        if name.is_empty() || name.contains("..") || name.contains('/') || name.contains('\\') {
            return Err(ConfigError::InvalidScriptName(name.to_string()));
        }
        let path = self
            .scripts_path()
            .join(format!("{name}.{}", self.extension));
        debug!(name = name, path = ?path, "Generated script path");
        Ok(path)
    }

    /// Sleep budget of one host frame
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.tick_rate_hz.max(1)))
    }
}

impl Default for ScriptingConfig {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("assets"),
            scripts_dir: "scripts".to_string(),
            extension: "ors".to_string(),
            startup_scripts: Vec::new(),
            tick_rate_hz: 60,
            max_frames: None,
        }
    }
}
