use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to write settings to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Grid
    #[serde(rename = "grid.minRows")]
    pub min_rows: usize,

    #[serde(rename = "grid.minCols")]
    pub min_cols: usize,

    // Assistant
    #[serde(rename = "assistant.responseDelayMs")]
    pub response_delay_ms: u64,

    // Import
    #[serde(rename = "import.activateFirstSheet")]
    pub activate_first_imported_sheet: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            min_rows: 50,
            min_cols: 26,
            response_delay_ms: 1500,
            activate_first_imported_sheet: false,
        }
    }
}

const DEFAULT_CONFIG: &str = r#"{
    // Grid (minimum rendered extent)
    "grid.minRows": 50,
    "grid.minCols": 26,

    // Assistant reply delay in milliseconds
    "assistant.responseDelayMs": 1500,

    // Switch to the first imported sheet after an upload
    "import.activateFirstSheet": false
}
"#;

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gridpad");
        config_dir.join("settings.json")
    }

    /// Load settings from the default location, creating a commented
    /// default file on first run.
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            create_default_file(&path);
            return Self::default();
        }
        Self::load_from(&path)
    }

    /// Load settings from `path`, falling back to defaults on any problem.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents).unwrap_or_else(|e| {
                log::warn!("error parsing {}: {}; using defaults", path.display(), e);
                Self::default()
            }),
            Err(e) => {
                log::warn!("error reading {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse settings JSON. Lines starting with `//` are comments.
    pub fn parse(contents: &str) -> Result<Self, serde_json::Error> {
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");
        serde_json::from_str(&cleaned)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| SettingsError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn create_default_file(path: &Path) {
    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            log::warn!("error creating config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG) {
        log::warn!("error writing default settings.json: {}", e);
    }
}
