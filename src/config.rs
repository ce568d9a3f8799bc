use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::format::{Item, StrftimeItems};
use directories::ProjectDirs;
use log::{debug, error};
use serde::{Deserialize, Serialize};

use crate::{NotesError, Result, DEFAULT_DATE_FORMAT, DEFAULT_PREVIEW_LENGTH};

/// File name used for exports unless configured otherwise.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "notesAppData.json";

const CONFIG_FILE_NAME: &str = "config.json";

/// Application configuration settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Directory the export file is written to
    pub export_dir: PathBuf,

    /// Fixed name of the export file
    pub export_file_name: String,

    /// strftime layout for dates older than a week
    pub date_format: String,

    /// Characters of note content shown in note lists
    pub preview_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        let export_dir = project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            export_dir,
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            preview_length: DEFAULT_PREVIEW_LENGTH,
        }
    }
}

impl Config {
    /// Loads the configuration.
    ///
    /// An explicit `path` must exist. Without one, `config.json` in the
    /// platform config directory is used when present, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) if !p.exists() => {
                return Err(NotesError::FileNotFound {
                    path: p.to_path_buf(),
                })
            }
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) if p.exists() => p,
                _ => {
                    debug!("No configuration file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        debug!("Loading configuration from {}", path.display());
        let text = fs::read_to_string(&path).map_err(|e| {
            error!("Failed to read config file {}: {}", path.display(), e);
            NotesError::Io(e)
        })?;
        Self::from_json(&text)
    }

    /// Parses and validates a JSON configuration. Missing fields take their
    /// defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(text).map_err(|e| NotesError::ConfigError {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.export_file_name.trim().is_empty() {
            return Err(NotesError::ConfigError {
                message: "export_file_name must not be empty".to_string(),
            });
        }
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(NotesError::ConfigError {
                message: format!("invalid date_format '{}'", self.date_format),
            });
        }
        Ok(())
    }

    /// Where `export` writes by default.
    pub fn export_path(&self) -> PathBuf {
        self.export_dir.join(&self.export_file_name)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "secnotes", "secnotes")
}

fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
