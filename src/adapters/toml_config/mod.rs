// TOML config adapter - Configuration file loading

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{SyncError, SyncResult};

/// File looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "quadsync.toml";

/// External tool locations
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsSection {
    pub ffmpeg: Option<String>,
    pub ffprobe: Option<String>,
}

/// Defaults for values the CLI can also set
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsSection {
    pub output: Option<PathBuf>,
    pub resolution: Option<String>,
    pub layout: Option<String>,
    pub log_level: Option<String>,
}

/// Contents of a `quadsync.toml` file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub tools: ToolsSection,
    pub defaults: DefaultsSection,
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Parse configuration from a TOML string
    pub fn parse(content: &str) -> SyncResult<FileConfig> {
        toml::from_str(content).map_err(|e| SyncError::Config {
            message: format!("Failed to parse TOML config: {e}"),
        })
    }

    /// Load a configuration file that must exist
    pub fn load(path: &Path) -> SyncResult<FileConfig> {
        let content = std::fs::read_to_string(path).map_err(|e| SyncError::Config {
            message: format!("Failed to read config file {}: {e}", path.display()),
        })?;
        Self::parse(&content)
    }

    /// Load `path` if given, else the default file if present.
    ///
    /// Returns the file actually read alongside its contents.
    pub fn discover(path: Option<&Path>) -> SyncResult<(FileConfig, Option<PathBuf>)> {
        match path {
            Some(path) => Ok((Self::load(path)?, Some(path.to_path_buf()))),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Ok((Self::load(&default)?, Some(default)))
                } else {
                    Ok((FileConfig::default(), None))
                }
            }
        }
    }
}
