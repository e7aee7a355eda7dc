//! Configuration initialization and hierarchy management
//!
//! Precedence: CLI > environment > config file > defaults.

use std::path::PathBuf;

use crate::adapters::toml_config::{FileConfig, TomlConfigAdapter};
use crate::domain::model::{Layout, Resolution};
use crate::error::SyncResult;
use crate::utils::logging::LogLevel;

/// Default output file name
pub const DEFAULT_OUTPUT: &str = "4split_output.mp4";

const ENV_FFMPEG: &str = "QUADSYNC_FFMPEG";
const ENV_FFPROBE: &str = "QUADSYNC_FFPROBE";
const ENV_OUTPUT: &str = "QUADSYNC_OUTPUT";
const ENV_RESOLUTION: &str = "QUADSYNC_RESOLUTION";
const ENV_LAYOUT: &str = "QUADSYNC_LAYOUT";
const ENV_LOG_LEVEL: &str = "QUADSYNC_LOG_LEVEL";

/// Values supplied on the command line, `None` when not given
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_path: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub resolution: Option<String>,
    pub layout: Option<String>,
    pub log_level: Option<String>,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub ffmpeg: String,
    pub ffprobe: String,
    pub output: PathBuf,
    pub resolution: Resolution,
    pub layout: Layout,
    pub log_level: LogLevel,
    /// Config file that was read, if any
    pub config_source: Option<PathBuf>,
}

/// Resolve settings from the process environment and the config file
pub fn initialize_configuration(cli: &CliOverrides) -> SyncResult<Settings> {
    let (file, source) = TomlConfigAdapter::discover(cli.config_path.as_deref())?;
    resolve_settings(cli, |key| std::env::var(key).ok(), file, source)
}

/// Merge the layers. `env` looks up one environment variable.
pub fn resolve_settings<E>(
    cli: &CliOverrides,
    env: E,
    file: FileConfig,
    config_source: Option<PathBuf>,
) -> SyncResult<Settings>
where
    E: Fn(&str) -> Option<String>,
{
    let pick = |cli_value: Option<String>, key: &str, file_value: Option<String>| {
        cli_value
            .or_else(|| env(key).filter(|v| !v.trim().is_empty()))
            .or(file_value)
    };

    let ffmpeg = pick(None, ENV_FFMPEG, file.tools.ffmpeg).unwrap_or_else(|| "ffmpeg".to_string());
    let ffprobe =
        pick(None, ENV_FFPROBE, file.tools.ffprobe).unwrap_or_else(|| "ffprobe".to_string());

    let output = cli
        .output
        .clone()
        .or_else(|| env(ENV_OUTPUT).filter(|v| !v.trim().is_empty()).map(PathBuf::from))
        .or(file.defaults.output)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let resolution = pick(cli.resolution.clone(), ENV_RESOLUTION, file.defaults.resolution)
        .map(|v| Resolution::parse(&v))
        .transpose()?
        .unwrap_or_default();

    let layout = pick(cli.layout.clone(), ENV_LAYOUT, file.defaults.layout)
        .map(|v| v.parse::<Layout>())
        .transpose()?
        .unwrap_or_default();

    let log_level = pick(cli.log_level.clone(), ENV_LOG_LEVEL, file.defaults.log_level)
        .map(|v| v.parse::<LogLevel>())
        .transpose()?
        .unwrap_or_default();

    Ok(Settings {
        ffmpeg,
        ffprobe,
        output,
        resolution,
        layout,
        log_level,
        config_source,
    })
}
