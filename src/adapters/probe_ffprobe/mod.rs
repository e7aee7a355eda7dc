//! FFprobe adapter for media file probing
//!
//! Runs `ffprobe -show_format -show_streams` with JSON output and reduces the
//! result to a [`MediaInfo`].

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::domain::model::*;
use crate::error::{SyncError, SyncResult};
use crate::ports::*;

const DEFAULT_WIDTH: u32 = 1920;
const DEFAULT_HEIGHT: u32 = 1080;

#[derive(Deserialize)]
struct FfprobeOutput {
    format: Option<FormatInfo>,
    #[serde(default)]
    streams: Vec<StreamInfo>,
}

#[derive(Deserialize)]
struct FormatInfo {
    duration: Option<String>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[derive(Deserialize)]
struct StreamInfo {
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
}

/// FFprobe-based probe adapter
pub struct FFprobeAdapter {
    program: String,
}

impl FFprobeAdapter {
    /// Create adapter invoking the given ffprobe executable
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for FFprobeAdapter {
    fn default() -> Self {
        Self::new("ffprobe")
    }
}

#[async_trait]
impl ProbePort for FFprobeAdapter {
    async fn probe_media(&self, path: &Path) -> SyncResult<MediaInfo> {
        let output = Command::new(&self.program)
            .args([
                "-v",
                "quiet",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
            ])
            .arg(path)
            .output()
            .await
            .map_err(|source| SyncError::ToolLaunch {
                tool: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(SyncError::Probe {
                path: path.to_path_buf(),
                message: if stderr.is_empty() {
                    format!("exited with {}", output.status)
                } else {
                    stderr
                },
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let info = parse_probe_output(path, &stdout)?;
        debug!(
            path = %path.display(),
            duration = info.duration,
            width = info.width,
            height = info.height,
            creation_time = info.creation_time.as_deref().unwrap_or(""),
            "Probed media"
        );
        Ok(info)
    }
}

/// Reduce ffprobe JSON to the fields the synchronizer needs
pub fn parse_probe_output(path: &Path, json: &str) -> SyncResult<MediaInfo> {
    let probe: FfprobeOutput = serde_json::from_str(json).map_err(|e| SyncError::ProbeParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let duration = match probe.format.as_ref().and_then(|f| f.duration.as_deref()) {
        Some(raw) => raw.trim().parse::<f64>().map_err(|_| SyncError::ProbeParse {
            path: path.to_path_buf(),
            message: format!("invalid duration '{raw}'"),
        })?,
        None => 0.0,
    };

    let video_stream = probe
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"));

    let (width, height) = match video_stream {
        Some(stream) => (
            stream.width.unwrap_or(DEFAULT_WIDTH),
            stream.height.unwrap_or(DEFAULT_HEIGHT),
        ),
        None => (DEFAULT_WIDTH, DEFAULT_HEIGHT),
    };

    let creation_time = probe
        .format
        .and_then(|mut f| f.tags.remove("creation_time"));

    Ok(MediaInfo::new(duration, width, height, creation_time))
}
