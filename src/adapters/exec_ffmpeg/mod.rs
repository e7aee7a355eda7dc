//! FFmpeg execution adapter
//!
//! Runs a planned [`EncodeCommand`] as a subprocess and waits for it.

use std::process::Stdio;
use std::time::Instant;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::domain::model::*;
use crate::error::{SyncError, SyncResult};
use crate::ports::*;

/// FFmpeg-based execution adapter
#[derive(Default)]
pub struct FFmpegAdapter;

impl FFmpegAdapter {
    /// Create new FFmpeg adapter
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EncodePort for FFmpegAdapter {
    async fn encode(&self, command: &EncodeCommand) -> SyncResult<EncodeReport> {
        debug!(command = %command.to_command_line(), "Running ffmpeg");
        let started = Instant::now();

        let output = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| SyncError::ToolLaunch {
                tool: command.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(SyncError::Encode {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let elapsed = started.elapsed();
        info!(
            output = %command.output.display(),
            elapsed_secs = elapsed.as_secs_f64(),
            "ffmpeg finished"
        );

        Ok(EncodeReport {
            output: command.output.clone(),
            elapsed,
        })
    }
}
