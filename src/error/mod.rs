//! Error handling module for QuadSync

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for QuadSync operations
#[derive(Error, Debug)]
pub enum SyncError {
    /// Wrong number of input clips
    #[error("Exactly {expected} videos required, got {actual}")]
    InputCount { expected: usize, actual: usize },

    /// One or more input files do not exist
    #[error("File not found: {}", display_paths(.paths))]
    MissingFiles { paths: Vec<PathBuf> },

    /// Reference index outside the clip list
    #[error("Reference index {index} is out of range for {count} clips")]
    InvalidReference { index: usize, count: usize },

    /// Offset list does not line up with the clip list
    #[error("Expected {expected} offsets, got {actual}")]
    OffsetCount { expected: usize, actual: usize },

    /// Negative or non-finite offset value
    #[error("Invalid offset at index {index}: {value}")]
    InvalidOffset { index: usize, value: f64 },

    /// Resolution string is not WxH with positive integers
    #[error("Invalid resolution: {value}. Expected WIDTHxHEIGHT, e.g. 1920x1080")]
    InvalidResolution { value: String },

    /// Unknown layout name
    #[error("Invalid layout: {value}. Valid layouts: 2x2, main+3, horizontal")]
    InvalidLayout { value: String },

    /// ffprobe exited with a failure status
    #[error("ffprobe failed for {}: {message}", .path.display())]
    Probe { path: PathBuf, message: String },

    /// ffprobe output could not be decoded
    #[error("Failed to parse ffprobe output for {}: {message}", .path.display())]
    ProbeParse { path: PathBuf, message: String },

    /// The clips share no playable window after trimming
    #[error("Clips do not overlap after applying offsets (shortest remaining duration {duration:.3}s)")]
    NoOverlap { duration: f64 },

    /// ffmpeg exited with a failure status
    #[error("ffmpeg failed ({status}): {stderr}")]
    Encode { status: String, stderr: String },

    /// External tool could not be started
    #[error("Failed to launch {tool}: {source}")]
    ToolLaunch {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file error
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for QuadSync operations
pub type SyncResult<T> = std::result::Result<T, SyncError>;
