//! CLI module for QuadSync
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::Parser;

pub mod args;
pub mod commands;

/// QuadSync
///
/// Synchronizes four independently recorded clips by their start timestamps
/// and composites them into one 2x2 grid video with ffmpeg.
#[derive(Parser, Debug)]
#[command(name = "quadsync")]
#[command(about = "QuadSync - timestamp-synchronized 2x2 video compositing")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub compose: args::ComposeArgs,

    /// Logging level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log output format (text, json)
    #[arg(long, default_value = "text")]
    pub log_format: String,

    /// Configuration file (default: ./quadsync.toml if present)
    #[arg(long, env = "QUADSYNC_CONFIG")]
    pub config: Option<PathBuf>,
}
