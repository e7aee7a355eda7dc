//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

/// Arguments for composing four clips
#[derive(Args, Debug)]
pub struct ComposeArgs {
    /// Input video files (exactly 4)
    #[arg(required = true, value_name = "VIDEO")]
    pub videos: Vec<PathBuf>,

    /// Output file path (default: 4split_output.mp4)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Align clips by timestamps found in filenames or metadata
    #[arg(long)]
    pub auto_sync: bool,

    /// Reference video index (0-3) for sync
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=3))]
    pub reference: u8,

    /// Manual offsets in seconds for each video, bypasses auto-sync
    #[arg(long, num_args = 4, value_name = "SECONDS", allow_negative_numbers = true)]
    pub offsets: Option<Vec<f64>>,

    /// Output resolution as WIDTHxHEIGHT (default: 1920x1080)
    #[arg(long)]
    pub resolution: Option<String>,

    /// Layout style (default: 2x2)
    #[arg(long, value_parser = ["2x2", "main+3", "horizontal"])]
    pub layout: Option<String>,

    /// Plan and print the ffmpeg command without running it
    #[arg(long)]
    pub dry_run: bool,

    /// With --dry-run, print the whole plan as JSON
    #[arg(long, requires = "dry_run")]
    pub json: bool,
}
