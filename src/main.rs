//! QuadSync
//!
//! Synchronizes four independently recorded clips and composites them into a
//! single 2x2 grid video.
//!
//! # Usage
//!
//! ```bash
//! quadsync cam1.mp4 cam2.mp4 cam3.mp4 cam4.mp4 -o grid.mp4
//! quadsync *.mp4 --auto-sync --reference 1
//! quadsync a.mp4 b.mp4 c.mp4 d.mp4 --offsets 0 2.5 0 1.2 --dry-run
//! ```

use std::process::ExitCode;

use clap::Parser;

use quadsync_cli::cli::{commands, Cli};

/// Main entry point for the QuadSync CLI application
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Usage errors exit 1 like every other failure; help and version exit 0
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match commands::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
