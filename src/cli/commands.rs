//! Command implementations

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::app::container::{AppContainer, DefaultAppContainer};
use crate::cli::Cli;
use crate::config_initialization::{initialize_configuration, CliOverrides, Settings};
use crate::domain::model::{ComposeOutcome, ComposeRequest, OffsetMode};
use crate::utils::logging::{init_logging, LogFormat};

/// Resolve configuration, set up logging and run the composition
pub async fn run(cli: Cli) -> Result<()> {
    let overrides = CliOverrides {
        config_path: cli.config.clone(),
        output: cli.compose.output.clone(),
        resolution: cli.compose.resolution.clone(),
        layout: cli.compose.layout.clone(),
        log_level: cli.log_level.clone(),
    };
    let settings = initialize_configuration(&overrides)?;

    let log_format: LogFormat = cli.log_format.parse()?;
    init_logging(settings.log_level, log_format)?;

    if let Some(source) = &settings.config_source {
        info!("Loaded configuration from: {}", source.display());
    }
    debug!(?settings, "Effective settings");

    let request = build_request(&cli, &settings);
    let json = cli.compose.json;

    let container = DefaultAppContainer::new(&settings);
    let outcome = container
        .compose_interactor()
        .execute(request)
        .await
        .context("Composition failed")?;

    print_outcome(&outcome, json)
}

/// Translate parsed arguments into a compose request
pub fn build_request(cli: &Cli, settings: &Settings) -> ComposeRequest {
    let args = &cli.compose;
    let offsets = if let Some(values) = &args.offsets {
        OffsetMode::Manual(values.clone())
    } else if args.auto_sync {
        OffsetMode::Auto {
            reference: usize::from(args.reference),
        }
    } else {
        OffsetMode::None
    };

    ComposeRequest {
        clips: args.videos.clone(),
        output: settings.output.clone(),
        offsets,
        layout: settings.layout,
        resolution: settings.resolution,
        dry_run: args.dry_run,
    }
}

fn print_outcome(outcome: &ComposeOutcome, json: bool) -> Result<()> {
    if outcome.encode.is_some() {
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.plan)?);
    } else {
        println!("{}", outcome.plan.command.to_command_line());
    }
    Ok(())
}
