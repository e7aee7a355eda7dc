// Compose interactor - Orchestrates the synchronize-and-composite use case

use std::sync::Arc;

use tracing::{error, info};

use crate::app::offset_calculator::OffsetCalculator;
use crate::app::timestamp_resolver::TimestampResolver;
use crate::domain::model::*;
use crate::error::{SyncError, SyncResult};
use crate::planner::CompositionPlanner;
use crate::ports::*;
use crate::utils::time::format_clock;

/// Interactor for the composite use case
pub struct ComposeInteractor {
    encode_port: Arc<dyn EncodePort>,
    fs_port: Arc<dyn FsPort>,
    offset_calculator: OffsetCalculator,
    planner: CompositionPlanner,
}

impl ComposeInteractor {
    /// Create new compose interactor with injected ports
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        encode_port: Arc<dyn EncodePort>,
        fs_port: Arc<dyn FsPort>,
        ffmpeg: impl Into<String>,
    ) -> Self {
        let resolver = Arc::new(TimestampResolver::new(Arc::clone(&probe_port)));
        Self {
            encode_port,
            fs_port,
            offset_calculator: OffsetCalculator::new(resolver),
            planner: CompositionPlanner::new(probe_port, ffmpeg),
        }
    }

    /// Validate inputs, choose offsets, plan and (unless dry-running) encode
    pub async fn execute(&self, request: ComposeRequest) -> SyncResult<ComposeOutcome> {
        if request.clips.len() != GRID_CLIPS {
            return Err(SyncError::InputCount {
                expected: GRID_CLIPS,
                actual: request.clips.len(),
            });
        }

        self.ensure_inputs_exist(&request).await?;

        let (offsets, offset_report) = self.choose_offsets(&request).await?;

        let plan = self
            .planner
            .plan(
                &request.clips,
                &offsets,
                request.layout,
                request.resolution,
                &request.output,
            )
            .await?;

        if request.dry_run {
            info!("Dry run, skipping encode");
            return Ok(ComposeOutcome {
                plan,
                offset_report,
                encode: None,
            });
        }

        info!("Running ffmpeg...");
        info!("Output: {}", request.output.display());
        info!("Duration: {:.2}s ({})", plan.duration, format_clock(plan.duration));
        info!("Offsets: {:?}", plan.offsets.as_slice());

        let report = self.encode_port.encode(&plan.command).await?;
        info!(
            "Success! Created {} in {}",
            report.output.display(),
            format_clock(report.elapsed.as_secs_f64())
        );

        Ok(ComposeOutcome {
            plan,
            offset_report,
            encode: Some(report),
        })
    }

    /// Every input must exist before anything is probed
    async fn ensure_inputs_exist(&self, request: &ComposeRequest) -> SyncResult<()> {
        let mut missing = Vec::new();
        for clip in &request.clips {
            if !self.fs_port.file_exists(clip).await? {
                error!("File not found: {}", clip.display());
                missing.push(clip.clone());
            }
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(SyncError::MissingFiles { paths: missing })
        }
    }

    async fn choose_offsets(
        &self,
        request: &ComposeRequest,
    ) -> SyncResult<(OffsetSet, Option<OffsetReport>)> {
        match &request.offsets {
            OffsetMode::Manual(values) => {
                if values.len() != request.clips.len() {
                    return Err(SyncError::OffsetCount {
                        expected: request.clips.len(),
                        actual: values.len(),
                    });
                }
                Ok((OffsetSet::new(values.clone())?, None))
            }
            OffsetMode::Auto { reference } => {
                info!("Auto-detecting timestamps...");
                let report = self
                    .offset_calculator
                    .compute_offsets(&request.clips, *reference)
                    .await?;
                Ok((report.offsets.clone(), Some(report)))
            }
            OffsetMode::None => Ok((OffsetSet::zeros(request.clips.len()), None)),
        }
    }
}
