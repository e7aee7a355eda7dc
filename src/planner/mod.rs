//! Composition planning
//!
//! Turns four clips and their offsets into a [`CompositionPlan`]: cell
//! geometry, the playable duration after trimming, the filter graph and the
//! ffmpeg command that renders it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::model::*;
use crate::domain::rules::{effective_durations, minimum_duration};
use crate::error::{SyncError, SyncResult};
use crate::ports::ProbePort;

pub mod command;
pub mod filter_graph;

use command::CompositeCommandBuilder;
use filter_graph::FilterGraph;

/// Planner for the 2x2 composite
pub struct CompositionPlanner {
    probe: Arc<dyn ProbePort>,
    ffmpeg: String,
    settings: EncodeSettings,
}

impl CompositionPlanner {
    pub fn new(probe: Arc<dyn ProbePort>, ffmpeg: impl Into<String>) -> Self {
        Self {
            probe,
            ffmpeg: ffmpeg.into(),
            settings: EncodeSettings::default(),
        }
    }

    /// Build the plan. Fails before probing anything unless exactly four
    /// clips and four offsets are given.
    pub async fn plan(
        &self,
        clips: &[PathBuf],
        offsets: &OffsetSet,
        layout: Layout,
        resolution: Resolution,
        output: &Path,
    ) -> SyncResult<CompositionPlan> {
        if clips.len() != GRID_CLIPS {
            return Err(SyncError::InputCount {
                expected: GRID_CLIPS,
                actual: clips.len(),
            });
        }
        if offsets.len() != GRID_CLIPS {
            return Err(SyncError::OffsetCount {
                expected: GRID_CLIPS,
                actual: offsets.len(),
            });
        }

        let cell = layout.cell_size(resolution);
        debug!(%layout, %resolution, cell_width = cell.width, cell_height = cell.height, "Cell geometry");

        let mut durations = Vec::with_capacity(clips.len());
        for clip in clips {
            durations.push(self.probe.probe_media(clip).await?.duration);
        }

        let effective = effective_durations(&durations, offsets);
        let duration = minimum_duration(&effective).unwrap_or(0.0);
        if duration <= 0.0 {
            return Err(SyncError::NoOverlap { duration });
        }

        let graph = FilterGraph::quad_grid(cell).render();
        let command = CompositeCommandBuilder::new(self.ffmpeg.clone(), clips, offsets)
            .with_filter_graph(graph.clone())
            .with_settings(self.settings.clone())
            .with_duration(duration)
            .build(output);

        info!(
            duration_secs = duration,
            output = %output.display(),
            "Planned composite"
        );

        Ok(CompositionPlan {
            clips: clips.to_vec(),
            offsets: offsets.clone(),
            layout,
            resolution,
            cell,
            effective_durations: effective,
            duration,
            filter_graph: graph,
            command,
        })
    }
}
