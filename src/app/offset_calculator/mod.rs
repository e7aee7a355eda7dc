// Offset calculator - Aligns every clip to a reference clip

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use crate::app::timestamp_resolver::TimestampResolver;
use crate::domain::model::*;
use crate::domain::rules::offsets_from_timestamps;
use crate::error::{SyncError, SyncResult};

/// Computes per-clip seek offsets from resolved start times
pub struct OffsetCalculator {
    resolver: Arc<TimestampResolver>,
}

impl OffsetCalculator {
    pub fn new(resolver: Arc<TimestampResolver>) -> Self {
        Self { resolver }
    }

    /// Resolve every clip in order and compute offsets against
    /// `clips[reference_index]`.
    ///
    /// Unresolvable timestamps never fail the run: they are logged and
    /// recorded in the report's warnings.
    pub async fn compute_offsets(
        &self,
        clips: &[PathBuf],
        reference_index: usize,
    ) -> SyncResult<OffsetReport> {
        if reference_index >= clips.len() {
            return Err(SyncError::InvalidReference {
                index: reference_index,
                count: clips.len(),
            });
        }

        let mut timestamps = Vec::with_capacity(clips.len());
        for clip in clips {
            timestamps.push(self.resolver.resolve(clip).await?);
        }

        let report = offsets_from_timestamps(clips, timestamps, reference_index)?;

        for warning in &report.warnings {
            warn!("{warning}");
        }
        for (index, (clip, offset)) in clips.iter().zip(report.offsets.iter()).enumerate() {
            info!("  [{index}] {}: {offset:.2}s offset", clip_name(clip));
        }

        Ok(report)
    }
}
