// Timestamp resolver - Recovers the absolute start time of a clip

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::domain::model::*;
use crate::domain::rules::{parse_creation_time, timestamp_from_filename};
use crate::error::SyncResult;
use crate::ports::ProbePort;

/// Resolves clip start times from filenames, then container metadata
pub struct TimestampResolver {
    probe_port: Arc<dyn ProbePort>,
}

impl TimestampResolver {
    pub fn new(probe_port: Arc<dyn ProbePort>) -> Self {
        Self { probe_port }
    }

    /// Start time of the clip at `path`, or `None` when neither source has one.
    ///
    /// Only a failing probe is an error; the prober is not invoked at all
    /// when the filename already carries a timestamp.
    pub async fn resolve(&self, path: &Path) -> SyncResult<Option<ClipTimestamp>> {
        if let Some(ts) = timestamp_from_filename(path) {
            debug!(clip = %clip_name(path), timestamp = %ts, "Timestamp from filename");
            return Ok(Some(ts));
        }

        let info = self.probe_port.probe_media(path).await?;
        let resolved = info.creation_time.as_deref().and_then(parse_creation_time);
        match &resolved {
            Some(ts) => debug!(clip = %clip_name(path), timestamp = %ts, "Timestamp from metadata"),
            None => debug!(
                clip = %clip_name(path),
                creation_time = info.creation_time.as_deref().unwrap_or(""),
                "No usable timestamp"
            ),
        }
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::MockProbeAdapter;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_filename_wins_without_probing() {
        let probe = Arc::new(
            MockProbeAdapter::new().with_clip("20251211183500.mp4", 10.0, Some("2020-01-01T00:00:00Z")),
        );
        let resolver = TimestampResolver::new(probe.clone());

        let ts = resolver
            .resolve(Path::new("20251211183500.mp4"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            ts.wall_clock,
            NaiveDate::from_ymd_opt(2025, 12, 11).unwrap().and_hms_opt(18, 35, 0).unwrap()
        );
        assert_eq!(ts.source, TimestampSource::Filename);
        assert_eq!(probe.call_count(), 0);
    }

    #[tokio::test]
    async fn test_falls_back_to_metadata() {
        let probe = Arc::new(
            MockProbeAdapter::new().with_clip("front.mp4", 10.0, Some("2025-12-11T09:35:03.000000Z")),
        );
        let resolver = TimestampResolver::new(probe.clone());

        let ts = resolver.resolve(Path::new("front.mp4")).await.unwrap().unwrap();

        assert_eq!(ts.source, TimestampSource::Metadata);
        assert_eq!(ts.utc_offset_seconds, Some(0));
        assert_eq!(probe.calls(), vec![Path::new("front.mp4").to_path_buf()]);
    }

    #[tokio::test]
    async fn test_invalid_filename_date_falls_back_to_metadata() {
        let probe = Arc::new(
            MockProbeAdapter::new().with_clip("20251311183500.mp4", 10.0, Some("2025-12-11T09:35:03Z")),
        );
        let resolver = TimestampResolver::new(probe);

        let ts = resolver.resolve(Path::new("20251311183500.mp4")).await.unwrap().unwrap();
        assert_eq!(ts.source, TimestampSource::Metadata);
    }

    #[tokio::test]
    async fn test_empty_metadata_is_unknown() {
        let probe = Arc::new(MockProbeAdapter::new().with_clip("front.mp4", 10.0, Some("")));
        let resolver = TimestampResolver::new(probe);

        assert_eq!(resolver.resolve(Path::new("front.mp4")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unparseable_metadata_is_unknown() {
        let probe = Arc::new(MockProbeAdapter::new().with_clip("front.mp4", 10.0, Some("last tuesday")));
        let resolver = TimestampResolver::new(probe);

        assert_eq!(resolver.resolve(Path::new("front.mp4")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_probe_failure_is_an_error() {
        let probe = Arc::new(MockProbeAdapter::new().with_failure("front.mp4", "moov atom not found"));
        let resolver = TimestampResolver::new(probe);

        let err = resolver.resolve(Path::new("front.mp4")).await.unwrap_err();
        assert!(err.to_string().contains("moov atom not found"));
    }
}
