//! End-to-end tests of the compose pipeline against in-memory ports

use std::path::{Path, PathBuf};
use std::sync::Arc;

use quadsync_cli::adapters::{MockEncodeAdapter, MockFsAdapter, MockProbeAdapter};
use quadsync_cli::app::ComposeInteractor;
use quadsync_cli::domain::model::*;
use quadsync_cli::SyncError;

/// Test utilities for building interactors and requests
mod test_utils {
    use super::*;

    pub const REFERENCE: &str = "cam1_20240115143000.mp4";
    pub const LATE: &str = "cam2_20240115143010.mp4";
    pub const EARLY: &str = "cam3_2024-01-15 14-29-55.mp4";
    pub const UNDATED: &str = "cam4.mp4";

    pub fn clips() -> Vec<PathBuf> {
        [REFERENCE, LATE, EARLY, UNDATED]
            .into_iter()
            .map(PathBuf::from)
            .collect()
    }

    pub fn probe() -> MockProbeAdapter {
        MockProbeAdapter::new()
            .with_clip(REFERENCE, 60.0, None)
            .with_clip(LATE, 60.0, None)
            .with_clip(EARLY, 60.0, None)
            .with_clip(UNDATED, 60.0, None)
    }

    pub struct Harness {
        pub probe: Arc<MockProbeAdapter>,
        pub encode: Arc<MockEncodeAdapter>,
        pub interactor: ComposeInteractor,
    }

    pub fn harness(probe: MockProbeAdapter, encode: MockEncodeAdapter, files: &[PathBuf]) -> Harness {
        let probe = Arc::new(probe);
        let encode = Arc::new(encode);
        let fs = Arc::new(MockFsAdapter::with_files(files.iter().cloned()));
        let interactor = ComposeInteractor::new(probe.clone(), encode.clone(), fs, "ffmpeg");
        Harness {
            probe,
            encode,
            interactor,
        }
    }

    pub fn request(clips: Vec<PathBuf>, offsets: OffsetMode) -> ComposeRequest {
        ComposeRequest {
            clips,
            output: PathBuf::from("grid.mp4"),
            offsets,
            layout: Layout::Grid2x2,
            resolution: Resolution::DEFAULT,
            dry_run: false,
        }
    }

    /// Value following `flag` before the `-i` of `input`
    pub fn seek_for(args: &[String], input: &str) -> Option<String> {
        let i = args.iter().position(|a| a == input)?;
        (i >= 3 && args[i - 3] == "-ss").then(|| args[i - 2].clone())
    }
}

use test_utils::*;

#[tokio::test]
async fn test_auto_sync_end_to_end() {
    let clips = clips();
    let h = harness(probe(), MockEncodeAdapter::new(), &clips);

    let outcome = h
        .interactor
        .execute(request(clips.clone(), OffsetMode::Auto { reference: 0 }))
        .await
        .unwrap();

    assert_eq!(outcome.plan.offsets.as_slice(), &[0.0, 0.0, 5.0, 0.0]);
    assert_eq!(outcome.plan.duration, 55.0);

    let report = outcome.offset_report.unwrap();
    assert_eq!(report.warnings.len(), 1);
    assert!(matches!(
        report.warnings[0],
        SyncWarning::ClipUnresolved { index: 3, .. }
    ));

    // Three filename hits skip probing; the undated clip is probed once for
    // metadata, then all four are probed for durations
    assert_eq!(h.probe.call_count(), 5);

    let commands = h.encode.commands();
    assert_eq!(commands.len(), 1);
    let args = &commands[0].args;
    assert_eq!(seek_for(args, EARLY).as_deref(), Some("5.000"));
    assert_eq!(seek_for(args, REFERENCE), None);
    assert!(args.windows(2).any(|w| w == ["-t", "55.000"]));
    assert_eq!(args.last().map(String::as_str), Some("grid.mp4"));

    let encode = outcome.encode.unwrap();
    assert_eq!(encode.output, Path::new("grid.mp4"));
}

#[tokio::test]
async fn test_auto_sync_uses_metadata_when_filename_has_no_date() {
    let clips: Vec<PathBuf> = ["a.mp4", "b.mp4", "c.mp4", "d.mp4"]
        .into_iter()
        .map(PathBuf::from)
        .collect();
    let probe = MockProbeAdapter::new()
        .with_clip("a.mp4", 30.0, Some("2024-01-15T14:30:00.000000Z"))
        .with_clip("b.mp4", 30.0, Some("2024-01-15T14:29:57.500000Z"))
        .with_clip("c.mp4", 30.0, Some("2024-01-15T15:30:00+01:00"))
        .with_clip("d.mp4", 30.0, Some("2024-01-15T14:30:04Z"));
    let h = harness(probe, MockEncodeAdapter::new(), &clips);

    let outcome = h
        .interactor
        .execute(request(clips, OffsetMode::Auto { reference: 0 }))
        .await
        .unwrap();

    assert_eq!(outcome.plan.offsets.as_slice(), &[0.0, 2.5, 0.0, 0.0]);
    assert_eq!(outcome.plan.duration, 27.5);
    assert!(outcome.offset_report.unwrap().warnings.is_empty());
}

#[tokio::test]
async fn test_unresolved_reference_falls_back_to_zero_offsets() {
    let clips = clips();
    let h = harness(probe(), MockEncodeAdapter::new(), &clips);

    let outcome = h
        .interactor
        .execute(request(clips, OffsetMode::Auto { reference: 3 }))
        .await
        .unwrap();

    assert!(outcome.plan.offsets.is_all_zero());
    let report = outcome.offset_report.unwrap();
    assert!(matches!(
        report.warnings.as_slice(),
        [SyncWarning::ReferenceUnresolved { index: 3, .. }]
    ));
}

#[tokio::test]
async fn test_manual_offsets_bypass_timestamp_resolution() {
    let clips = clips();
    let h = harness(probe(), MockEncodeAdapter::new(), &clips);

    let outcome = h
        .interactor
        .execute(request(clips, OffsetMode::Manual(vec![0.0, 2.5, 0.0, 1.25])))
        .await
        .unwrap();

    assert!(outcome.offset_report.is_none());
    assert_eq!(outcome.plan.duration, 57.5);
    // Only the duration probes
    assert_eq!(h.probe.call_count(), 4);

    let args = &h.encode.commands()[0].args;
    assert_eq!(seek_for(args, LATE).as_deref(), Some("2.500"));
    assert_eq!(seek_for(args, UNDATED).as_deref(), Some("1.250"));
}

#[tokio::test]
async fn test_manual_offsets_must_match_clip_count() {
    let clips = clips();
    let h = harness(probe(), MockEncodeAdapter::new(), &clips);

    let err = h
        .interactor
        .execute(request(clips, OffsetMode::Manual(vec![0.0, 1.0])))
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::OffsetCount { expected: 4, actual: 2 }));
    assert_eq!(h.probe.call_count(), 0);
}

#[tokio::test]
async fn test_no_sync_uses_zero_offsets() {
    let clips = clips();
    let h = harness(probe(), MockEncodeAdapter::new(), &clips);

    let outcome = h
        .interactor
        .execute(request(clips, OffsetMode::None))
        .await
        .unwrap();

    assert!(outcome.plan.offsets.is_all_zero());
    assert!(!h.encode.commands()[0].args.iter().any(|a| a == "-ss"));
}

#[tokio::test]
async fn test_missing_files_reported_before_probing() {
    let clips = clips();
    let present = &clips[..2];
    let h = harness(probe(), MockEncodeAdapter::new(), present);

    let err = h
        .interactor
        .execute(request(clips.clone(), OffsetMode::Auto { reference: 0 }))
        .await
        .unwrap_err();

    match err {
        SyncError::MissingFiles { paths } => assert_eq!(paths, clips[2..].to_vec()),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(h.probe.call_count(), 0);
    assert!(h.encode.commands().is_empty());
}

#[tokio::test]
async fn test_wrong_clip_count_rejected_without_probing() {
    for n in [3usize, 5] {
        let clips: Vec<PathBuf> = (0..n).map(|i| PathBuf::from(format!("{i}.mp4"))).collect();
        let h = harness(MockProbeAdapter::new(), MockEncodeAdapter::new(), &clips);

        let err = h
            .interactor
            .execute(request(clips, OffsetMode::None))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), format!("Exactly 4 videos required, got {n}"));
        assert_eq!(h.probe.call_count(), 0);
    }
}

#[tokio::test]
async fn test_encode_failure_surfaces_stderr() {
    let clips = clips();
    let h = harness(
        probe(),
        MockEncodeAdapter::failing("Unknown encoder 'libx264'"),
        &clips,
    );

    let err = h
        .interactor
        .execute(request(clips, OffsetMode::None))
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::Encode { .. }));
    assert!(err.to_string().contains("Unknown encoder 'libx264'"));
}

#[tokio::test]
async fn test_dry_run_plans_without_encoding() {
    let clips = clips();
    let h = harness(probe(), MockEncodeAdapter::new(), &clips);
    let mut req = request(clips, OffsetMode::Manual(vec![1.0, 0.0, 0.0, 0.0]));
    req.dry_run = true;
    req.resolution = Resolution::parse("1280x720").unwrap();

    let outcome = h.interactor.execute(req).await.unwrap();

    assert!(outcome.encode.is_none());
    assert!(h.encode.commands().is_empty());
    assert_eq!(outcome.plan.cell, CellSize { width: 640, height: 360 });
    let line = outcome.plan.command.to_command_line();
    assert!(line.starts_with("ffmpeg -y -ss 1.000 -i"));
    assert!(line.contains("'cam3_2024-01-15 14-29-55.mp4'"));
}
