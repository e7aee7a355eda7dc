// Domain models - Core types and data structures

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta, TimeZone};
use serde::Serialize;

use crate::error::{SyncError, SyncResult};


/// Number of clips a composition always takes
pub const GRID_CLIPS: usize = 4;

/// Normalized result of one ffprobe call
#[derive(Debug, Clone, PartialEq)]
pub struct MediaInfo {
    /// Container duration in seconds
    pub duration: f64,
    pub width: u32,
    pub height: u32,
    /// Raw `creation_time` tag, `None` when absent or empty
    pub creation_time: Option<String>,
}

impl MediaInfo {
    pub fn new(duration: f64, width: u32, height: u32, creation_time: Option<String>) -> Self {
        Self {
            duration: duration.max(0.0),
            width,
            height,
            creation_time: creation_time.filter(|s| !s.trim().is_empty()),
        }
    }
}

/// Where a clip's start time was recovered from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampSource {
    Filename,
    Metadata,
}

/// Absolute start time of a clip
///
/// Filename timestamps are naive wall-clock values. Metadata timestamps
/// usually carry a UTC offset, which is kept alongside the wall-clock value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipTimestamp {
    pub wall_clock: NaiveDateTime,
    pub utc_offset_seconds: Option<i32>,
    pub source: TimestampSource,
}

impl ClipTimestamp {
    pub fn from_filename(wall_clock: NaiveDateTime) -> Self {
        Self {
            wall_clock,
            utc_offset_seconds: None,
            source: TimestampSource::Filename,
        }
    }

    pub fn from_metadata(instant: DateTime<FixedOffset>) -> Self {
        Self {
            wall_clock: instant.naive_local(),
            utc_offset_seconds: Some(instant.offset().local_minus_utc()),
            source: TimestampSource::Metadata,
        }
    }

    pub fn from_metadata_naive(wall_clock: NaiveDateTime) -> Self {
        Self {
            wall_clock,
            utc_offset_seconds: None,
            source: TimestampSource::Metadata,
        }
    }

    pub fn is_zoned(&self) -> bool {
        self.utc_offset_seconds.is_some()
    }

    fn instant(&self) -> Option<DateTime<FixedOffset>> {
        let offset = FixedOffset::east_opt(self.utc_offset_seconds?)?;
        offset.from_local_datetime(&self.wall_clock).single()
    }

    /// Seconds from `earlier` to `self`, negative if `earlier` is actually later.
    ///
    /// Zone-aware when both sides carry an offset; otherwise the wall-clock
    /// values are subtracted as written.
    pub fn seconds_since(&self, earlier: &ClipTimestamp) -> f64 {
        let delta = match (self.instant(), earlier.instant()) {
            (Some(a), Some(b)) => a - b,
            _ => self.wall_clock - earlier.wall_clock,
        };
        delta_seconds(delta)
    }
}

fn delta_seconds(delta: TimeDelta) -> f64 {
    match delta.num_microseconds() {
        Some(us) => us as f64 / 1_000_000.0,
        None => delta.num_milliseconds() as f64 / 1000.0,
    }
}

impl fmt::Display for ClipTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.instant() {
            Some(instant) => write!(f, "{}", instant.format("%Y-%m-%d %H:%M:%S%.f %:z")),
            None => write!(f, "{}", self.wall_clock.format("%Y-%m-%d %H:%M:%S%.f")),
        }
    }
}

/// Per-clip seek offsets, index-aligned with the clip list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OffsetSet(Vec<f64>);

impl OffsetSet {
    /// Build from raw values, rejecting negative or non-finite entries
    pub fn new(values: Vec<f64>) -> SyncResult<Self> {
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(SyncError::InvalidOffset { index, value });
        }
        Ok(Self(values))
    }

    pub fn zeros(len: usize) -> Self {
        Self(vec![0.0; len])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    pub fn is_all_zero(&self) -> bool {
        self.0.iter().all(|v| *v == 0.0)
    }
}

/// Spatial arrangement of the four clips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Layout {
    #[default]
    #[serde(rename = "2x2")]
    Grid2x2,
    #[serde(rename = "main+3")]
    MainPlusThree,
    #[serde(rename = "horizontal")]
    Horizontal,
}

impl Layout {
    pub const ALL: [Layout; 3] = [Layout::Grid2x2, Layout::MainPlusThree, Layout::Horizontal];

    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Grid2x2 => "2x2",
            Layout::MainPlusThree => "main+3",
            Layout::Horizontal => "horizontal",
        }
    }

    /// Pixel size of one cell for this layout.
    ///
    /// Every layout currently splits the frame into equal quadrants.
    pub fn cell_size(&self, resolution: Resolution) -> CellSize {
        match self {
            Layout::Grid2x2 | Layout::MainPlusThree | Layout::Horizontal => CellSize {
                width: resolution.width / 2,
                height: resolution.height / 2,
            },
        }
    }
}

impl FromStr for Layout {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "2x2" => Ok(Layout::Grid2x2),
            "main+3" => Ok(Layout::MainPlusThree),
            "horizontal" => Ok(Layout::Horizontal),
            _ => Err(SyncError::InvalidLayout {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output frame size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const DEFAULT: Resolution = Resolution {
        width: 1920,
        height: 1080,
    };

    /// Parse a `WIDTHxHEIGHT` string such as `1280x720`
    pub fn parse(value: &str) -> SyncResult<Self> {
        let invalid = || SyncError::InvalidResolution {
            value: value.to_string(),
        };

        let (w, h) = value.trim().split_once('x').ok_or_else(invalid)?;
        let width: u32 = w.trim().parse().map_err(|_| invalid())?;
        let height: u32 = h.trim().parse().map_err(|_| invalid())?;
        // Each cell is half the frame in both directions
        if width < 2 || height < 2 {
            return Err(invalid());
        }

        Ok(Self { width, height })
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Pixel size of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellSize {
    pub width: u32,
    pub height: u32,
}

/// Fixed encoding policy for the composite
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeSettings {
    pub video_codec: &'static str,
    pub preset: &'static str,
    pub crf: u8,
    pub audio_codec: &'static str,
    pub audio_bitrate: &'static str,
}

impl Default for EncodeSettings {
    fn default() -> Self {
        Self {
            video_codec: "libx264",
            preset: "fast",
            crf: 23,
            audio_codec: "aac",
            audio_bitrate: "192k",
        }
    }
}

/// A fully-resolved encoder invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncodeCommand {
    pub program: String,
    pub args: Vec<String>,
    pub output: PathBuf,
}

impl EncodeCommand {
    /// Render as a copy-pasteable shell line
    pub fn to_command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(shell_quote)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=+,@%".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

/// Everything needed to produce the composite
#[derive(Debug, Clone, Serialize)]
pub struct CompositionPlan {
    pub clips: Vec<PathBuf>,
    pub offsets: OffsetSet,
    pub layout: Layout,
    pub resolution: Resolution,
    pub cell: CellSize,
    pub effective_durations: Vec<f64>,
    /// Output length in seconds, the shortest effective duration
    pub duration: f64,
    pub filter_graph: String,
    pub command: EncodeCommand,
}

/// Result of a successful encode
#[derive(Debug, Clone)]
pub struct EncodeReport {
    pub output: PathBuf,
    /// Wall time spent in ffmpeg
    pub elapsed: Duration,
}

/// Soft degradations recorded while computing offsets
#[derive(Debug, Clone, PartialEq)]
pub enum SyncWarning {
    ReferenceUnresolved { index: usize, path: PathBuf },
    ClipUnresolved { index: usize, path: PathBuf },
    MixedTimezones { index: usize, path: PathBuf },
}

impl SyncWarning {
    pub fn index(&self) -> usize {
        match self {
            SyncWarning::ReferenceUnresolved { index, .. }
            | SyncWarning::ClipUnresolved { index, .. }
            | SyncWarning::MixedTimezones { index, .. } => *index,
        }
    }
}

impl fmt::Display for SyncWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncWarning::ReferenceUnresolved { path, .. } => write!(
                f,
                "Could not extract timestamp from reference video {}",
                path.display()
            ),
            SyncWarning::ClipUnresolved { path, .. } => write!(
                f,
                "Could not extract timestamp from {}, using 0 offset",
                path.display()
            ),
            SyncWarning::MixedTimezones { path, .. } => write!(
                f,
                "Timestamp of {} and the reference disagree on timezone awareness; comparing wall-clock values",
                path.display()
            ),
        }
    }
}

/// Offsets together with what was learned computing them
#[derive(Debug, Clone)]
pub struct OffsetReport {
    pub offsets: OffsetSet,
    pub timestamps: Vec<Option<ClipTimestamp>>,
    pub warnings: Vec<SyncWarning>,
}

impl OffsetReport {
    pub fn warnings_for(&self, index: usize) -> impl Iterator<Item = &SyncWarning> {
        self.warnings.iter().filter(move |w| w.index() == index)
    }
}

/// Where the offsets of a composition come from
#[derive(Debug, Clone, PartialEq)]
pub enum OffsetMode {
    /// No synchronization, every clip starts at 0
    None,
    /// Resolve timestamps and align to the reference clip
    Auto { reference: usize },
    /// Caller-supplied offsets, bypassing timestamp resolution
    Manual(Vec<f64>),
}

/// Request for one composition run
#[derive(Debug, Clone)]
pub struct ComposeRequest {
    pub clips: Vec<PathBuf>,
    pub output: PathBuf,
    pub offsets: OffsetMode,
    pub layout: Layout,
    pub resolution: Resolution,
    pub dry_run: bool,
}

/// What a composition run produced
#[derive(Debug, Clone)]
pub struct ComposeOutcome {
    pub plan: CompositionPlan,
    pub offset_report: Option<OffsetReport>,
    pub encode: Option<EncodeReport>,
}

/// Base filename of a clip, for log lines and summaries
pub fn clip_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
