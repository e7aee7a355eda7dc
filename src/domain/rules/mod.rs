// Business rules - Timestamp extraction and offset arithmetic

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::{Captures, Regex};

use crate::domain::model::*;
use crate::error::{SyncError, SyncResult};


/// One filename timestamp pattern with six captures: Y, M, D, h, m, s
pub struct TimestampRule {
    pub name: &'static str,
    pattern: Regex,
}

impl TimestampRule {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("Invalid timestamp pattern"),
        }
    }

    /// Date-time encoded by the leftmost match, if it is a real calendar value
    pub fn extract(&self, filename: &str) -> Option<NaiveDateTime> {
        let caps = self.pattern.captures(filename)?;
        let year: i32 = field(&caps, 1)?;
        if year < 1 {
            return None;
        }
        NaiveDate::from_ymd_opt(year, field(&caps, 2)?, field(&caps, 3)?)?.and_hms_opt(
            field(&caps, 4)?,
            field(&caps, 5)?,
            field(&caps, 6)?,
        )
    }
}

fn field<T: std::str::FromStr>(caps: &Captures<'_>, index: usize) -> Option<T> {
    caps.get(index)?.as_str().parse().ok()
}

/// Filename patterns in priority order. Digits are ASCII-only.
pub static FILENAME_RULES: LazyLock<Vec<TimestampRule>> = LazyLock::new(|| {
    vec![
        // 20251211183500
        TimestampRule::new(
            "contiguous",
            r"([0-9]{4})([0-9]{2})([0-9]{2})([0-9]{2})([0-9]{2})([0-9]{2})",
        ),
        // 2025-12-11 18-35-02, 2025-12-11_18.35.02
        TimestampRule::new(
            "dashed-date",
            r"([0-9]{4})-([0-9]{2})-([0-9]{2})[\s_]([0-9]{2})[.-]([0-9]{2})[.-]([0-9]{2})",
        ),
        // 2025-12-11_18.35.02
        TimestampRule::new(
            "dotted-time",
            r"([0-9]{4})-([0-9]{2})-([0-9]{2})_([0-9]{2})\.([0-9]{2})\.([0-9]{2})",
        ),
    ]
});

/// Recover a start time from the base filename of `path`
pub fn timestamp_from_filename(path: &Path) -> Option<ClipTimestamp> {
    let name = path.file_name()?.to_string_lossy();
    FILENAME_RULES
        .iter()
        .find_map(|rule| rule.extract(&name))
        .map(ClipTimestamp::from_filename)
}

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

/// Parse a container `creation_time` tag, treating a trailing `Z` as UTC
pub fn parse_creation_time(raw: &str) -> Option<ClipTimestamp> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    let normalized = match value.strip_suffix('Z').or_else(|| value.strip_suffix('z')) {
        Some(stripped) => format!("{stripped}+00:00"),
        None => value.to_string(),
    };

    if let Ok(instant) = DateTime::parse_from_rfc3339(&normalized)
        .or_else(|_| DateTime::parse_from_str(&normalized, "%Y-%m-%d %H:%M:%S%.f%:z"))
    {
        return Some(ClipTimestamp::from_metadata(instant));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(ClipTimestamp::from_metadata_naive)
}

/// Align every clip to the reference clip.
///
/// A clip that started before the reference gets a positive offset equal to
/// its lead; a clip that started at or after the reference gets 0. Unknown
/// timestamps degrade to 0 with a warning, and an unknown reference yields
/// all zeros.
pub fn offsets_from_timestamps(
    clips: &[PathBuf],
    timestamps: Vec<Option<ClipTimestamp>>,
    reference_index: usize,
) -> SyncResult<OffsetReport> {
    if timestamps.len() != clips.len() {
        return Err(SyncError::OffsetCount {
            expected: clips.len(),
            actual: timestamps.len(),
        });
    }
    let Some(reference) = timestamps.get(reference_index) else {
        return Err(SyncError::InvalidReference {
            index: reference_index,
            count: clips.len(),
        });
    };

    let Some(reference) = reference.clone() else {
        return Ok(OffsetReport {
            offsets: OffsetSet::zeros(clips.len()),
            warnings: vec![SyncWarning::ReferenceUnresolved {
                index: reference_index,
                path: clips[reference_index].clone(),
            }],
            timestamps,
        });
    };

    let mut warnings = Vec::new();
    let mut values = Vec::with_capacity(clips.len());

    for (index, (path, timestamp)) in clips.iter().zip(&timestamps).enumerate() {
        match timestamp {
            Some(ts) => {
                if ts.is_zoned() != reference.is_zoned() {
                    warnings.push(SyncWarning::MixedTimezones {
                        index,
                        path: path.clone(),
                    });
                }
                values.push(reference.seconds_since(ts).max(0.0));
            }
            None => {
                warnings.push(SyncWarning::ClipUnresolved {
                    index,
                    path: path.clone(),
                });
                values.push(0.0);
            }
        }
    }

    Ok(OffsetReport {
        offsets: OffsetSet::new(values)?,
        timestamps,
        warnings,
    })
}

/// Playable length of each clip once its offset is skipped
pub fn effective_durations(durations: &[f64], offsets: &OffsetSet) -> Vec<f64> {
    durations
        .iter()
        .zip(offsets.iter())
        .map(|(duration, offset)| duration - offset)
        .collect()
}

/// Shortest effective duration, the length of the composite
pub fn minimum_duration(effective: &[f64]) -> Option<f64> {
    effective.iter().copied().reduce(f64::min)
}
