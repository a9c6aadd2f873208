//! Capture-time assignment.
//!
//! Extracted frames carry no timing of their own — their filenames do. Each
//! frame is named by the sequential index the extractor assigned it, and
//! filename order *is* temporal order. This module resolves a start time for
//! the sequence and derives one capture timestamp per frame from that start,
//! the sampling interval, and a duration-ratio correction.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use log::warn;

use crate::error::SampleError;

/// Primary creation-time format seen in container metadata.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Fallback creation-time format (ISO 8601 with fractional seconds).
pub const TIME_FORMAT_ALT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// One extracted frame and its derived capture time.
///
/// Created by [`sequence_timestamps`], consumed by
/// [`apply_timestamps`](crate::writer::apply_timestamps), never mutated
/// afterward.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct FrameRecord {
    /// Path of the extracted frame image.
    pub path: PathBuf,
    /// The frame's sequential index, parsed from its filename.
    pub index: u64,
    /// Derived capture time, UTC, microsecond precision.
    pub timestamp: DateTime<Utc>,
}

/// Parse a creation-time string as the containers write it.
///
/// Tries [`TIME_FORMAT`] first, then [`TIME_FORMAT_ALT`]; returns the first
/// success. `None` means the string matches neither format — the caller
/// falls back rather than failing.
pub fn parse_creation_time(raw: &str) -> Option<DateTime<Utc>> {
    [TIME_FORMAT, TIME_FORMAT_ALT]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

/// Resolve the capture-time origin for a frame sequence.
///
/// An explicit start time (epoch milliseconds) always wins. Otherwise the
/// probed creation-time string is parsed via [`parse_creation_time`]. When
/// both are unavailable the UNIX epoch is used and a warning is logged:
/// missing timing information degrades timestamp quality but never aborts
/// processing.
pub fn resolve_start_time(
    explicit_epoch_ms: Option<i64>,
    creation_time: Option<&str>,
) -> DateTime<Utc> {
    if let Some(milliseconds) = explicit_epoch_ms {
        if let Some(start) = Utc.timestamp_millis_opt(milliseconds).single() {
            return start;
        }
        warn!("Explicit start time {milliseconds}ms is out of range, falling back");
    }

    if let Some(raw) = creation_time {
        if let Some(start) = parse_creation_time(raw) {
            return start;
        }
        warn!("Could not parse video creation time {raw:?}, falling back");
    }

    warn!(
        "Video start time not provided and could not be extracted from the video file; \
         defaulting to 0 milliseconds since the UNIX epoch"
    );
    DateTime::UNIX_EPOCH
}

/// Parse a frame's sequential index from its filename.
///
/// The numeric stem with leading zeros stripped, so `000042.jpg` is frame
/// `42`. The extractor starts counting at 1; an all-zeros stem parses to 0
/// for completeness.
///
/// # Errors
///
/// Returns [`SampleError::InvalidFrameName`] when the stem is not a
/// non-negative integer. Foreign files in the import directory are a data
/// error, never silently skipped.
pub fn frame_index(path: &Path) -> Result<u64, SampleError> {
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| SampleError::InvalidFrameName {
            path: path.to_path_buf(),
        })?;

    let digits = stem.trim_start_matches('0');
    if digits.is_empty() {
        return if stem.is_empty() {
            Err(SampleError::InvalidFrameName {
                path: path.to_path_buf(),
            })
        } else {
            Ok(0)
        };
    }

    digits
        .parse::<u64>()
        .map_err(|_| SampleError::InvalidFrameName {
            path: path.to_path_buf(),
        })
}

/// Derive one capture timestamp per frame.
///
/// For frame index `i` the timestamp is
/// `start_time + i * interval * duration_ratio` seconds, at microsecond
/// precision. Input order is preserved; for strictly increasing indices and
/// positive `interval * duration_ratio` the timestamps are strictly
/// monotonically increasing.
///
/// `duration_ratio` compensates for drift between the video's nominal and
/// actual duration; `1.0` means no correction.
///
/// # Errors
///
/// Returns [`SampleError::InvalidFrameName`] if any path's stem does not
/// parse as an index.
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
///
/// use chrono::{TimeZone, Utc};
/// use framestamp::sequence_timestamps;
///
/// let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
/// let frames = vec![PathBuf::from("000001.jpg"), PathBuf::from("000002.jpg")];
/// let records = sequence_timestamps(&frames, start, 2.0, 1.0)?;
/// assert_eq!(records[0].timestamp, Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 2).unwrap());
/// assert_eq!(records[1].timestamp, Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 4).unwrap());
/// # Ok::<(), framestamp::SampleError>(())
/// ```
pub fn sequence_timestamps(
    frames: &[PathBuf],
    start_time: DateTime<Utc>,
    interval: f64,
    duration_ratio: f64,
) -> Result<Vec<FrameRecord>, SampleError> {
    frames
        .iter()
        .map(|path| {
            let index = frame_index(path)?;
            let offset_seconds = index as f64 * interval * duration_ratio;
            let offset = Duration::microseconds((offset_seconds * 1_000_000.0).round() as i64);
            Ok(FrameRecord {
                path: path.clone(),
                index,
                timestamp: start_time + offset,
            })
        })
        .collect()
}
