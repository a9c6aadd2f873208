//! Timestamp persistence.
//!
//! [`TimestampWriter`] persists one capture time into one frame's metadata;
//! the default implementation, [`ExifTimestampWriter`], writes the EXIF
//! `DateTimeOriginal` field. [`apply_timestamps`] drives a writer over a
//! whole frame sequence with per-frame error isolation: a corrupt or
//! unsupported image is logged and skipped, and the batch carries on.
//! Partial success is the expected steady state, not an error condition.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use little_exif::{exif_tag::ExifTag, metadata::Metadata};
use log::warn;

use crate::{error::SampleError, timestamp::FrameRecord};

/// EXIF datetime format (`YYYY:MM:DD HH:MM:SS`).
const EXIF_TIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Persists a capture time into a single image file's metadata.
///
/// The trait seam keeps the stamping loop independent of the metadata
/// format; production code uses [`ExifTimestampWriter`].
pub trait TimestampWriter {
    /// Write `timestamp` into the capture-time metadata of the image at
    /// `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SampleError::MetadataWrite`] when the file is corrupt,
    /// unsupported, or unwritable.
    fn write_timestamp(&self, path: &Path, timestamp: DateTime<Utc>) -> Result<(), SampleError>;
}

/// Default writer: EXIF `DateTimeOriginal`.
///
/// Frames freshly extracted by this pipeline carry no EXIF block, so the
/// writer builds a new one rather than round-tripping existing data.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExifTimestampWriter;

impl TimestampWriter for ExifTimestampWriter {
    fn write_timestamp(&self, path: &Path, timestamp: DateTime<Utc>) -> Result<(), SampleError> {
        let mut metadata = Metadata::new();
        metadata.set_tag(ExifTag::DateTimeOriginal(
            timestamp.format(EXIF_TIME_FORMAT).to_string(),
        ));
        metadata
            .write_to_file(path)
            .map_err(|error| SampleError::MetadataWrite {
                path: path.to_path_buf(),
                reason: error.to_string(),
            })
    }
}

/// Outcome of stamping a frame sequence.
///
/// Collects per-frame failures instead of aborting on them, in the same
/// spirit as a validation report: the caller decides how loudly to complain.
#[derive(Debug, Default)]
#[must_use]
pub struct WriteReport {
    /// Number of frames whose timestamp was written successfully.
    pub written: u64,
    /// Frames that rejected the write, with the error each produced.
    pub failures: Vec<(PathBuf, SampleError)>,
}

impl WriteReport {
    /// Total number of frames attempted.
    pub fn attempted(&self) -> u64 {
        self.written + self.failures.len() as u64
    }

    /// `true` when every attempted frame was written.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

impl Display for WriteReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}/{} frames stamped", self.written, self.attempted())?;
        for (path, error) in &self.failures {
            write!(f, "\n  failed: {}: {error}", path.display())?;
        }
        Ok(())
    }
}

/// Stamp every record's timestamp into its frame, independently.
///
/// A failure on one frame is logged at warn level, recorded in the report,
/// and does not affect the remaining frames. No retries are performed. An
/// empty input is a no-op reporting zero.
pub fn apply_timestamps<W: TimestampWriter>(writer: &W, records: &[FrameRecord]) -> WriteReport {
    let mut report = WriteReport::default();
    for record in records {
        match writer.write_timestamp(&record.path, record.timestamp) {
            Ok(()) => report.written += 1,
            Err(error) => {
                warn!(
                    "Could not insert timestamp into video frame {}: {error}",
                    record.path.display()
                );
                report.failures.push((record.path.clone(), error));
            }
        }
    }
    report
}
