//! Timestamp writer integration tests.
//!
//! The stamping loop's per-frame error isolation is exercised with an
//! in-memory writer; the real EXIF writer is exercised against freshly
//! encoded JPEGs in a temporary directory.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use framestamp::{
    ExifTimestampWriter, FrameRecord, SampleError, TimestampWriter, apply_timestamps,
};

/// Writer that fails for any path whose filename contains a marker string.
struct FlakyWriter {
    fail_marker: &'static str,
    seen: RefCell<Vec<PathBuf>>,
}

impl FlakyWriter {
    fn new(fail_marker: &'static str) -> Self {
        Self {
            fail_marker,
            seen: RefCell::new(Vec::new()),
        }
    }
}

impl TimestampWriter for FlakyWriter {
    fn write_timestamp(&self, path: &Path, _timestamp: DateTime<Utc>) -> Result<(), SampleError> {
        self.seen.borrow_mut().push(path.to_path_buf());
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if name.contains(self.fail_marker) {
            return Err(SampleError::MetadataWrite {
                path: path.to_path_buf(),
                reason: "simulated corrupt frame".to_string(),
            });
        }
        Ok(())
    }
}

fn record(name: &str, index: u64) -> FrameRecord {
    FrameRecord {
        path: PathBuf::from(name),
        index,
        timestamp: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
    }
}

#[test]
fn failure_on_one_frame_does_not_stop_the_batch() {
    let writer = FlakyWriter::new("000002");
    let records = vec![
        record("000001.jpg", 1),
        record("000002.jpg", 2),
        record("000003.jpg", 3),
    ];

    let report = apply_timestamps(&writer, &records);

    assert_eq!(report.written, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].0, PathBuf::from("000002.jpg"));
    assert_eq!(report.attempted(), 3);
    assert!(!report.is_complete());
    // Every frame was attempted exactly once, in order, failure included.
    assert_eq!(
        *writer.seen.borrow(),
        vec![
            PathBuf::from("000001.jpg"),
            PathBuf::from("000002.jpg"),
            PathBuf::from("000003.jpg"),
        ],
    );
}

#[test]
fn all_successes_make_a_complete_report() {
    let writer = FlakyWriter::new("never-matches");
    let records = vec![record("000001.jpg", 1), record("000002.jpg", 2)];

    let report = apply_timestamps(&writer, &records);

    assert_eq!(report.written, 2);
    assert!(report.is_complete());
}

#[test]
fn empty_batch_is_a_noop_reporting_zero() {
    let writer = FlakyWriter::new("anything");
    let report = apply_timestamps(&writer, &[]);

    assert_eq!(report.written, 0);
    assert_eq!(report.attempted(), 0);
    assert!(report.is_complete());
    assert!(writer.seen.borrow().is_empty());
}

#[test]
fn report_display_shows_counts_and_failures() {
    let writer = FlakyWriter::new("000002");
    let records = vec![
        record("000001.jpg", 1),
        record("000002.jpg", 2),
        record("000003.jpg", 3),
    ];

    let report = apply_timestamps(&writer, &records);
    let display = format!("{report}");

    assert!(display.contains("2/3"), "Display should show counts: {display}");
    assert!(
        display.contains("000002.jpg"),
        "Display should name the failed frame: {display}",
    );
}

#[test]
fn exif_writer_stamps_a_real_jpeg() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let frame_path = directory.path().join("000001.jpg");
    image::RgbImage::new(8, 8)
        .save(&frame_path)
        .expect("Failed to encode test frame");

    let timestamp = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 2).unwrap();
    ExifTimestampWriter
        .write_timestamp(&frame_path, timestamp)
        .expect("Stamping a fresh JPEG must succeed");
}

#[test]
fn exif_writer_fails_on_missing_file() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let missing = directory.path().join("000404.jpg");

    let timestamp = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 2).unwrap();
    let error = ExifTimestampWriter
        .write_timestamp(&missing, timestamp)
        .expect_err("Stamping a missing file must fail");
    assert!(
        matches!(error, SampleError::MetadataWrite { .. }),
        "Expected MetadataWrite, got {error:?}",
    );
}
