//! The sampling pipeline.
//!
//! [`VideoSampler`] wires the collaborators together and runs them strictly
//! in sequence: validate paths, detect a prior run, probe, resolve the
//! extraction rate, extract, resolve the start time, derive per-frame
//! capture times, and stamp them. Nothing overlaps and nothing retries; the
//! whole run is the unit of recovery.

use std::path::Path;

use chrono::{DateTime, Utc};
use log::{info, warn};

use crate::{
    error::SampleError,
    extract::{FfmpegFrameExtractor, FrameExtractor},
    listing::list_frames,
    probe::{FfmpegProber, VideoProber},
    rate::resolve_sample_rate,
    timestamp::{resolve_start_time, sequence_timestamps},
    writer::{ExifTimestampWriter, TimestampWriter, WriteReport, apply_timestamps},
};

/// What to sample and how.
///
/// # Example
///
/// ```
/// use framestamp::SampleOptions;
///
/// let options = SampleOptions::new(2.0)
///     .with_start_time_ms(1_577_836_800_000)
///     .with_duration_ratio(1.001);
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct SampleOptions {
    /// Requested sampling interval in seconds. Must be greater than zero.
    pub interval: f64,
    /// Explicit sequence start time, milliseconds since the UNIX epoch.
    ///
    /// `None` defers to the video's creation-time metadata.
    pub start_time_ms: Option<i64>,
    /// Correction factor for drift between nominal and actual video
    /// duration. `1.0` means no correction.
    pub duration_ratio: f64,
}

impl SampleOptions {
    /// Options for the given sampling interval, with no explicit start time
    /// and no duration correction.
    pub fn new(interval: f64) -> Self {
        Self {
            interval,
            start_time_ms: None,
            duration_ratio: 1.0,
        }
    }

    /// Set an explicit sequence start time (milliseconds since the epoch).
    pub fn with_start_time_ms(mut self, milliseconds: i64) -> Self {
        self.start_time_ms = Some(milliseconds);
        self
    }

    /// Set the duration-ratio correction factor.
    pub fn with_duration_ratio(mut self, ratio: f64) -> Self {
        self.duration_ratio = ratio;
        self
    }
}

/// Outcome of a sampling run, for the caller to render.
#[derive(Debug)]
#[must_use]
pub struct SampleSummary {
    /// Frames extracted by this run. Zero when extraction was skipped.
    pub frames_extracted: u64,
    /// The frame rate handed to the extractor. `None` when extraction was
    /// skipped because the import directory already held frames.
    pub resolved_rate: Option<f64>,
    /// The resolved capture-time origin of the sequence.
    pub start_time: DateTime<Utc>,
    /// Per-frame stamping outcome.
    pub report: WriteReport,
    /// `true` when a prior run's frames were found and extraction was
    /// skipped.
    pub skipped_extraction: bool,
}

/// The frame-sampling pipeline.
///
/// Generic over its three collaborators so tests (and embedders with their
/// own media plumbing) can substitute any of them. [`VideoSampler::new`]
/// wires the FFmpeg prober, FFmpeg extractor, and EXIF writer.
///
/// # Example
///
/// ```no_run
/// use framestamp::{SampleOptions, VideoSampler};
///
/// let sampler = VideoSampler::new();
/// let summary = sampler.sample(
///     "timelapse.mp4".as_ref(),
///     "frames/".as_ref(),
///     &SampleOptions::new(2.0),
/// )?;
/// println!("{} frames stamped", summary.report.written);
/// # Ok::<(), framestamp::SampleError>(())
/// ```
#[derive(Debug, Default)]
pub struct VideoSampler<P, E, W> {
    prober: P,
    extractor: E,
    writer: W,
}

impl VideoSampler<FfmpegProber, FfmpegFrameExtractor, ExifTimestampWriter> {
    /// A sampler with the production collaborators.
    pub fn new() -> Self {
        Self::with_collaborators(FfmpegProber, FfmpegFrameExtractor, ExifTimestampWriter)
    }
}

impl<P: VideoProber, E: FrameExtractor, W: TimestampWriter> VideoSampler<P, E, W> {
    /// A sampler with custom collaborators.
    pub fn with_collaborators(prober: P, extractor: E, writer: W) -> Self {
        Self {
            prober,
            extractor,
            writer,
        }
    }

    /// Borrow the prober collaborator.
    pub fn prober(&self) -> &P {
        &self.prober
    }

    /// Borrow the extractor collaborator.
    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    /// Borrow the writer collaborator.
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Run the full pipeline for one video.
    ///
    /// `import_path` must be an existing directory; `video` an existing
    /// file. When the import directory already contains frames, extraction
    /// (and rate resolution) is skipped and the existing frames are
    /// re-stamped, keeping the run idempotent.
    ///
    /// # Errors
    ///
    /// Fatal errors ([`SampleError::InvalidInterval`],
    /// [`SampleError::ImportDirectoryMissing`],
    /// [`SampleError::VideoFileMissing`], probe failures,
    /// [`SampleError::IncompatibleSampleRate`], extraction failures) abort
    /// the run. Per-frame metadata write failures do not; they are collected
    /// in the summary's [`WriteReport`].
    pub fn sample(
        &self,
        video: &Path,
        import_path: &Path,
        options: &SampleOptions,
    ) -> Result<SampleSummary, SampleError> {
        if !options.interval.is_finite() || options.interval <= 0.0 {
            return Err(SampleError::InvalidInterval {
                interval: options.interval,
            });
        }
        if !import_path.is_dir() {
            return Err(SampleError::ImportDirectoryMissing {
                path: import_path.to_path_buf(),
            });
        }
        if !video.is_file() {
            return Err(SampleError::VideoFileMissing {
                path: video.to_path_buf(),
            });
        }

        let probe = self.prober.probe(video)?;

        let existing = list_frames(import_path)?;
        let skipped_extraction = !existing.is_empty();
        let (resolved_rate, frames_extracted) = if skipped_extraction {
            info!(
                "{} frames already present in {}, skipping extraction",
                existing.len(),
                import_path.display()
            );
            (None, 0)
        } else {
            let rate = resolve_sample_rate(&probe, options.interval)?;
            info!(
                "Sampling {} at {rate} fps into {}",
                video.display(),
                import_path.display()
            );
            let count = self.extractor.extract(video, import_path, rate)?;
            (Some(rate), count)
        };

        let start_time = resolve_start_time(options.start_time_ms, probe.creation_time.as_deref());

        let frames = list_frames(import_path)?;
        if frames.is_empty() {
            warn!("No video frames were sampled");
            return Ok(SampleSummary {
                frames_extracted,
                resolved_rate,
                start_time,
                report: WriteReport::default(),
                skipped_extraction,
            });
        }

        let records =
            sequence_timestamps(&frames, start_time, options.interval, options.duration_ratio)?;
        let report = apply_timestamps(&self.writer, &records);

        Ok(SampleSummary {
            frames_extracted,
            resolved_rate,
            start_time,
            report,
            skipped_extraction,
        })
    }
}
