//! Error types for the `framestamp` crate.
//!
//! This module defines [`SampleError`], the unified error type returned by all
//! fallible operations in the crate. Variants carry enough context to diagnose
//! the problem without additional logging at the call site: file paths, the
//! guessed native interval of a time-lapse video, or the upstream error
//! message.
//!
//! Fatal variants (configuration, probing, rate resolution, extraction) abort
//! a sampling run immediately. [`SampleError::MetadataWrite`] is the one
//! recoverable variant: the stamping loop catches it per frame and collects it
//! into a [`WriteReport`](crate::WriteReport) instead of aborting the batch.

use std::{io::Error as IoError, path::PathBuf};

use ffmpeg_next::Error as FfmpegError;
use image::ImageError;
use thiserror::Error;

/// The unified error type for all `framestamp` operations.
///
/// Every public method that can fail returns `Result<T, SampleError>`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SampleError {
    /// The import directory does not exist or is not a directory.
    ///
    /// Checked before any processing starts.
    #[error("Import directory {path} does not exist")]
    ImportDirectoryMissing {
        /// The directory that was supposed to receive sampled frames.
        path: PathBuf,
    },

    /// The input video file does not exist or is not a regular file.
    ///
    /// Checked before any processing starts.
    #[error("Video file {path} does not exist")]
    VideoFileMissing {
        /// The path that was passed to the sampler.
        path: PathBuf,
    },

    /// A non-positive or non-finite sampling interval was requested.
    ///
    /// Checked before any processing starts.
    #[error("Sample interval must be a positive number of seconds, got {interval}")]
    InvalidInterval {
        /// The rejected interval value.
        interval: f64,
    },

    /// The media prober could not read the video's metadata.
    #[error("Failed to probe video file at {path}: {reason}")]
    Probe {
        /// Path of the video that was being probed.
        path: PathBuf,
        /// Underlying reason the probe failed.
        reason: String,
    },

    /// The file does not contain a video stream.
    #[error("No video stream found in file")]
    NoVideoStream,

    /// The probe returned fields that cannot support rate resolution.
    #[error("Malformed probe data: {reason}")]
    MalformedProbe {
        /// Which required field was missing or nonsensical.
        reason: String,
    },

    /// The requested sampling interval is denser than the video's frames.
    ///
    /// The video was recorded with approximately one picture every
    /// `likely_interval` seconds, so no sampling interval below that value
    /// can be honored. Retry with an interval of at least `likely_interval`.
    #[error(
        "Sample interval {requested_interval}s is smaller than the video's native interval; \
         the video was recorded with approx. one picture every {likely_interval}s"
    )]
    IncompatibleSampleRate {
        /// The guessed native interval of the time-lapse video, in seconds.
        likely_interval: f64,
        /// The interval the caller asked for, in seconds.
        requested_interval: f64,
    },

    /// The frame extractor failed as a whole.
    #[error("Frame extraction failed: {0}")]
    Extraction(String),

    /// A frame filename does not carry a numeric sequence index.
    ///
    /// Extracted frames are named by a zero-padded counter; anything else in
    /// the import directory is a data error, not something to skip silently.
    #[error("Frame filename {path} does not parse as a sequence index")]
    InvalidFrameName {
        /// The offending file.
        path: PathBuf,
    },

    /// A timestamp could not be written into one frame's metadata.
    ///
    /// Recovered per frame: the stamping loop logs it and continues.
    #[error("Failed to write capture time into {path}: {reason}")]
    MetadataWrite {
        /// The frame that rejected the write.
        path: PathBuf,
        /// Underlying reason (corrupt file, unsupported format, io failure).
        reason: String,
    },

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// An error from the `image` crate while encoding an extracted frame.
    #[error("Image processing error: {0}")]
    Image(#[from] ImageError),

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    Ffmpeg(String),
}

impl From<FfmpegError> for SampleError {
    fn from(error: FfmpegError) -> Self {
        SampleError::Ffmpeg(error.to_string())
    }
}
