//! # framestamp
//!
//! Sample still frames from a video at a computed rate and stamp each with a
//! plausible, monotonically increasing capture time.
//!
//! `framestamp` serves photogrammetry and mapping pipelines that ingest
//! ordered, capture-timed image sequences but receive raw video instead. It
//! decides the *actual* extraction frame rate from a video's
//! container-reported metrics — correcting time-lapse videos whose encoded
//! timeline disagrees with real elapsed time — extracts frames named by a
//! sequential counter, derives one capture timestamp per frame, and persists
//! the timestamps into EXIF metadata, powered by FFmpeg via the
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next) crate.
//!
//! ## Quick Start
//!
//! ### Sample a video
//!
//! ```no_run
//! use framestamp::{SampleOptions, VideoSampler};
//!
//! let sampler = VideoSampler::new();
//! let summary = sampler.sample(
//!     "timelapse.mp4".as_ref(),
//!     "frames/".as_ref(),
//!     &SampleOptions::new(2.0),
//! )?;
//! println!(
//!     "{} frames extracted, {} stamped",
//!     summary.frames_extracted, summary.report.written,
//! );
//! # Ok::<(), framestamp::SampleError>(())
//! ```
//!
//! ### Probe a video's metrics
//!
//! ```no_run
//! use framestamp::{FfmpegProber, VideoProber};
//!
//! let probe = FfmpegProber.probe("timelapse.mp4".as_ref())?;
//! println!("{}s, {} frames @ {} fps", probe.duration, probe.frame_count, probe.frame_rate);
//! # Ok::<(), framestamp::SampleError>(())
//! ```
//!
//! ## How the rate is decided
//!
//! Some cameras encode a time-lapse as a dense video while the pictures were
//! actually taken seconds apart; the container's meta stream then reports a
//! longer duration than the video stream. When the two disagree, the true
//! per-frame interval is estimated from the meta duration and frame count,
//! snapped up to the nearest sensible time-lapse value (a measured `4.9`
//! almost always means `5`), and the extraction rate is scaled so one frame
//! is sampled per requested interval of *real* elapsed time. A request
//! denser than the video's native interval is rejected with the guessed
//! interval, so the caller can retry with a corrected value.
//!
//! ## Pipeline
//!
//! Strictly sequential, single-threaded: probe → rate resolution →
//! extraction → per-frame timestamp derivation → metadata stamping. Fatal
//! errors abort the run; a metadata write failing on one frame is logged and
//! skipped, and the batch carries on.
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on your system.

pub mod error;
pub mod extract;
pub mod ffmpeg;
pub mod intervals;
pub mod listing;
pub mod probe;
pub mod rate;
pub mod sampler;
pub mod timestamp;
pub mod writer;

pub use error::SampleError;
pub use extract::{FfmpegFrameExtractor, FrameExtractor, ZERO_PADDING, frame_filename};
pub use ffmpeg::set_ffmpeg_verbose;
pub use intervals::{SENSIBLE_TIME_LAPSE_INTERVALS, round_to_sensible_interval};
pub use listing::list_frames;
pub use probe::{FfmpegProber, VideoProbe, VideoProber};
pub use rate::resolve_sample_rate;
pub use sampler::{SampleOptions, SampleSummary, VideoSampler};
pub use timestamp::{
    FrameRecord, TIME_FORMAT, TIME_FORMAT_ALT, frame_index, parse_creation_time,
    resolve_start_time, sequence_timestamps,
};
pub use writer::{ExifTimestampWriter, TimestampWriter, WriteReport, apply_timestamps};
