//! Video metadata probing.
//!
//! [`VideoProbe`] is the immutable set of container-reported metrics that
//! rate resolution and start-time resolution work from. It is produced once
//! per video by a [`VideoProber`]; the default implementation,
//! [`FfmpegProber`], reads it via the
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next) demuxer without
//! keeping the file open afterwards.

use std::path::Path;

use ffmpeg_next::{Stream, media::Type};

use crate::error::SampleError;

/// Container-reported metrics for a single video file.
///
/// Produced once per video and never mutated. `creation_time` is the raw
/// metadata string as the container stores it — its format is ambiguous, so
/// parsing is deferred to
/// [`resolve_start_time`](crate::timestamp::resolve_start_time).
#[derive(Debug, Clone)]
#[must_use]
pub struct VideoProbe {
    /// Duration of the video stream, in seconds.
    pub duration: f64,
    /// Number of encoded frames in the video stream.
    pub frame_count: u64,
    /// Frames per second of the video stream (may be approximate).
    pub frame_rate: f64,
    /// Raw creation-time string from the container, if present.
    ///
    /// Absence is a valid, non-error outcome.
    pub creation_time: Option<String>,
    /// Duration of the container's meta (data) stream, in seconds, when one
    /// exists separately from the video stream.
    ///
    /// A meta stream whose duration disagrees with the video stream's is the
    /// signal that a time-lapse video was encoded with a compressed
    /// timeline; see [`resolve_sample_rate`](crate::rate::resolve_sample_rate).
    pub meta_duration: Option<f64>,
}

/// Probes a video file for the metrics in [`VideoProbe`].
///
/// The trait seam exists so the sampling pipeline can be driven by any
/// metadata source; production code uses [`FfmpegProber`].
pub trait VideoProber {
    /// Probe a video file and return its metrics.
    ///
    /// # Errors
    ///
    /// Returns [`SampleError::Probe`] if the file cannot be opened or read,
    /// and [`SampleError::NoVideoStream`] if it contains no video stream.
    /// A missing creation time is `None`, not an error.
    fn probe(&self, path: &Path) -> Result<VideoProbe, SampleError>;
}

/// Default prober backed by the FFmpeg demuxer.
///
/// Opens the file, reads the best video stream and the first data stream,
/// and immediately closes the demuxer.
///
/// # Example
///
/// ```no_run
/// use framestamp::{FfmpegProber, VideoProber};
///
/// let probe = FfmpegProber.probe("timelapse.mp4".as_ref())?;
/// println!("{}s at {} fps", probe.duration, probe.frame_rate);
/// # Ok::<(), framestamp::SampleError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FfmpegProber;

impl VideoProber for FfmpegProber {
    fn probe(&self, path: &Path) -> Result<VideoProbe, SampleError> {
        crate::ffmpeg::init()?;

        let input_context =
            ffmpeg_next::format::input(&path).map_err(|error| SampleError::Probe {
                path: path.to_path_buf(),
                reason: error.to_string(),
            })?;

        let video_stream = input_context
            .streams()
            .best(Type::Video)
            .ok_or(SampleError::NoVideoStream)?;

        let frame_rate = stream_frame_rate(&video_stream);

        // Stream duration in its own time base; fall back to the container
        // duration (microseconds) when the stream does not declare one.
        let duration = stream_duration_seconds(&video_stream)
            .or_else(|| container_duration_seconds(&input_context))
            .ok_or_else(|| SampleError::Probe {
                path: path.to_path_buf(),
                reason: "neither the video stream nor the container reports a duration"
                    .to_string(),
            })?;

        // nb_frames when the container records it; estimate otherwise.
        let declared_frames = video_stream.frames();
        let frame_count = if declared_frames > 0 {
            declared_frames as u64
        } else if frame_rate > 0.0 {
            (duration * frame_rate) as u64
        } else {
            0
        };

        // creation_time lives on the stream for most cameras, on the
        // container for the rest.
        let creation_time = video_stream
            .metadata()
            .get("creation_time")
            .or_else(|| input_context.metadata().get("creation_time"))
            .map(str::to_string);

        let meta_duration = input_context
            .streams()
            .find(|stream| stream.parameters().medium() == Type::Data)
            .and_then(|stream| stream_duration_seconds(&stream));

        Ok(VideoProbe {
            duration,
            frame_count,
            frame_rate,
            creation_time,
            meta_duration,
        })
    }
}

/// Frames per second from the stream's average frame rate, falling back to
/// the declared (real base) rate.
fn stream_frame_rate(stream: &Stream) -> f64 {
    let average = stream.avg_frame_rate();
    if average.denominator() != 0 && average.numerator() != 0 {
        return average.numerator() as f64 / average.denominator() as f64;
    }
    let declared = stream.rate();
    if declared.denominator() != 0 {
        declared.numerator() as f64 / declared.denominator() as f64
    } else {
        0.0
    }
}

/// A stream's duration rescaled from its time base to seconds.
fn stream_duration_seconds(stream: &Stream) -> Option<f64> {
    let duration = stream.duration();
    if duration <= 0 {
        return None;
    }
    let time_base = stream.time_base();
    if time_base.denominator() == 0 {
        return None;
    }
    Some(duration as f64 * time_base.numerator() as f64 / time_base.denominator() as f64)
}

fn container_duration_seconds(input: &ffmpeg_next::format::context::Input) -> Option<f64> {
    let duration = input.duration();
    if duration <= 0 {
        return None;
    }
    Some(duration as f64 / f64::from(ffmpeg_sys_next::AV_TIME_BASE))
}
