//! Extraction-rate resolution.
//!
//! Given the probed metrics of a video and the sampling interval the caller
//! asked for, [`resolve_sample_rate`] decides the frame rate actually handed
//! to the extractor. For normally encoded videos that is simply
//! `1 / interval`. Time-lapse videos whose container timeline disagrees with
//! their meta stream get the correction described below.

use crate::{error::SampleError, intervals::round_to_sensible_interval, probe::VideoProbe};

/// Compute the extraction frame rate for a requested sampling interval.
///
/// Some cameras encode a time-lapse as a dense video (e.g. 30 fps) while the
/// pictures were actually taken seconds apart. The container then carries a
/// meta stream whose duration reflects real elapsed time, while the video
/// stream's duration reflects the compressed timeline. When the two
/// disagree, the true per-frame interval is `meta_duration / frame_count`,
/// snapped to the nearest sensible time-lapse value; the extraction rate is
/// the video's native frame rate scaled by the ratio of that interval to the
/// requested one, so that one frame is sampled per `requested_interval`
/// seconds of *real* elapsed time.
///
/// `requested_interval` must be greater than zero; the sampling pipeline
/// validates this before calling.
///
/// # Errors
///
/// - [`SampleError::IncompatibleSampleRate`] when the requested interval is
///   smaller than the video's guessed native interval — the video simply
///   does not contain distinct frames that close together. The error carries
///   the guessed interval so the caller can retry with a corrected value.
/// - [`SampleError::MalformedProbe`] when a meta stream is present but the
///   probe reports zero frames.
///
/// # Example
///
/// ```
/// use framestamp::{VideoProbe, resolve_sample_rate};
///
/// let probe = VideoProbe {
///     duration: 60.0,
///     frame_count: 1800,
///     frame_rate: 30.0,
///     creation_time: None,
///     meta_duration: None,
/// };
/// let rate = resolve_sample_rate(&probe, 2.0)?;
/// assert_eq!(rate, 0.5);
/// # Ok::<(), framestamp::SampleError>(())
/// ```
pub fn resolve_sample_rate(
    probe: &VideoProbe,
    requested_interval: f64,
) -> Result<f64, SampleError> {
    let default_rate = 1.0 / requested_interval;

    // Without a meta stream there is no correction data.
    let Some(meta_duration) = probe.meta_duration else {
        return Ok(default_rate);
    };

    // Identical durations mean the container timeline is real time already.
    if probe.duration == meta_duration {
        return Ok(default_rate);
    }

    if probe.frame_count == 0 {
        return Err(SampleError::MalformedProbe {
            reason: "video stream reports zero frames alongside a meta stream".to_string(),
        });
    }

    let calculated_interval = meta_duration / probe.frame_count as f64;
    let likely_interval = round_to_sensible_interval(calculated_interval);

    if requested_interval < likely_interval {
        return Err(SampleError::IncompatibleSampleRate {
            likely_interval,
            requested_interval,
        });
    }

    Ok(probe.frame_rate * likely_interval / requested_interval)
}
