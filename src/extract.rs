//! Frame extraction.
//!
//! [`FrameExtractor`] physically rasterizes frames from a video into an
//! import directory at a resolved sampling rate. The default implementation,
//! [`FfmpegFrameExtractor`], decodes the video stream with FFmpeg and writes
//! one JPEG per sample point, named by a zero-padded sequential counter so
//! that lexicographic order is temporal order.
//!
//! Extraction is a single synchronous call to completion; no progress is
//! streamed and nothing is cancelable mid-flight.

use std::path::Path;

use ffmpeg_next::{
    Rational,
    codec::context::Context as CodecContext,
    format::Pixel,
    frame::Video as VideoFrame,
    media::Type,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};
use image::RgbImage;
use log::debug;

use crate::error::SampleError;

/// Width of the zero-padded frame counter in output filenames.
pub const ZERO_PADDING: usize = 6;

/// Filename for the frame with the given sequential index, e.g. `000042.jpg`.
///
/// Round-trips exactly through
/// [`frame_index`](crate::timestamp::frame_index).
pub fn frame_filename(index: u64) -> String {
    format!("{index:0width$}.jpg", width = ZERO_PADDING)
}

/// Extracts still frames from a video into a destination directory.
///
/// Implementations write image files named `000001.jpg`, `000002.jpg`, …
/// (see [`frame_filename`]) and return how many frames they wrote. The
/// counter starts at 1 and increases in temporal order.
pub trait FrameExtractor {
    /// Extract frames from `video` into `dest_dir` at `rate` frames per
    /// second of video time.
    ///
    /// # Errors
    ///
    /// Returns [`SampleError::Extraction`] (or an FFmpeg/image conversion)
    /// when the extraction fails as a whole. Failure is opaque; there is no
    /// partial-result reporting at this seam.
    fn extract(&self, video: &Path, dest_dir: &Path, rate: f64) -> Result<u64, SampleError>;
}

/// Default extractor backed by the FFmpeg decoder.
///
/// Decodes the best video stream, converts each sampled frame to RGB, and
/// encodes it as JPEG via the [`image`] crate. A frame is sampled whenever
/// its presentation time crosses the next multiple of `1 / rate` seconds;
/// the first decoded frame is always sampled.
#[derive(Debug, Clone, Copy, Default)]
pub struct FfmpegFrameExtractor;

impl FrameExtractor for FfmpegFrameExtractor {
    fn extract(&self, video: &Path, dest_dir: &Path, rate: f64) -> Result<u64, SampleError> {
        crate::ffmpeg::init()?;

        if rate <= 0.0 {
            return Err(SampleError::Extraction(format!(
                "sample rate must be positive, got {rate}"
            )));
        }

        let mut input_context =
            ffmpeg_next::format::input(&video).map_err(|error| SampleError::Extraction(
                format!("cannot open {}: {error}", video.display()),
            ))?;

        let video_stream = input_context
            .streams()
            .best(Type::Video)
            .ok_or(SampleError::NoVideoStream)?;
        let video_stream_index = video_stream.index();
        let time_base = video_stream.time_base();

        let decoder_context = CodecContext::from_parameters(video_stream.parameters())?;
        let mut decoder = decoder_context.decoder().video()?;

        let width = decoder.width();
        let height = decoder.height();
        let mut scaler = ScalingContext::get(
            decoder.format(),
            width,
            height,
            Pixel::RGB24,
            width,
            height,
            ScalingFlags::BILINEAR,
        )?;

        let step = 1.0 / rate;
        let mut sampler = SampleClock::new(step);
        let mut written = 0u64;

        let mut decoded_frame = VideoFrame::empty();
        let mut rgb_frame = VideoFrame::empty();

        for (stream, packet) in input_context.packets() {
            if stream.index() != video_stream_index {
                continue;
            }
            decoder.send_packet(&packet)?;
            while decoder.receive_frame(&mut decoded_frame).is_ok() {
                let seconds = pts_to_seconds(decoded_frame.pts().unwrap_or(0), time_base);
                if sampler.due(seconds) {
                    written += 1;
                    scaler.run(&decoded_frame, &mut rgb_frame)?;
                    save_rgb_frame(&rgb_frame, width, height, dest_dir, written)?;
                }
            }
        }

        // Flush the decoder.
        decoder.send_eof()?;
        while decoder.receive_frame(&mut decoded_frame).is_ok() {
            let seconds = pts_to_seconds(decoded_frame.pts().unwrap_or(0), time_base);
            if sampler.due(seconds) {
                written += 1;
                scaler.run(&decoded_frame, &mut rgb_frame)?;
                save_rgb_frame(&rgb_frame, width, height, dest_dir, written)?;
            }
        }

        debug!(
            "Extracted {written} frames from {} at {rate} fps",
            video.display()
        );
        Ok(written)
    }
}

/// Tracks when the next sample point is reached along the video timeline.
struct SampleClock {
    step: f64,
    next_at: f64,
}

impl SampleClock {
    fn new(step: f64) -> Self {
        Self { step, next_at: 0.0 }
    }

    /// Whether a frame at `seconds` crosses the next sample point. On a hit,
    /// the clock advances past `seconds` so a burst of late frames yields a
    /// single sample.
    fn due(&mut self, seconds: f64) -> bool {
        if seconds < self.next_at {
            return false;
        }
        while self.next_at <= seconds {
            self.next_at += self.step;
        }
        true
    }
}

fn pts_to_seconds(pts: i64, time_base: Rational) -> f64 {
    pts as f64 * time_base.numerator() as f64 / time_base.denominator() as f64
}

/// Strip stride padding from the scaled frame and encode it as JPEG.
fn save_rgb_frame(
    rgb_frame: &VideoFrame,
    width: u32,
    height: u32,
    dest_dir: &Path,
    index: u64,
) -> Result<(), SampleError> {
    let stride = rgb_frame.stride(0);
    let row_bytes = (width as usize) * 3;
    let data = rgb_frame.data(0);

    let buffer = if stride == row_bytes {
        data[..row_bytes * (height as usize)].to_vec()
    } else {
        // Stride includes padding bytes; copy row by row.
        let mut buffer = Vec::with_capacity(row_bytes * (height as usize));
        for row in 0..(height as usize) {
            let row_start = row * stride;
            buffer.extend_from_slice(&data[row_start..row_start + row_bytes]);
        }
        buffer
    };

    let image = RgbImage::from_raw(width, height, buffer).ok_or_else(|| {
        SampleError::Extraction(format!("frame {index} produced a malformed pixel buffer"))
    })?;
    image.save(dest_dir.join(frame_filename(index)))?;
    Ok(())
}
