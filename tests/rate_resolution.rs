//! Sample-rate resolution integration tests.

use framestamp::{SampleError, VideoProbe, resolve_sample_rate};

fn probe(duration: f64, frame_count: u64, frame_rate: f64, meta: Option<f64>) -> VideoProbe {
    VideoProbe {
        duration,
        frame_count,
        frame_rate,
        creation_time: None,
        meta_duration: meta,
    }
}

#[test]
fn no_meta_stream_returns_inverse_interval() {
    let rate = resolve_sample_rate(&probe(60.0, 1800, 30.0, None), 2.0)
        .expect("No meta stream must not fail");
    assert_eq!(rate, 0.5);

    let rate = resolve_sample_rate(&probe(60.0, 1800, 30.0, None), 0.5)
        .expect("No meta stream must not fail");
    assert_eq!(rate, 2.0);
}

#[test]
fn equal_durations_return_inverse_interval() {
    // Video and meta stream agree: the timeline is real time already and no
    // correction applies, even though a correction source exists.
    let rate = resolve_sample_rate(&probe(60.0, 1800, 30.0, Some(60.0)), 4.0)
        .expect("Equal durations must not fail");
    assert_eq!(rate, 0.25);
}

#[test]
fn denser_than_native_interval_is_rejected() {
    // 60s of real time over 12 frames is a 5s native interval; asking for a
    // frame every second cannot be honored.
    let error = resolve_sample_rate(&probe(59.0, 12, 30.0, Some(60.0)), 1.0)
        .expect_err("Request denser than the native interval must fail");

    match error {
        SampleError::IncompatibleSampleRate {
            likely_interval,
            requested_interval,
        } => {
            assert_eq!(likely_interval, 5.0);
            assert_eq!(requested_interval, 1.0);
        }
        other => panic!("Expected IncompatibleSampleRate, got {other:?}"),
    }
}

#[test]
fn error_message_reports_guessed_interval() {
    let error = resolve_sample_rate(&probe(59.0, 12, 30.0, Some(60.0)), 1.0)
        .expect_err("Request denser than the native interval must fail");
    let message = error.to_string();
    assert!(
        message.contains('5'),
        "Error should report the guessed native interval: {message}",
    );
}

#[test]
fn corrected_rate_scales_native_frame_rate() {
    // likely_interval = round(60 / 12) = 5; rate = 30 * 5 / 10.
    let rate = resolve_sample_rate(&probe(59.0, 12, 30.0, Some(60.0)), 10.0)
        .expect("Request coarser than the native interval must succeed");
    assert_eq!(rate, 15.0);
}

#[test]
fn requesting_exactly_the_native_interval_is_allowed() {
    let rate = resolve_sample_rate(&probe(59.0, 12, 30.0, Some(60.0)), 5.0)
        .expect("Requesting the native interval itself must succeed");
    assert_eq!(rate, 30.0);
}

#[test]
fn measured_interval_is_snapped_up_before_comparison() {
    // 58.8s over 12 frames measures 4.9s per frame, which snaps to 5s, so a
    // requested 4.9s interval is still too dense.
    let error = resolve_sample_rate(&probe(50.0, 12, 30.0, Some(58.8)), 4.9)
        .expect_err("Snapped native interval must drive the comparison");
    match error {
        SampleError::IncompatibleSampleRate {
            likely_interval, ..
        } => assert_eq!(likely_interval, 5.0),
        other => panic!("Expected IncompatibleSampleRate, got {other:?}"),
    }
}

#[test]
fn zero_frame_count_with_meta_stream_is_malformed() {
    let error = resolve_sample_rate(&probe(59.0, 0, 30.0, Some(60.0)), 1.0)
        .expect_err("Zero frames alongside a meta stream is malformed probe data");
    assert!(
        matches!(error, SampleError::MalformedProbe { .. }),
        "Expected MalformedProbe, got {error:?}",
    );
}

#[test]
fn zero_frame_count_without_meta_stream_is_fine() {
    // The frame count is only consulted on the correction path.
    let rate = resolve_sample_rate(&probe(59.0, 0, 30.0, None), 1.0)
        .expect("Frame count is irrelevant without a meta stream");
    assert_eq!(rate, 1.0);
}
