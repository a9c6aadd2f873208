//! Sensible time-lapse intervals.
//!
//! Time-lapse cameras record one picture every tenth of a second up to every
//! couple of minutes, so a per-frame interval computed from container
//! metadata should land on one of a small set of plausible values. This
//! module holds that table and the rounding function that snaps a measured
//! interval onto it.

use std::sync::LazyLock;

/// Plausible time-lapse recording intervals, in seconds, ascending.
///
/// Sub-second steps (`0.1` through `0.9`), then whole seconds up to `120`.
/// Built once at first use and never mutated.
pub static SENSIBLE_TIME_LAPSE_INTERVALS: LazyLock<Vec<f64>> = LazyLock::new(|| {
    let mut intervals: Vec<f64> = (1..10).map(|tenths| f64::from(tenths) / 10.0).collect();
    intervals.extend((1..=120).map(f64::from));
    intervals
});

/// Snap a measured per-frame interval to the next sensible value.
///
/// The last picture of a time-lapse video is often not fully accounted for in
/// the container duration, making the video slightly shorter than it should
/// be. A measured interval of `4.9` seconds therefore almost always really
/// means `5` seconds. This function returns the smallest table entry that is
/// greater than or equal to `interval` — an interval already in the table is
/// returned unchanged, and rounding down never happens.
///
/// An interval beyond the table's maximum is returned unchanged: no
/// correction is possible past the table's range.
///
/// # Example
///
/// ```
/// use framestamp::round_to_sensible_interval;
///
/// assert_eq!(round_to_sensible_interval(4.9), 5.0);
/// assert_eq!(round_to_sensible_interval(5.0), 5.0);
/// assert_eq!(round_to_sensible_interval(300.0), 300.0);
/// ```
pub fn round_to_sensible_interval(interval: f64) -> f64 {
    SENSIBLE_TIME_LAPSE_INTERVALS
        .iter()
        .copied()
        .find(|&sensible| interval <= sensible)
        .unwrap_or(interval)
}
