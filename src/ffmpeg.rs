//! FFmpeg initialisation.
//!
//! FFmpeg has its own logging system, separate from the Rust
//! [`log`](https://crates.io/crates/log) crate, and by default it prints
//! warnings to stderr for every slightly unusual container it touches. The
//! pipeline probes and decodes as a background concern, so FFmpeg output is
//! silenced on first initialisation; the CLI's `--verbose` flag restores it
//! via [`set_ffmpeg_verbose`].

use std::sync::Once;

use ffmpeg_next::util::log::Level;

use crate::error::SampleError;

static DEFAULT_LOG_LEVEL: Once = Once::new();

/// Initialise the FFmpeg libraries (idempotent) and apply the quiet default
/// log level exactly once, so an earlier [`set_ffmpeg_verbose`] call is not
/// clobbered.
pub(crate) fn init() -> Result<(), SampleError> {
    ffmpeg_next::init()
        .map_err(|error| SampleError::Ffmpeg(format!("FFmpeg initialisation failed: {error}")))?;
    DEFAULT_LOG_LEVEL.call_once(|| {
        ffmpeg_next::util::log::set_level(Level::Quiet);
    });
    Ok(())
}

/// Control FFmpeg's own stderr output.
///
/// `true` restores FFmpeg's default `Info` verbosity; `false` silences it.
/// This affects FFmpeg's console output only, not the Rust-side diagnostics
/// emitted through the `log` crate.
pub fn set_ffmpeg_verbose(verbose: bool) {
    DEFAULT_LOG_LEVEL.call_once(|| {});
    let level = if verbose { Level::Info } else { Level::Quiet };
    ffmpeg_next::util::log::set_level(level);
}
