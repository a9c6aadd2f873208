//! Import-directory listing.
//!
//! The import directory is the single source of truth for which frames
//! exist: a non-empty listing before extraction means a prior run already
//! sampled this video, and the listing after extraction is what gets
//! timestamped. Zero-padded names make lexicographic order temporal order.

use std::path::{Path, PathBuf};

use crate::error::SampleError;

/// List the sampled frame files in `dir`, in temporal order.
///
/// Returns the `.jpg` entries sorted by filename. Other files (logs,
/// sidecars) are ignored here; whether a `.jpg` name actually parses as a
/// frame index is decided later by
/// [`frame_index`](crate::timestamp::frame_index).
///
/// # Errors
///
/// Returns [`SampleError::Io`] if the directory cannot be read.
pub fn list_frames(dir: &Path) -> Result<Vec<PathBuf>, SampleError> {
    let mut frames: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|extension| extension.to_str())
                    .is_some_and(|extension| extension.eq_ignore_ascii_case("jpg"))
        })
        .collect();
    frames.sort();
    Ok(frames)
}
