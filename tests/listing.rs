//! Import-directory listing tests.

use std::fs;

use framestamp::{SampleError, list_frames};

#[test]
fn lists_jpg_files_in_temporal_order() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    // Created out of order on purpose; zero-padded names sort temporally.
    for name in ["000003.jpg", "000001.jpg", "000002.jpg"] {
        fs::write(directory.path().join(name), b"frame").expect("Failed to seed frame");
    }

    let frames = list_frames(directory.path()).expect("Listing must succeed");

    let names: Vec<String> = frames
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["000001.jpg", "000002.jpg", "000003.jpg"]);
}

#[test]
fn ignores_non_jpg_entries() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(directory.path().join("000001.jpg"), b"frame").expect("Failed to seed frame");
    fs::write(directory.path().join("notes.txt"), b"sidecar").expect("Failed to seed sidecar");
    fs::write(directory.path().join("000002.png"), b"wrong format")
        .expect("Failed to seed png");
    fs::create_dir(directory.path().join("subdir.jpg")).expect("Failed to seed directory");

    let frames = list_frames(directory.path()).expect("Listing must succeed");

    assert_eq!(frames.len(), 1);
    assert!(frames[0].ends_with("000001.jpg"));
}

#[test]
fn extension_match_is_case_insensitive() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(directory.path().join("000001.JPG"), b"frame").expect("Failed to seed frame");

    let frames = list_frames(directory.path()).expect("Listing must succeed");
    assert_eq!(frames.len(), 1);
}

#[test]
fn empty_directory_lists_nothing() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let frames = list_frames(directory.path()).expect("Listing must succeed");
    assert!(frames.is_empty());
}

#[test]
fn missing_directory_is_an_io_error() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let missing = directory.path().join("gone");

    let error = list_frames(&missing).expect_err("Listing a missing directory must fail");
    assert!(
        matches!(error, SampleError::Io(_)),
        "Expected Io, got {error:?}",
    );
}
