//! Integration tests for artifact listing over real directory trees.

use kmod_compat::{list_artifacts, ListingOptions, MatrixError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create an empty artifact file, creating parent directories
fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, b"").unwrap();
}

#[test]
fn test_lists_files_recursively() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "clang-12/5.19.0.o");
    touch(dir.path(), "gcc-9/5.4.228.ko");
    touch(dir.path(), "nested/gcc-10/6.1.0.ko");

    let files = list_artifacts(dir.path(), &ListingOptions::default()).unwrap();
    assert_eq!(files.len(), 3);
    assert!(files.contains(&dir.path().join("nested/gcc-10/6.1.0.ko")));
}

#[test]
fn test_directories_are_not_listed() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "gcc-9/5.4.0.ko");
    fs::create_dir_all(dir.path().join("clang-12")).unwrap();

    let files = list_artifacts(dir.path(), &ListingOptions::default()).unwrap();
    assert_eq!(files, vec![dir.path().join("gcc-9/5.4.0.ko")]);
}

#[test]
fn test_metadata_files_are_excluded() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), ".DS_Store");
    touch(dir.path(), "gcc-9/.DS_Store");
    touch(dir.path(), "gcc-9/5.4.0.ko");

    let files = list_artifacts(dir.path(), &ListingOptions::default()).unwrap();
    assert_eq!(files, vec![dir.path().join("gcc-9/5.4.0.ko")]);
}

#[test]
fn test_custom_marker() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "gcc-9/5.4.0.ko");
    touch(dir.path(), "gcc-9/5.4.0.ko.tmp");

    let options = ListingOptions {
        exclude_marker: ".tmp".to_string(),
    };
    let files = list_artifacts(dir.path(), &options).unwrap();
    assert_eq!(files, vec![dir.path().join("gcc-9/5.4.0.ko")]);
}

#[test]
fn test_listing_order_is_deterministic() {
    let dir = TempDir::new().unwrap();
    for file in ["gcc-9/5.4.0.ko", "clang-12/5.4.0.o", "clang-7/4.19.0.o", "gcc-9/4.19.0.ko"] {
        touch(dir.path(), file);
    }

    let first = list_artifacts(dir.path(), &ListingOptions::default()).unwrap();
    let second = list_artifacts(dir.path(), &ListingOptions::default()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first[0], dir.path().join("clang-12/5.4.0.o"));
}

#[test]
fn test_missing_directory() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("does-not-exist");

    let err = list_artifacts(&missing, &ListingOptions::default()).unwrap_err();
    assert!(matches!(err, MatrixError::MissingDirectory { ref path } if *path == missing));
}

#[test]
fn test_empty_directory_message() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("gcc-9")).unwrap();
    touch(dir.path(), ".DS_Store");

    let err = list_artifacts(dir.path(), &ListingOptions::default()).unwrap_err();
    assert!(matches!(err, MatrixError::EmptyDirectory { .. }));
    assert_eq!(
        err.to_string(),
        format!("[Error] Directory {} is empty", dir.path().display())
    );
}
