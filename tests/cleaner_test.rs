mod common;

use appwipe::core::cleaner::StorageCleaner;
use appwipe::core::error::DeleteError;
use common::{FailingFs, touch};
use std::io::ErrorKind;
use tempfile::TempDir;

#[test]
fn recursive_delete_stops_at_first_failure() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("d");
    for name in ["a", "b", "c"] {
        touch(&dir.join(name), name);
    }
    let cleaner = StorageCleaner::with_fs(FailingFs::new(&["b"], ErrorKind::PermissionDenied));

    let err = cleaner.delete_directory_recursive(&dir).unwrap_err();

    assert!(matches!(err, DeleteError::PermissionDenied(ref p) if p.ends_with("b")));
    assert!(dir.exists(), "directory must survive a failed child");
    assert!(!dir.join("a").exists(), "siblings before the failure are gone");
    assert!(dir.join("b").exists());
    assert!(dir.join("c").exists(), "siblings after the failure are untouched");
}

#[test]
fn nested_failure_propagates_and_keeps_every_ancestor() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("root");
    touch(&dir.join("inner/deeper/stuck"), "x");
    touch(&dir.join("inner/deeper/zzz"), "x");
    touch(&dir.join("later"), "x");
    let cleaner = StorageCleaner::with_fs(FailingFs::new(&["stuck"], ErrorKind::Other));

    let err = cleaner.delete_entry(&dir).unwrap_err();

    assert!(matches!(err, DeleteError::Io { .. }));
    assert!(dir.join("inner/deeper/stuck").exists());
    assert!(dir.join("inner/deeper/zzz").exists());
    assert!(dir.join("later").exists());
}

#[test]
fn failing_root_removal_decides_the_result() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("sticky");
    touch(&dir.join("a"), "a");
    let cleaner = StorageCleaner::with_fs(FailingFs::new(&["sticky"], ErrorKind::PermissionDenied));

    assert!(cleaner.delete_directory_recursive(&dir).is_err());
    assert!(dir.exists());
    assert!(!dir.join("a").exists());
}

#[test]
fn clearing_contents_keeps_going_past_failures() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("cache");
    for name in ["a", "b", "c"] {
        touch(&dir.join(name), name);
    }
    let cleaner = StorageCleaner::with_fs(FailingFs::new(&["a"], ErrorKind::PermissionDenied));

    let report = cleaner.clear_directory_contents(&dir);

    assert!(dir.join("a").exists());
    assert!(!dir.join("b").exists());
    assert!(!dir.join("c").exists());
    assert_eq!(report.removed.len(), 2);
    assert!(matches!(report.failed[0], DeleteError::PermissionDenied(_)));
}
