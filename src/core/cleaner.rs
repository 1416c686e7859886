use crate::core::error::{DeleteError, DeleteResult, Expected};
use crate::core::storage::{EntryKind, StdFs, StorageFs, list_children, with_trailing_separator};
use crate::{log_debug, log_info};
use colored::Colorize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Outcome of a best-effort [`StorageCleaner::clear_directory_contents`] sweep.
///
/// Callers are free to drop it; the sweep never fails as a whole.
#[derive(Debug, Default)]
pub struct ClearReport {
    pub removed: Vec<PathBuf>,
    pub failed: Vec<DeleteError>,
}

impl ClearReport {
    /// `true` when every child that was attempted went away.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn merge(&mut self, other: ClearReport) {
        self.removed.extend(other.removed);
        self.failed.extend(other.failed);
    }
}

/// Deletes files and directory trees through a [`StorageFs`].
///
/// All operations are synchronous and block on the underlying filesystem
/// call. Nothing is cached between calls.
#[derive(Clone)]
pub struct StorageCleaner {
    fs: Arc<dyn StorageFs>,
}

impl fmt::Debug for StorageCleaner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageCleaner").finish_non_exhaustive()
    }
}

impl Default for StorageCleaner {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageCleaner {
    /// A cleaner working on the real filesystem.
    pub fn new() -> Self {
        Self::with_fs(StdFs)
    }

    pub fn with_fs(fs: impl StorageFs + 'static) -> Self {
        StorageCleaner { fs: Arc::new(fs) }
    }

    pub fn fs(&self) -> &dyn StorageFs {
        self.fs.as_ref()
    }

    /// Deletes exactly one file.
    ///
    /// Fails with [`DeleteError::Absent`] if nothing is at `path` and with
    /// [`DeleteError::WrongKind`] if `path` is a directory. Neither case
    /// touches the filesystem.
    pub fn delete_single_file(&self, path: &Path) -> DeleteResult {
        match self.fs.kind(path) {
            Some(EntryKind::File) => {}
            Some(_) => {
                return Err(DeleteError::WrongKind {
                    path: path.to_path_buf(),
                    expected: Expected::File,
                });
            }
            None => return Err(DeleteError::Absent(path.to_path_buf())),
        }

        self.fs
            .remove_file(path)
            .map_err(|e| DeleteError::from_io(path, e))?;
        report_removed(path);
        Ok(())
    }

    /// Deletes a directory and everything beneath it, bottom-up.
    ///
    /// Children are visited in listing order and the walk stops at the first
    /// child that cannot be deleted; later siblings are left alone and the
    /// directory itself survives. The directory is removed only after every
    /// child went away, and that removal decides the result.
    pub fn delete_directory_recursive(&self, path: &Path) -> DeleteResult {
        match self.fs.kind(path) {
            Some(EntryKind::Directory) => {}
            Some(_) => {
                return Err(DeleteError::WrongKind {
                    path: path.to_path_buf(),
                    expected: Expected::Directory,
                });
            }
            None => return Err(DeleteError::Absent(path.to_path_buf())),
        }

        let dir = with_trailing_separator(path);
        let children = self
            .fs
            .list(&dir)
            .map_err(|_| DeleteError::ListingFailed(path.to_path_buf()))?;

        for child in children {
            let result = match child.kind {
                EntryKind::File => self.delete_single_file(&child.path),
                // Unknown entries take the directory branch and fail there as wrong-kind.
                EntryKind::Directory | EntryKind::Unknown => {
                    self.delete_directory_recursive(&child.path)
                }
            };
            if let Err(e) = result {
                log_debug!(
                    "Stopping at {}: {}",
                    child.path.display().to_string().bright_yellow(),
                    e
                );
                return Err(e);
            }
        }

        self.fs
            .remove_dir(path)
            .map_err(|e| DeleteError::from_io(path, e))?;
        report_removed(path);
        Ok(())
    }

    /// Makes the entry at `path` disappear, whatever it is.
    pub fn delete_entry(&self, path: &Path) -> DeleteResult {
        match self.fs.kind(path) {
            None => {
                log_debug!("Nothing to delete at {}", path.display());
                Err(DeleteError::Absent(path.to_path_buf()))
            }
            Some(EntryKind::File) => self.delete_single_file(path),
            Some(_) => self.delete_directory_recursive(path),
        }
    }

    /// Removes the direct children of `dir`, one level only.
    ///
    /// Files are deleted; subdirectories are removed only if already empty.
    /// `dir` itself is never removed. Missing or non-directory targets yield
    /// an empty report, and individual failures are collected, not raised.
    pub fn clear_directory_contents(&self, dir: &Path) -> ClearReport {
        let mut report = ClearReport::default();
        let children = list_children(self.fs.as_ref(), dir);
        if children.is_empty() {
            log_debug!("Nothing to clear in {}", dir.display());
            return report;
        }

        for child in children {
            let result = match child.kind {
                EntryKind::File => self.delete_single_file(&child.path),
                EntryKind::Directory => self
                    .fs
                    .remove_dir(&child.path)
                    .map_err(|e| DeleteError::from_io(&child.path, e)),
                EntryKind::Unknown => self
                    .fs
                    .remove_file(&child.path)
                    .map_err(|e| DeleteError::from_io(&child.path, e)),
            };
            match result {
                Ok(()) => report.removed.push(child.path),
                Err(e) => {
                    log_debug!("Left in place: {}", e);
                    report.failed.push(e);
                }
            }
        }
        report
    }
}

fn report_removed(path: &Path) {
    log_debug!("Removed {}", path.display());
    if std::env::var("APPWIPE_SHOW_DETAILS").is_ok() {
        log_info!("Successfully removed: {}", path.display());
    }
}
