use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// How a listed entry was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file or symbolic link. Links are never followed.
    File,
    Directory,
    /// The listing could not classify the entry (fifo, socket, device, or a
    /// failed `file_type` lookup).
    Unknown,
}

/// One direct child returned by [`StorageFs::list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildEntry {
    pub path: PathBuf,
    pub name: String,
    pub kind: EntryKind,
}

/// The handful of filesystem calls the cleaner needs.
///
/// [`StdFs`] talks to the real filesystem. Tests wrap it to inject failures.
pub trait StorageFs: Send + Sync {
    /// Classifies `path` without following symlinks. `None` when nothing is there.
    fn kind(&self, path: &Path) -> Option<EntryKind>;

    /// Lists the direct children of a directory.
    fn list(&self, path: &Path) -> io::Result<Vec<ChildEntry>>;

    /// Removes a single non-directory entry.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Removes a directory. Fails unless it is already empty.
    fn remove_dir(&self, path: &Path) -> io::Result<()>;
}

/// [`StorageFs`] backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdFs;

impl StorageFs for StdFs {
    fn kind(&self, path: &Path) -> Option<EntryKind> {
        let metadata = fs::symlink_metadata(path).ok()?;
        let file_type = metadata.file_type();
        Some(if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() || file_type.is_symlink() {
            EntryKind::File
        } else {
            EntryKind::Unknown
        })
    }

    fn list(&self, path: &Path) -> io::Result<Vec<ChildEntry>> {
        let mut children = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let kind = match entry.file_type() {
                Ok(t) if t.is_dir() => EntryKind::Directory,
                Ok(t) if t.is_file() || t.is_symlink() => EntryKind::File,
                _ => EntryKind::Unknown,
            };
            children.push(ChildEntry {
                path: entry.path(),
                name: entry.file_name().to_string_lossy().into_owned(),
                kind,
            });
        }
        Ok(children)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir(path)
    }
}

/// Lists `path`, treating a missing path, a non-directory, or a failed
/// listing as an empty result.
pub fn list_children(fs: &dyn StorageFs, path: &Path) -> Vec<ChildEntry> {
    if fs.kind(path) != Some(EntryKind::Directory) {
        return Vec::new();
    }
    fs.list(path).unwrap_or_default()
}

/// Appends a trailing separator unless one is already there.
pub fn with_trailing_separator(path: &Path) -> PathBuf {
    let raw = path.as_os_str();
    if raw.to_string_lossy().ends_with(MAIN_SEPARATOR) {
        return path.to_path_buf();
    }
    let mut owned = OsString::with_capacity(raw.len() + 1);
    owned.push(raw);
    owned.push(MAIN_SEPARATOR.to_string());
    PathBuf::from(owned)
}
