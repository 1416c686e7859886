use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// What kind of filesystem entry an operation expected to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    File,
    Directory,
}

impl std::fmt::Display for Expected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expected::File => f.write_str("file"),
            Expected::Directory => f.write_str("directory"),
        }
    }
}

/// Why a deletion did not happen.
///
/// Every primitive in [`crate::core::cleaner`] reports failure through this
/// enum instead of a bare `false`, so callers can tell "already gone" apart
/// from "permission denied".
#[derive(Error, Debug)]
pub enum DeleteError {
    #[error("nothing to delete at {0}")]
    Absent(PathBuf),
    #[error("{path} is not a {expected}")]
    WrongKind { path: PathBuf, expected: Expected },
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("could not list {0}")]
    ListingFailed(PathBuf),
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DeleteError {
    /// Classifies an I/O error raised while touching `path`.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => DeleteError::Absent(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => DeleteError::PermissionDenied(path.to_path_buf()),
            _ => DeleteError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    /// The path the failure refers to.
    pub fn path(&self) -> &Path {
        match self {
            DeleteError::Absent(p)
            | DeleteError::PermissionDenied(p)
            | DeleteError::ListingFailed(p) => p,
            DeleteError::WrongKind { path, .. } | DeleteError::Io { path, .. } => path,
        }
    }

    /// `true` when the target simply did not exist.
    pub fn is_absent(&self) -> bool {
        matches!(self, DeleteError::Absent(_))
    }
}

/// Result of a single deletion primitive.
pub type DeleteResult = Result<(), DeleteError>;

/// Failures raised at the host boundary.
#[derive(Error, Debug)]
pub enum HostError {
    #[error("failed to launch `{command}`: {source}")]
    CommandFailed {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("no relaunch command configured")]
    NoRelaunchCommand,
    #[error("invalid layout file {path}: {reason}")]
    InvalidLayout { path: PathBuf, reason: String },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_absent() {
        let err = DeleteError::from_io(Path::new("/x"), io::Error::from(io::ErrorKind::NotFound));
        assert!(err.is_absent());
        assert_eq!(err.path(), Path::new("/x"));
    }

    #[test]
    fn permission_denied_is_kept_distinct() {
        let err = DeleteError::from_io(
            Path::new("/locked"),
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, DeleteError::PermissionDenied(_)));
    }

    #[test]
    fn other_errors_keep_their_source() {
        let err = DeleteError::from_io(Path::new("/busy"), io::Error::other("device busy"));
        assert!(matches!(err, DeleteError::Io { .. }));
        assert!(err.to_string().contains("device busy"));
    }

    #[test]
    fn wrong_kind_names_what_was_expected() {
        let err = DeleteError::WrongKind {
            path: PathBuf::from("/a"),
            expected: Expected::Directory,
        };
        assert_eq!(err.to_string(), "/a is not a directory");
    }

    #[test]
    fn host_errors_name_what_failed() {
        let err = HostError::CommandFailed {
            command: "pm clear app".to_string(),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert!(err.to_string().starts_with("failed to launch `pm clear app`"));
        assert_eq!(
            HostError::NoRelaunchCommand.to_string(),
            "no relaunch command configured"
        );
    }
}
