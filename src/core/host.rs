use crate::core::error::HostError;
use std::path::{Path, PathBuf};

/// The host environment the cleaner runs inside.
///
/// The host resolves the named storage locations and provides the few
/// process-level primitives (restart, shell command, database deletion)
/// the wipe flows need. The cleaner never computes these paths itself.
pub trait AppHost: Send + Sync {
    /// Identifier of the application whose data is being cleaned.
    fn app_id(&self) -> &str;

    fn package_cache_dir(&self) -> PathBuf;

    /// External cache directory, if the host has one at all.
    fn external_cache_dir(&self) -> Option<PathBuf>;

    fn files_dir(&self) -> PathBuf;

    fn database_dir(&self, app_id: &str) -> PathBuf;

    fn preferences_dir(&self, app_id: &str) -> PathBuf;

    /// App-owned directory on removable storage wiped by the full wipe.
    fn public_root(&self) -> Option<PathBuf>;

    /// Private root wiped by the full wipe: the parent of the files directory.
    fn private_root(&self) -> Option<PathBuf> {
        self.files_dir().parent().map(Path::to_path_buf)
    }

    /// Gate for everything backed by removable storage.
    fn is_removable_storage_mounted(&self) -> bool;

    /// Deletes a database by its logical name. Returns `true` if it existed.
    fn delete_named_database(&self, name: &str) -> bool;

    /// Launches `command` and returns without waiting for it. Yields the process id.
    fn run_shell_command(&self, command: &str) -> Result<u32, HostError>;

    /// Asks the host to relaunch the application, then ends the current
    /// process. Real hosts return only on failure.
    fn restart_process(&self) -> Result<(), HostError>;
}

/// The five standard storage locations a host exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Location {
    InternalCache,
    ExternalCache,
    Databases,
    Preferences,
    Files,
}

impl Location {
    /// All locations, in the order the application-data clean visits them.
    pub const ALL: [Location; 5] = [
        Location::InternalCache,
        Location::ExternalCache,
        Location::Databases,
        Location::Preferences,
        Location::Files,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Location::InternalCache => "Internal Cache",
            Location::ExternalCache => "External Cache",
            Location::Databases => "Databases",
            Location::Preferences => "Preferences",
            Location::Files => "Files",
        }
    }

    /// Resolves the location through `host`.
    ///
    /// The external cache resolves to `None` while removable storage is not
    /// mounted.
    pub fn resolve(self, host: &dyn AppHost) -> Option<PathBuf> {
        match self {
            Location::InternalCache => Some(host.package_cache_dir()),
            Location::ExternalCache => {
                if host.is_removable_storage_mounted() {
                    host.external_cache_dir()
                } else {
                    None
                }
            }
            Location::Databases => Some(host.database_dir(host.app_id())),
            Location::Preferences => Some(host.preferences_dir(host.app_id())),
            Location::Files => Some(host.files_dir()),
        }
    }
}
