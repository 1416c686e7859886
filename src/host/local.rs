use crate::core::error::HostError;
use crate::core::host::AppHost;
use crate::core::wipe::{DEFAULT_CLEAR_COMMAND, NATIVE_LIBRARY_MARKER};
use crate::{log_debug, log_info, log_warn};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Where each named location lives below the host root.
///
/// Every field may contain `{app_id}`, which is replaced by the application
/// id. All fields are optional in the layout file; missing ones keep the
/// Android-style defaults.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Layout {
    /// Private application root, relative to the host root.
    pub private_root: String,
    pub cache: String,
    pub databases: String,
    pub shared_prefs: String,
    pub files: String,
    /// Mount point of removable storage, relative to the host root.
    pub external_root: String,
    /// External cache, relative to `external_root`.
    pub external_cache: String,
    /// Public application root, relative to `external_root`.
    pub public_root: String,
    /// Pretend removable storage is unplugged when `false`.
    pub external_mounted: bool,
    /// Program and arguments spawned by `restart_process`.
    pub relaunch: Vec<String>,
    pub system_clear_command: String,
    pub reserved_substring: String,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            private_root: "data/{app_id}".to_string(),
            cache: "cache".to_string(),
            databases: "databases".to_string(),
            shared_prefs: "shared_prefs".to_string(),
            files: "files".to_string(),
            external_root: "external".to_string(),
            external_cache: "Android/data/{app_id}/cache".to_string(),
            public_root: "{app_id}".to_string(),
            external_mounted: true,
            relaunch: Vec::new(),
            system_clear_command: DEFAULT_CLEAR_COMMAND.to_string(),
            reserved_substring: NATIVE_LIBRARY_MARKER.to_string(),
        }
    }
}

impl Layout {
    /// Reads a JSON layout file.
    pub fn load(path: &Path) -> Result<Layout, HostError> {
        let raw = fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|e| HostError::InvalidLayout {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

/// [`AppHost`] that maps the named locations into a directory tree.
#[derive(Debug, Clone)]
pub struct LocalHost {
    root: PathBuf,
    app_id: String,
    layout: Layout,
}

impl LocalHost {
    pub fn new(root: impl Into<PathBuf>, app_id: impl Into<String>) -> Self {
        Self::with_layout(root, app_id, Layout::default())
    }

    pub fn with_layout(root: impl Into<PathBuf>, app_id: impl Into<String>, layout: Layout) -> Self {
        LocalHost {
            root: root.into(),
            app_id: app_id.into(),
            layout,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    fn expand(template: &str, app_id: &str) -> PathBuf {
        PathBuf::from(template.replace("{app_id}", app_id))
    }

    fn private_dir(&self, app_id: &str) -> PathBuf {
        self.root.join(Self::expand(&self.layout.private_root, app_id))
    }

    fn external_dir(&self) -> PathBuf {
        self.root.join(&self.layout.external_root)
    }
}

impl AppHost for LocalHost {
    fn app_id(&self) -> &str {
        &self.app_id
    }

    fn package_cache_dir(&self) -> PathBuf {
        self.private_dir(&self.app_id).join(&self.layout.cache)
    }

    fn external_cache_dir(&self) -> Option<PathBuf> {
        Some(
            self.external_dir()
                .join(Self::expand(&self.layout.external_cache, &self.app_id)),
        )
    }

    fn files_dir(&self) -> PathBuf {
        self.private_dir(&self.app_id).join(&self.layout.files)
    }

    fn database_dir(&self, app_id: &str) -> PathBuf {
        self.private_dir(app_id).join(&self.layout.databases)
    }

    fn preferences_dir(&self, app_id: &str) -> PathBuf {
        self.private_dir(app_id).join(&self.layout.shared_prefs)
    }

    fn public_root(&self) -> Option<PathBuf> {
        Some(
            self.external_dir()
                .join(Self::expand(&self.layout.public_root, &self.app_id)),
        )
    }

    fn is_removable_storage_mounted(&self) -> bool {
        self.layout.external_mounted && self.external_dir().is_dir()
    }

    /// Removes the database file and its journal, WAL and shared-memory
    /// companions.
    ///
    /// The result reflects the main file alone. Companions are cleaned up
    /// best-effort, even when the main file is already gone, and a companion
    /// that cannot be removed is only logged.
    fn delete_named_database(&self, name: &str) -> bool {
        let dir = self.database_dir(&self.app_id);
        let main = dir.join(name);

        // The main file decides the result; anything but a regular file counts as absent.
        let deleted = main.is_file()
            && match fs::remove_file(&main) {
                Ok(()) => true,
                Err(e) => {
                    log_warn!("❌ Could not remove database {}: {}", main.display(), e);
                    false
                }
            };

        // Leftover companions go too, without affecting the result.
        for suffix in ["-journal", "-wal", "-shm"] {
            let companion = dir.join(format!("{name}{suffix}"));
            if fs::symlink_metadata(&companion).is_err() {
                continue; // Nothing there.
            }
            if let Err(e) = fs::remove_file(&companion) {
                log_warn!("Could not remove {}: {}", companion.display(), e);
            }
        }
        deleted
    }

    fn run_shell_command(&self, command: &str) -> Result<u32, HostError> {
        log_debug!("Running shell command: {}", command);
        let child = Command::new("sh")
            .arg("-c")
            .arg(command)
            .spawn()
            .map_err(|source| HostError::CommandFailed {
                command: command.to_string(),
                source,
            })?;
        Ok(child.id())
    }

    fn restart_process(&self) -> Result<(), HostError> {
        let (program, args) = self
            .layout
            .relaunch
            .split_first()
            .ok_or(HostError::NoRelaunchCommand)?;
        Command::new(program)
            .args(args)
            .spawn()
            .map_err(|source| HostError::CommandFailed {
                command: self.layout.relaunch.join(" "),
                source,
            })?;
        log_info!("Relaunch requested, exiting");
        std::process::exit(0);
    }
}
