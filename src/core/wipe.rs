//! Full-wipe strategies.
//!
//! The manual strategy empties the public and private application roots,
//! deleting every direct child outright except those protected by the
//! reserved substring. The system strategy hands the whole job to a host
//! command and does not wait for it.

use crate::core::cleaner::StorageCleaner;
use crate::core::error::DeleteError;
use crate::core::host::AppHost;
use crate::core::storage::list_children;
use crate::{log_debug, log_info, log_warn};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Name fragment that marks native-library storage.
pub const NATIVE_LIBRARY_MARKER: &str = "lib";

/// Default command template for the system clear. `{app_id}` is substituted.
pub const DEFAULT_CLEAR_COMMAND: &str = "pm clear {app_id}";

/// What happened to the direct children of one root.
#[derive(Debug, Default)]
pub struct RootWipeReport {
    pub removed: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<DeleteError>,
}

impl RootWipeReport {
    pub fn all_removed(&self) -> bool {
        self.failed.is_empty()
    }
}

/// `true` when `name` contains the reserved fragment. An empty fragment
/// protects nothing.
fn is_reserved(name: &str, skip: Option<&str>) -> bool {
    skip.is_some_and(|s| !s.is_empty() && name.contains(s))
}

/// Deletes every direct child of `root` whose name does not contain `skip`.
///
/// A missing root, or one that cannot be listed, is nothing to do.
pub fn wipe_root(storage: &StorageCleaner, root: &Path, skip: Option<&str>) -> RootWipeReport {
    let mut report = RootWipeReport::default();
    // Only one level is enumerated here; `delete_entry` does the recursion.
    for child in list_children(storage.fs(), root) {
        if is_reserved(&child.name, skip) {
            log_debug!("🛡️ Keeping protected entry {}", child.path.display());
            report.skipped.push(child.path);
            continue;
        }
        match storage.delete_entry(&child.path) {
            Ok(()) => report.removed.push(child.path),
            Err(e) => {
                // Keep going: one stuck child should not shield its siblings.
                log_warn!(
                    "❌ Failed to delete {}: {}",
                    child.path.display().to_string().bright_yellow(),
                    e
                );
                report.failed.push(e);
            }
        }
    }
    report
}

/// Direct children of `root` that [`wipe_root`] would delete with the same `skip`.
pub fn preview_root(storage: &StorageCleaner, root: &Path, skip: Option<&str>) -> Vec<PathBuf> {
    list_children(storage.fs(), root)
        .into_iter()
        .filter(|child| !is_reserved(&child.name, skip))
        .map(|child| child.path)
        .collect()
}

/// One thing a wipe would do, as reported by [`WipeStrategy::preview`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WipeAction {
    /// Delete this entry and everything below it.
    Delete(PathBuf),
    /// Launch this host command.
    Run(String),
}

impl std::fmt::Display for WipeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WipeAction::Delete(path) => write!(f, "Would delete: {}", path.display()),
            WipeAction::Run(command) => write!(f, "Would run: `{}`", command),
        }
    }
}

/// Result of running a [`WipeStrategy`].
#[derive(Debug)]
pub enum WipeOutcome {
    Manual {
        public: RootWipeReport,
        private: RootWipeReport,
    },
    SystemCommand {
        command: String,
        launched: bool,
    },
}

impl WipeOutcome {
    /// `true` when nothing is known to have gone wrong. For the system
    /// strategy this only says the command could be launched.
    pub fn succeeded(&self) -> bool {
        match self {
            WipeOutcome::Manual { public, private } => public.all_removed() && private.all_removed(),
            WipeOutcome::SystemCommand { launched, .. } => *launched,
        }
    }
}

/// A way of wiping all application data, selectable by the host.
pub trait WipeStrategy: Send + Sync {
    /// Short name used in logs (e.g. "manual").
    fn name(&self) -> &str;

    /// Performs the wipe. Never fails as a whole; see [`WipeOutcome`].
    fn wipe(&self, host: &dyn AppHost, storage: &StorageCleaner) -> WipeOutcome;

    /// What [`WipeStrategy::wipe`] would do right now, without touching anything.
    /// Used by dry runs, so it must follow the exact same rules as `wipe`.
    fn preview(&self, host: &dyn AppHost, storage: &StorageCleaner) -> Vec<WipeAction>;
}

/// Deletes the public and private roots child by child.
#[derive(Debug, Clone)]
pub struct ManualWipe {
    reserved: String,
}

impl Default for ManualWipe {
    fn default() -> Self {
        ManualWipe::new(NATIVE_LIBRARY_MARKER)
    }
}

impl ManualWipe {
    /// `reserved` protects every child whose name contains it. An empty
    /// string protects nothing.
    pub fn new(reserved: impl Into<String>) -> Self {
        ManualWipe {
            reserved: reserved.into(),
        }
    }

    pub fn reserved(&self) -> &str {
        &self.reserved
    }

    fn skip(&self) -> Option<&str> {
        Some(self.reserved.as_str())
    }

    /// The public root, but only while removable storage is mounted.
    fn public_root(host: &dyn AppHost) -> Option<PathBuf> {
        host.public_root().filter(|_| host.is_removable_storage_mounted())
    }
}

impl WipeStrategy for ManualWipe {
    fn name(&self) -> &str {
        "manual"
    }

    fn wipe(&self, host: &dyn AppHost, storage: &StorageCleaner) -> WipeOutcome {
        // Public root first (removable storage), then the private root.
        let public = match Self::public_root(host) {
            Some(root) => {
                log_info!("🧹 Clearing public root {}", root.display().to_string().bright_green());
                wipe_root(storage, &root, self.skip())
            }
            None => {
                log_debug!("Public root unavailable, skipping");
                RootWipeReport::default()
            }
        };

        // The private root is the parent of the files directory, so this also
        // takes cache, databases and preferences with it.
        let private = match host.private_root() {
            Some(root) => {
                log_info!("🧹 Clearing private root {}", root.display().to_string().bright_green());
                wipe_root(storage, &root, self.skip())
            }
            None => RootWipeReport::default(),
        };

        WipeOutcome::Manual { public, private }
    }

    fn preview(&self, host: &dyn AppHost, storage: &StorageCleaner) -> Vec<WipeAction> {
        Self::public_root(host)
            .into_iter()
            .chain(host.private_root())
            .flat_map(|root| preview_root(storage, &root, self.skip()))
            .map(WipeAction::Delete)
            .collect()
    }
}

/// Delegates the wipe to a host command such as `pm clear <app>`.
///
/// The command is fire-and-forget: its exit status is never inspected.
#[derive(Debug, Clone)]
pub struct SystemClearWipe {
    template: String,
}

impl Default for SystemClearWipe {
    fn default() -> Self {
        SystemClearWipe::new(DEFAULT_CLEAR_COMMAND)
    }
}

impl SystemClearWipe {
    pub fn new(template: impl Into<String>) -> Self {
        SystemClearWipe {
            template: template.into(),
        }
    }

    pub fn command_for(&self, app_id: &str) -> String {
        self.template.replace("{app_id}", app_id)
    }
}

impl WipeStrategy for SystemClearWipe {
    fn name(&self) -> &str {
        "system"
    }

    fn wipe(&self, host: &dyn AppHost, _storage: &StorageCleaner) -> WipeOutcome {
        let command = self.command_for(host.app_id());
        // Fire-and-forget: the host spawns the command and we never wait on it.
        let launched = match host.run_shell_command(&command) {
            Ok(pid) => {
                log_info!("🚀 Launched `{}` (pid {})", command.bright_white(), pid);
                true
            }
            Err(e) => {
                log_warn!("Could not launch `{}`: {}", command, e);
                false
            }
        };
        WipeOutcome::SystemCommand { command, launched }
    }

    fn preview(&self, host: &dyn AppHost, _storage: &StorageCleaner) -> Vec<WipeAction> {
        vec![WipeAction::Run(self.command_for(host.app_id()))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn reserved_children_survive() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("app_lib")).unwrap();
        fs::write(root.join("app_lib/libnative.so"), b"elf").unwrap();
        fs::create_dir_all(root.join("cache/nested")).unwrap();
        fs::write(root.join("cache/nested/blob"), b"b").unwrap();
        fs::create_dir(root.join("prefs")).unwrap();

        let report = wipe_root(&StorageCleaner::new(), root, Some("lib"));

        assert!(root.join("app_lib/libnative.so").exists());
        assert!(!root.join("cache").exists());
        assert!(!root.join("prefs").exists());
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.removed.len(), 2);
        assert!(report.all_removed());
    }

    #[test]
    fn missing_root_is_nothing_to_do() {
        let tmp = TempDir::new().unwrap();
        let report = wipe_root(&StorageCleaner::new(), &tmp.path().join("absent"), None);
        assert!(report.removed.is_empty());
        assert!(report.all_removed());
    }

    #[test]
    fn empty_reserved_substring_protects_nothing() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("lib")).unwrap();
        let report = wipe_root(&StorageCleaner::new(), tmp.path(), Some(""));
        assert_eq!(report.removed.len(), 1);
        assert!(!tmp.path().join("lib").exists());
    }

    #[test]
    fn preview_follows_the_same_skip_as_the_wipe() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir(root.join("native_so")).unwrap();
        fs::create_dir(root.join("libcache")).unwrap();
        let storage = StorageCleaner::new();

        let preview = preview_root(&storage, root, Some("native"));
        assert_eq!(preview, vec![root.join("libcache")]);

        let report = wipe_root(&storage, root, Some("native"));
        assert_eq!(report.removed, preview);
        assert!(root.join("native_so").exists());
    }

    #[test]
    fn command_template_substitutes_app_id() {
        let wipe = SystemClearWipe::default();
        assert_eq!(wipe.command_for("com.example.app"), "pm clear com.example.app");
    }
}
