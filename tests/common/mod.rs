#![allow(dead_code)]

use appwipe::core::error::HostError;
use appwipe::core::host::AppHost;
use appwipe::core::storage::{ChildEntry, EntryKind, StdFs, StorageFs};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Real filesystem that lists children by name and refuses to remove the
/// entries named in `fail_on`.
pub struct FailingFs {
    fail_on: Vec<String>,
    kind: io::ErrorKind,
}

impl FailingFs {
    pub fn new(fail_on: &[&str], kind: io::ErrorKind) -> Self {
        FailingFs {
            fail_on: fail_on.iter().map(|s| s.to_string()).collect(),
            kind,
        }
    }

    fn check(&self, path: &Path) -> io::Result<()> {
        let name = path.file_name().map(|n| n.to_string_lossy().into_owned());
        match name {
            Some(n) if self.fail_on.contains(&n) => Err(io::Error::from(self.kind)),
            _ => Ok(()),
        }
    }
}

impl StorageFs for FailingFs {
    fn kind(&self, path: &Path) -> Option<EntryKind> {
        StdFs.kind(path)
    }

    fn list(&self, path: &Path) -> io::Result<Vec<ChildEntry>> {
        let mut children = StdFs.list(path)?;
        children.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(children)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        self.check(path)?;
        StdFs.remove_file(path)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        self.check(path)?;
        StdFs.remove_dir(path)
    }
}

/// Host rooted in a temp directory that records the process-level calls.
pub struct RecordingHost {
    pub root: PathBuf,
    pub mounted: bool,
    pub commands: Mutex<Vec<String>>,
    pub dropped: Mutex<Vec<String>>,
    pub restarted: AtomicBool,
    pub command_fails: bool,
}

impl RecordingHost {
    pub fn new(root: &Path) -> Self {
        RecordingHost {
            root: root.to_path_buf(),
            mounted: true,
            commands: Mutex::new(Vec::new()),
            dropped: Mutex::new(Vec::new()),
            restarted: AtomicBool::new(false),
            command_fails: false,
        }
    }

    pub fn restarted(&self) -> bool {
        self.restarted.load(Ordering::SeqCst)
    }
}

impl AppHost for RecordingHost {
    fn app_id(&self) -> &str {
        "com.example.app"
    }

    fn package_cache_dir(&self) -> PathBuf {
        self.root.join("private/cache")
    }

    fn external_cache_dir(&self) -> Option<PathBuf> {
        Some(self.root.join("sdcard/cache"))
    }

    fn files_dir(&self) -> PathBuf {
        self.root.join("private/files")
    }

    fn database_dir(&self, app_id: &str) -> PathBuf {
        self.root.join("private").join(format!("databases-{app_id}"))
    }

    fn preferences_dir(&self, _app_id: &str) -> PathBuf {
        self.root.join("private/shared_prefs")
    }

    fn public_root(&self) -> Option<PathBuf> {
        Some(self.root.join("sdcard/public"))
    }

    fn is_removable_storage_mounted(&self) -> bool {
        self.mounted
    }

    fn delete_named_database(&self, name: &str) -> bool {
        self.dropped.lock().unwrap().push(name.to_string());
        true
    }

    fn run_shell_command(&self, command: &str) -> Result<u32, HostError> {
        self.commands.lock().unwrap().push(command.to_string());
        if self.command_fails {
            return Err(HostError::CommandFailed {
                command: command.to_string(),
                source: io::Error::from(io::ErrorKind::NotFound),
            });
        }
        Ok(4242)
    }

    fn restart_process(&self) -> Result<(), HostError> {
        self.restarted.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Creates `path` (and parents) holding `contents`.
pub fn touch(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// Number of entries anywhere below `dir`, or `None` if `dir` is gone.
pub fn count_entries(dir: &Path) -> Option<usize> {
    if !dir.exists() {
        return None;
    }
    Some(walkdir::WalkDir::new(dir).min_depth(1).into_iter().count())
}
