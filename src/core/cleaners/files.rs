use crate::core::cleaners::LocationCleaner;
use crate::core::host::{AppHost, Location};
use std::path::PathBuf;

/// Cleans the generic files directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct FilesCleaner;

impl LocationCleaner for FilesCleaner {
    fn name(&self) -> &str {
        Location::Files.label()
    }

    fn find_paths(&self, host: &dyn AppHost) -> Vec<PathBuf> {
        vec![host.files_dir()]
    }
}
