use crate::core::cleaners::LocationCleaner;
use crate::core::host::{AppHost, Location};
use crate::log_debug;
use std::path::PathBuf;

/// Cleans the external cache directory, but only while removable storage is mounted.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExternalCacheCleaner;

impl LocationCleaner for ExternalCacheCleaner {
    fn name(&self) -> &str {
        Location::ExternalCache.label()
    }

    fn find_paths(&self, host: &dyn AppHost) -> Vec<PathBuf> {
        // `resolve` already applies the mount check.
        match Location::ExternalCache.resolve(host) {
            Some(path) => vec![path],
            None => {
                log_debug!("Removable storage unavailable, skipping external cache");
                Vec::new()
            }
        }
    }
}
