use crate::core::cleaners::LocationCleaner;
use crate::core::host::{AppHost, Location};
use std::path::PathBuf;

/// Cleans the package's internal cache directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct InternalCacheCleaner;

impl LocationCleaner for InternalCacheCleaner {
    fn name(&self) -> &str {
        Location::InternalCache.label()
    }

    fn find_paths(&self, host: &dyn AppHost) -> Vec<PathBuf> {
        vec![host.package_cache_dir()]
    }
}
