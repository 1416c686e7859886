use crate::core::cleaners::LocationCleaner;
use crate::core::host::{AppHost, Location};
use std::path::PathBuf;

/// Cleans the application's database directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct DatabasesCleaner;

impl LocationCleaner for DatabasesCleaner {
    fn name(&self) -> &str {
        Location::Databases.label()
    }

    fn find_paths(&self, host: &dyn AppHost) -> Vec<PathBuf> {
        // Databases are resolved per application id; ours is the only one cleaned.
        vec![host.database_dir(host.app_id())]
    }
}
