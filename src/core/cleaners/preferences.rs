use crate::core::cleaners::LocationCleaner;
use crate::core::host::{AppHost, Location};
use std::path::PathBuf;

/// Cleans the shared preferences directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct PreferencesCleaner;

impl LocationCleaner for PreferencesCleaner {
    fn name(&self) -> &str {
        Location::Preferences.label()
    }

    fn find_paths(&self, host: &dyn AppHost) -> Vec<PathBuf> {
        vec![host.preferences_dir(host.app_id())]
    }
}
