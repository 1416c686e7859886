use crate::core::cleaner::{ClearReport, StorageCleaner};
use crate::core::host::{AppHost, Location};
use crate::log_debug;
use std::path::PathBuf;
use tabled::Tabled;

/// A row of the successful cleanup summary table.
#[derive(Tabled, Clone, Debug)]
pub struct CleanupEntry {
    #[tabled(rename = "Type")]
    pub cleaner_name: String,
    #[tabled(rename = "Path")]
    pub path: String,
    #[tabled(rename = "Size")]
    pub size: String,
}

/// A row of the failures table.
#[derive(Tabled, Clone, Debug)]
pub struct FailedEntry {
    #[tabled(rename = "Path")]
    pub path: String,
    #[tabled(rename = "Error")]
    pub error: String,
}

/// One storage location cleaned one level deep.
///
/// Implementations only decide *where*; the default [`LocationCleaner::clean`]
/// applies [`StorageCleaner::clear_directory_contents`] to every path found.
pub trait LocationCleaner: Send + Sync {
    /// Label shown in logs and summary tables.
    fn name(&self) -> &str;

    /// Paths this cleaner targets. Missing or gated locations yield nothing.
    fn find_paths(&self, host: &dyn AppHost) -> Vec<PathBuf>;

    fn clean(&self, host: &dyn AppHost, storage: &StorageCleaner) -> ClearReport {
        log_debug!("Starting {} cleanup...", self.name());
        let mut report = ClearReport::default();
        // One level only: nested non-empty directories are reported, not descended into.
        for path in self.find_paths(host) {
            report.merge(storage.clear_directory_contents(&path));
        }
        log_debug!(
            "Finished {} cleanup: {} removed, {} left",
            self.name(),
            report.removed.len(),
            report.failed.len()
        );
        report
    }
}

pub mod custom_paths;
pub use self::custom_paths::CustomPathsCleaner;
pub mod databases;
pub use self::databases::DatabasesCleaner;
pub mod external_cache;
pub use self::external_cache::ExternalCacheCleaner;
pub mod files;
pub use self::files::FilesCleaner;
pub mod internal_cache;
pub use self::internal_cache::InternalCacheCleaner;
pub mod preferences;
pub use self::preferences::PreferencesCleaner;

/// The cleaner responsible for a standard location.
pub fn cleaner_for(location: Location) -> Box<dyn LocationCleaner> {
    match location {
        Location::InternalCache => Box::new(InternalCacheCleaner),
        Location::ExternalCache => Box::new(ExternalCacheCleaner),
        Location::Databases => Box::new(DatabasesCleaner),
        Location::Preferences => Box::new(PreferencesCleaner),
        Location::Files => Box::new(FilesCleaner),
    }
}

/// Cleaners for all standard locations, in visiting order.
pub fn standard_cleaners() -> Vec<Box<dyn LocationCleaner>> {
    // Order matters: caches first, user data (files) last.
    Location::ALL.into_iter().map(cleaner_for).collect()
}
