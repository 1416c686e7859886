use crate::core::cleaner::StorageCleaner;
use crate::core::cleaners::{
    CleanupEntry, CustomPathsCleaner, FailedEntry, LocationCleaner, cleaner_for, standard_cleaners,
};
use crate::core::error::{DeleteError, HostError};
use crate::core::host::{AppHost, Location};
use crate::core::storage::list_children;
use crate::core::wipe::{WipeAction, WipeOutcome, WipeStrategy};
use crate::logger::is_debug_enabled;
use crate::utils::filesystem::{bytes_to_human, calculate_dir_size};
use crate::{log_debug, log_info, log_warn};
use colored::Colorize;
use rayon::prelude::*;
use std::env;
use std::path::PathBuf;
use tabled::{Table, settings::Style};

/// What a cleaning run did (or, in dry-run mode, would do).
#[derive(Debug, Default)]
pub struct CleanSummary {
    pub entries: Vec<CleanupEntry>,
    pub failures: Vec<FailedEntry>,
    pub total_freed: u64,
    pub dry_run: bool,
}

impl CleanSummary {
    /// Prints the summary tables to stdout.
    ///
    /// The failures table only shows with `--debug` or `APPWIPE_SHOW_FAILURES`
    /// set, since best-effort sweeps routinely leave non-empty directories.
    pub fn print(&self) {
        let total_fmt = bytes_to_human(self.total_freed);
        let mut rows = self.entries.clone();
        rows.push(CleanupEntry {
            cleaner_name: String::new(),
            path: "Total".to_string(),
            size: total_fmt.clone(),
        });
        let table = Table::new(&rows).with(Style::modern()).to_string();

        if self.dry_run {
            println!("\n{}", "Estimated Cleanup Summary (Dry Run)".bold().underline().purple());
        } else {
            println!("\n{}", "Cleanup Summary".bold().underline().green());
        }
        println!("{}", table);

        if !self.failures.is_empty()
            && (env::var("APPWIPE_SHOW_FAILURES").is_ok() || is_debug_enabled())
        {
            let table = Table::new(&self.failures).with(Style::modern()).to_string();
            println!("\n{}", "Entries Left In Place".bold().underline().yellow());
            println!("{}", table);
        }

        if self.dry_run {
            log_info!("Estimated space to free: {}", total_fmt.bright_green().bold());
        } else {
            log_info!("Total space freed: {}", total_fmt.bright_green().bold());
        }
    }
}

/// Policy layer over the storage cleaner.
///
/// Owns the host it cleans for, so there is no way to run a clean without one.
/// Locations are visited one after another in a fixed order; nothing is
/// atomic and a run may stop part-way through any location.
#[derive(Debug)]
pub struct AppDataCleaner<H: AppHost> {
    host: H,
    storage: StorageCleaner,
    dry_run: bool,
}

impl<H: AppHost> AppDataCleaner<H> {
    pub fn new(host: H) -> Self {
        Self::with_storage(host, StorageCleaner::new())
    }

    pub fn with_storage(host: H, storage: StorageCleaner) -> Self {
        AppDataCleaner {
            host,
            storage,
            dry_run: false,
        }
    }

    /// In dry-run mode cleans only measure and report.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn storage(&self) -> &StorageCleaner {
        &self.storage
    }

    /// Empties every standard location one level deep, then each custom path.
    ///
    /// Running it twice in a row is harmless: the second run finds nothing.
    pub fn clean_application_data(&self, custom_paths: &[String]) -> CleanSummary {
        let mut cleaners = standard_cleaners();
        if !custom_paths.is_empty() {
            cleaners.push(Box::new(CustomPathsCleaner::new(custom_paths.iter().cloned())));
        }
        self.run(&cleaners)
    }

    pub fn clean_location(&self, location: Location) -> CleanSummary {
        self.run(&[cleaner_for(location)])
    }

    pub fn clean_internal_cache(&self) -> CleanSummary {
        self.clean_location(Location::InternalCache)
    }

    /// No-op while removable storage is not mounted.
    pub fn clean_external_cache(&self) -> CleanSummary {
        self.clean_location(Location::ExternalCache)
    }

    pub fn clean_databases(&self) -> CleanSummary {
        self.clean_location(Location::Databases)
    }

    pub fn clean_preferences(&self) -> CleanSummary {
        self.clean_location(Location::Preferences)
    }

    pub fn clean_files(&self) -> CleanSummary {
        self.clean_location(Location::Files)
    }

    pub fn clean_custom_paths(&self, paths: &[String]) -> CleanSummary {
        self.run(&[Box::new(CustomPathsCleaner::new(paths.iter().cloned()))])
    }

    /// Deletes one database through the host, bypassing path-based deletion.
    pub fn clean_database_by_name(&self, name: &str) -> bool {
        if self.dry_run {
            log_info!("Would delete database '{}'", name.bright_green());
            return false;
        }
        let deleted = self.host.delete_named_database(name);
        if deleted {
            log_info!("Deleted database '{}'", name.bright_green());
        } else {
            log_debug!("Database '{}' was not there", name);
        }
        deleted
    }

    /// Aggressive variant of [`Self::clean_application_data`].
    ///
    /// Wipes both roots with `strategy`, deletes each standard location
    /// outright, then empties every custom path. Returns `true` when no
    /// deletion failed; locations that were already gone do not count as
    /// failures.
    pub fn clear_internal_external_storage(
        &self,
        strategy: &dyn WipeStrategy,
        custom_paths: &[String],
    ) -> bool {
        // Dry run: report exactly what the real run below would do, then stop.
        if self.dry_run {
            for action in self.preview_clear(strategy, custom_paths) {
                log_info!("🧾 {}", action.to_string().bright_green());
            }
            return true;
        }

        // Step 1: let the strategy wipe both roots (or hand off to the host).
        let mut ok = self.wipe(strategy).succeeded();

        // Step 2: anything the strategy left behind in the named locations goes
        // entirely, root included. Missing locations are fine.
        for location in Location::ALL {
            let Some(path) = location.resolve(&self.host) else {
                continue; // External cache while removable storage is unmounted.
            };
            match self.storage.delete_entry(&path) {
                Ok(()) => log_debug!("Deleted {} at {}", location.label(), path.display()),
                Err(DeleteError::Absent(_)) => {}
                Err(e) => {
                    log_warn!("❌ Failed to delete {}: {}", location.label(), e);
                    ok = false;
                }
            }
        }

        // Step 3: custom paths are only ever emptied one level deep.
        let custom = CustomPathsCleaner::new(custom_paths.iter().cloned());
        ok &= custom.clean(&self.host, &self.storage).is_clean();
        ok
    }

    /// What [`Self::wipe`] would do with `strategy`, without touching anything.
    pub fn preview_wipe(&self, strategy: &dyn WipeStrategy) -> Vec<WipeAction> {
        strategy.preview(&self.host, &self.storage)
    }

    /// What [`Self::clear_internal_external_storage`] would do.
    ///
    /// Named locations the strategy already covers are listed once. Custom
    /// paths are reported by their (expanded) directory, since only their
    /// direct children would go.
    pub fn preview_clear(
        &self,
        strategy: &dyn WipeStrategy,
        custom_paths: &[String],
    ) -> Vec<WipeAction> {
        let mut actions = self.preview_wipe(strategy);
        let covered: Vec<PathBuf> = actions
            .iter()
            .filter_map(|a| match a {
                WipeAction::Delete(p) => Some(p.clone()),
                WipeAction::Run(_) => None,
            })
            .collect();

        for location in Location::ALL {
            let Some(path) = location.resolve(&self.host) else {
                continue;
            };
            let already = covered.iter().any(|c| path.starts_with(c));
            if !already && self.storage.fs().kind(&path).is_some() {
                actions.push(WipeAction::Delete(path));
            }
        }

        let custom = CustomPathsCleaner::new(custom_paths.iter().cloned());
        for dir in custom.find_paths(&self.host) {
            actions.extend(
                list_children(self.storage.fs(), &dir)
                    .into_iter()
                    .map(|child| WipeAction::Delete(child.path)),
            );
        }
        actions
    }

    pub fn wipe(&self, strategy: &dyn WipeStrategy) -> WipeOutcome {
        log_info!("Wiping application data ({} strategy)", strategy.name().bright_white());
        let outcome = strategy.wipe(&self.host, &self.storage);
        if !outcome.succeeded() {
            log_warn!("Wipe finished with failures; some data may remain");
        }
        outcome
    }

    /// Wipes with `strategy`, then restarts the process regardless of how
    /// much was actually removed.
    pub fn wipe_and_restart(&self, strategy: &dyn WipeStrategy) -> Result<WipeOutcome, HostError> {
        let outcome = self.wipe(strategy);
        // A real host never returns from `restart_process`, so say how the
        // wipe went now rather than leaving it to the caller.
        log_info!(
            "🔄 Restarting {} (wipe {})",
            self.host.app_id().bright_white(),
            if outcome.succeeded() { "complete" } else { "partial" }
        );
        // Restart regardless of the outcome: a partial wipe still relaunches.
        self.host.restart_process()?;
        Ok(outcome)
    }

    fn run(&self, cleaners: &[Box<dyn LocationCleaner>]) -> CleanSummary {
        let mut summary = CleanSummary {
            dry_run: self.dry_run,
            ..CleanSummary::default()
        };

        // --- Phase 1: find every target and measure it before anything is touched ---
        // Each target remembers the index of the cleaner that found it, so the
        // summary can name the location type next to the path.
        let targets: Vec<(usize, PathBuf)> = cleaners
            .iter()
            .enumerate()
            .flat_map(|(i, c)| c.find_paths(&self.host).into_iter().map(move |p| (i, p)))
            .collect();
        for (_, path) in &targets {
            log_info!("Checking: {}", path.display().to_string().blue());
        }
        // Measuring is read-only, so it is safe to spread across threads.
        let before: Vec<u64> = targets.par_iter().map(|(_, p)| calculate_dir_size(p)).collect();

        // --- Phase 2: clean location by location, strictly in order ---
        // Deletion stays sequential; only the measuring above runs in parallel.
        if !self.dry_run {
            for cleaner in cleaners {
                let report = cleaner.clean(&self.host, &self.storage);
                summary
                    .failures
                    .extend(report.failed.iter().map(|e| FailedEntry {
                        path: e.path().display().to_string(),
                        error: e.to_string(),
                    }));
            }
        }

        let after: Vec<u64> = if self.dry_run {
            vec![0; targets.len()]
        } else {
            targets.par_iter().map(|(_, p)| calculate_dir_size(p)).collect()
        };

        // --- Summary: freed = size before - size after, per target ---
        for (((i, path), size_before), size_after) in targets.iter().zip(before).zip(after) {
            let freed = size_before.saturating_sub(size_after);
            summary.total_freed += freed;
            summary.entries.push(CleanupEntry {
                cleaner_name: cleaners[*i].name().to_string(),
                path: path.display().to_string(),
                size: bytes_to_human(freed),
            });
        }
        summary
    }
}
