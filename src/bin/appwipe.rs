use appwipe::cli::{self, Cli, Commands, Strategy};
use appwipe::core::host::{AppHost, Location};
use appwipe::core::wipe::{ManualWipe, SystemClearWipe, WipeOutcome, WipeStrategy};
use appwipe::core::AppDataCleaner;
use appwipe::host::{Layout, LocalHost};
use appwipe::{log_debug, log_error, log_info, log_warn, logger};
use colored::Colorize;
use tabled::{Table, Tabled, settings::Style};

/// A row of the `locations` table.
#[derive(Tabled)]
struct LocationRow {
    #[tabled(rename = "Location")]
    name: String,
    #[tabled(rename = "Path")]
    path: String,
}

fn main() {
    let cli = cli::parse();
    logger::init(cli.debug);
    log_debug!("Starting with dry_run = {}", cli.dry_run.to_string().bright_blue());

    if let Err(e) = run(&cli) {
        log_error!("{}: {}", "appwipe failed".bright_yellow(), e.to_string().bright_red());
        std::process::exit(1);
    }

    log_debug!("Finished execution.");
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let layout = match &cli.layout {
        Some(path) => Layout::load(path)?,
        None => Layout::default(),
    };
    // The strategies are configured from the layout before it moves into the host.
    let reserved = layout.reserved_substring.clone();
    let clear_command = layout.system_clear_command.clone();
    let host = LocalHost::with_layout(&cli.root, &cli.app_id, layout);
    let cleaner = AppDataCleaner::new(host).dry_run(cli.dry_run);

    match &cli.command {
        Commands::CleanAppData { custom } => {
            log_info!("Cleaning application data for '{}'", cli.app_id.bright_green());
            cleaner.clean_application_data(custom).print();
        }

        Commands::Clean { location } => {
            cleaner.clean_location(*location).print();
        }

        Commands::CleanCustom { paths } => {
            cleaner.clean_custom_paths(paths).print();
        }

        Commands::DropDatabase { name } => {
            if !cleaner.clean_database_by_name(name) && !cli.dry_run {
                log_warn!("No database named '{}'", name.bright_yellow());
            }
        }

        Commands::Wipe {
            strategy,
            restart,
            custom,
        } => {
            let strategy: Box<dyn WipeStrategy> = match strategy {
                Strategy::Manual => Box::new(ManualWipe::new(reserved.as_str())),
                Strategy::System => Box::new(SystemClearWipe::new(clear_command)),
            };

            // Dry run: ask the chosen strategy what it would do and stop there.
            if cli.dry_run {
                let actions = match custom {
                    Some(paths) => cleaner.preview_clear(strategy.as_ref(), paths),
                    None => cleaner.preview_wipe(strategy.as_ref()),
                };
                for action in actions {
                    log_info!("🧾 {}", action.to_string().bright_green());
                }
                return Ok(());
            }

            match (custom, *restart) {
                // Aggressive clear: roots, then named locations, then custom paths.
                (Some(paths), _) => {
                    if !cleaner.clear_internal_external_storage(strategy.as_ref(), paths) {
                        log_warn!("Some application data could not be removed");
                    }
                    if *restart {
                        cleaner.host().restart_process()?;
                    }
                }
                // Full wipe followed by a relaunch, whatever the wipe managed.
                (None, true) => report_wipe(&cleaner.wipe_and_restart(strategy.as_ref())?),
                (None, false) => report_wipe(&cleaner.wipe(strategy.as_ref())),
            }
        }

        Commands::Locations => {
            let host = cleaner.host();
            let mut rows: Vec<LocationRow> = Location::ALL
                .into_iter()
                .map(|location| LocationRow {
                    name: location.label().to_string(),
                    path: location
                        .resolve(host)
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "(removable storage not mounted)".to_string()),
                })
                .collect();
            for (name, root) in [("Public Root", host.public_root()), ("Private Root", host.private_root())] {
                rows.push(LocationRow {
                    name: name.to_string(),
                    path: root.map(|p| p.display().to_string()).unwrap_or_default(),
                });
            }
            println!("{}", Table::new(&rows).with(Style::modern()));
        }
    }

    Ok(())
}

fn report_wipe(outcome: &WipeOutcome) {
    match outcome {
        WipeOutcome::Manual { public, private } => {
            log_info!(
                "Removed {} entries, kept {} protected, {} failed",
                (public.removed.len() + private.removed.len()).to_string().bright_green(),
                public.skipped.len() + private.skipped.len(),
                (public.failed.len() + private.failed.len()).to_string().bright_yellow()
            );
        }
        WipeOutcome::SystemCommand { command, launched } => {
            if *launched {
                log_info!("Handed off to `{}`", command.bright_white());
            }
        }
    }
}
