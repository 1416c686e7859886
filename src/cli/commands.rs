use crate::core::host::Location;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Command-line interface for the `appwipe` utility.
///
/// Global flags describe the host tree being cleaned; the subcommand picks
/// what to clean.
#[derive(Parser, Debug)]
#[command(
    name = "appwipe",
    about = "Cleaner for application-owned storage locations",
    version,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Directory the named locations are resolved against
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Application id substituted into the layout
    #[arg(long = "app-id", global = true, default_value = "com.example.app")]
    pub app_id: String,

    /// JSON file overriding the default location layout
    #[arg(long, global = true)]
    pub layout: Option<PathBuf>,

    /// Show what would be deleted without deleting
    #[arg(long = "dry-run", global = true)]
    pub dry_run: bool,

    /// Print debug output and the failures table
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Which full-wipe strategy to use.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Delete the public and private roots child by child
    Manual,
    /// Launch the layout's system clear command and do not wait for it
    System,
}

/// Subcommands for the `appwipe` tool.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Empty every standard location, then any custom paths
    CleanAppData {
        /// Extra directories (or glob patterns) to empty
        #[arg(long, short, value_delimiter = ',')]
        custom: Vec<String>,
    },

    /// Empty one standard location
    Clean {
        #[arg(value_enum)]
        location: Location,
    },

    /// Empty caller-supplied directories, one level deep
    CleanCustom {
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Delete a database by name
    // Goes through the host, which also removes journal and WAL companions.
    DropDatabase { name: String },

    /// Wipe all application data
    Wipe {
        /// How the wipe is carried out
        #[arg(long, value_enum, default_value_t = Strategy::Manual)]
        strategy: Strategy,

        /// Relaunch the application afterwards
        #[arg(long)]
        restart: bool,

        /// Also delete the standard locations themselves and empty these paths
        #[arg(long, value_delimiter = ',')]
        custom: Option<Vec<String>>,
    },

    /// Print where each location resolves
    Locations,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flags_work_after_the_subcommand() {
        let cli = Cli::try_parse_from([
            "appwipe",
            "clean",
            "internal-cache",
            "--root",
            "/sandbox",
            "--dry-run",
        ])
        .unwrap();
        assert!(cli.dry_run);
        assert_eq!(cli.root, PathBuf::from("/sandbox"));
        assert!(matches!(
            cli.command,
            Commands::Clean {
                location: Location::InternalCache
            }
        ));
    }

    #[test]
    fn custom_paths_split_on_commas() {
        let cli = Cli::try_parse_from(["appwipe", "clean-app-data", "-c", "/a,/b"]).unwrap();
        match cli.command {
            Commands::CleanAppData { custom } => assert_eq!(custom, vec!["/a", "/b"]),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn wipe_accepts_restart_with_system_strategy() {
        let cli =
            Cli::try_parse_from(["appwipe", "wipe", "--strategy", "system", "--restart"]).unwrap();
        match cli.command {
            Commands::Wipe {
                strategy, restart, ..
            } => {
                assert_eq!(strategy, Strategy::System);
                assert!(restart);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn wipe_defaults_to_manual_without_restart() {
        let cli = Cli::try_parse_from(["appwipe", "wipe"]).unwrap();
        match cli.command {
            Commands::Wipe {
                strategy,
                restart,
                custom,
            } => {
                assert_eq!(strategy, Strategy::Manual);
                assert!(!restart);
                assert!(custom.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
