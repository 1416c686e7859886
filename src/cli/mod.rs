pub mod commands;

use clap::Parser;

pub use commands::{Cli, Commands, Strategy};

pub fn parse() -> Cli {
    Cli::parse()
}
