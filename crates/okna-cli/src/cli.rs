use std::path::PathBuf;

use clap::{Parser, Subcommand};
use okna_core::models::{Extra, ServiceKind, SizeKind};

#[derive(Parser, Debug)]
#[command(name = "okna", version, about = "Price quotes for window and door installation")]
pub struct Cli {
    /// Config file (defaults to the per-user config path)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Quote an order
    Quote {
        #[arg(long, default_value = "window")]
        service: ServiceKind,

        #[arg(long, default_value = "small")]
        size: SizeKind,

        /// Number of units, clamped to 1..=20
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        /// Extra work to include; repeat for several
        #[arg(short, long = "extra")]
        extras: Vec<Extra>,

        #[arg(long)]
        json: bool,
    },

    /// Print the active price table
    Prices {
        #[arg(long)]
        json: bool,
    },

    /// Config file management
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Show where the config file is read from
    Path,
    /// Write the built-in defaults to the config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Check that the config file parses and is complete
    Validate,
}
