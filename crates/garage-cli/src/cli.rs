//! CLI argument definitions.

use clap::Parser;

use crate::commands::Commands;

/// Terminal client for the my-garage vehicle inventory.
#[derive(Parser, Debug)]
#[command(name = "garage")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Inventory API base URL
    #[arg(
        long,
        env = "GARAGE_API",
        default_value = "http://localhost:4000",
        global = true
    )]
    pub api: String,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}
