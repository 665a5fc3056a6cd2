//! CLI definition using clap

use cartage_types::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cartage")]
#[command(version)]
#[command(about = "Interactive ledger for delivery routes, vehicles, and cost allocations")]
#[command(long_about = None)]
pub struct Cli {
    /// Data directory holding the CSV tables. Uses config value if not specified.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Output format for the view actions (json, table). Uses config value if not specified.
    #[arg(long, short = 'f')]
    pub format: Option<OutputFormat>,

    /// Show the current configuration and exit
    #[arg(long)]
    pub show_config: bool,

    /// Persist DATA_DIR as the default data directory and exit
    #[arg(long, value_name = "DATA_DIR")]
    pub set_data_dir: Option<PathBuf>,
}
