use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Command line of the `erwin` binary.
#[derive(Parser, Debug)]
#[command(name = "erwin", version, about = "ErwinText terminal text editor")]
pub struct Cli {
    /// File to open; created on first save if it does not exist
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Load configuration from a specific file
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Save logs to a specific file
    #[arg(long = "log", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Increase logging verbosity (repeat for more detail)
    #[arg(short = 'v', action = ArgAction::Count)]
    pub verbosity: u8,
}
