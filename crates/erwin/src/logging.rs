//! `env_logger` bootstrap.
//!
//! The terminal belongs to the editor, so records go to a file. `RUST_LOG` overrides the level
//! picked from `-v`.

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use std::fs::{self, OpenOptions};
use std::path::Path;

pub fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

pub fn init(log_file: &Path, verbosity: u8) -> Result<()> {
    if let Some(dir) = log_file.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("failed to open log file {}", log_file.display()))?;

    Builder::from_env(Env::default().default_filter_or(default_level(verbosity)))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .context("logger already initialised")?;

    log::info!("erwin {} starting", env!("CARGO_PKG_VERSION"));
    Ok(())
}
