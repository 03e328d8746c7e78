//! `config.toml` loading.
//!
//! Every key is optional; a missing file means defaults. A malformed file is reported and the
//! defaults are used instead.

use erwin_core::EditorOptions;
use etcetera::base_strategy::{BaseStrategy, choose_base_strategy};
use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_DIR: &str = "erwin";

/// User configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub tab_stop: usize,
    pub undo_capacity: usize,
    pub status_timeout_secs: u64,
    pub log_file: Option<PathBuf>,
    pub clipboard: ClipboardConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClipboardConfig {
    /// Program and arguments printing the clipboard to stdout.
    pub command: Option<Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        let options = EditorOptions::default();
        Self {
            tab_stop: options.tab_stop,
            undo_capacity: options.undo_capacity,
            status_timeout_secs: options.status_timeout.as_secs(),
            log_file: None,
            clipboard: ClipboardConfig::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub fn config_dir() -> Option<PathBuf> {
    let strategy = choose_base_strategy().ok()?;
    Some(strategy.config_dir().join(APP_DIR))
}

pub fn cache_dir() -> Option<PathBuf> {
    let strategy = choose_base_strategy().ok()?;
    Some(strategy.cache_dir().join(APP_DIR))
}

pub fn default_config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

pub fn default_log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("erwin.log"))
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Read `path`; `Ok(None)` if it does not exist.
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::from_toml(&text)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Load `explicit` or the default config file, falling back to defaults on any error.
    ///
    /// The error, if any, is handed back so it can be logged once logging is up.
    pub fn load(explicit: Option<&Path>) -> (Self, Option<ConfigError>) {
        let Some(path) = explicit.map(Path::to_path_buf).or_else(default_config_file) else {
            return (Self::default(), None);
        };
        match Self::load_from(&path) {
            Ok(config) => (config.unwrap_or_default(), None),
            Err(err) => (Self::default(), Some(err)),
        }
    }

    pub fn editor_options(&self) -> EditorOptions {
        EditorOptions {
            tab_stop: self.tab_stop.max(1),
            undo_capacity: self.undo_capacity.max(1),
            status_timeout: Duration::from_secs(self.status_timeout_secs),
        }
    }
}
