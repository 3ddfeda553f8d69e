//! Config file persistence.
//!
//! The profile is stored as pretty-printed JSON. A missing file is not an
//! error: the first run starts from [`Config::default`] and the file is
//! created when a command first changes something.

use std::io;
use std::path::{Path, PathBuf};

use pizza_core::Config;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while reading or writing the config file.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("cannot read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("cannot write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("cannot serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The on-disk location of the user's profile.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the profile, or return the default profile if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns `PersistError` if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Config, PersistError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No config file, using defaults");
                return Ok(Config::default());
            }
            Err(source) => {
                return Err(PersistError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str(&text).map_err(|source| PersistError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Write the profile, creating the parent directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `PersistError` if serialization or any filesystem call fails.
    pub fn save(&self, config: &Config) -> Result<(), PersistError> {
        let write_err = |source: io::Error| PersistError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(write_err)?;
        }

        let mut text = serde_json::to_string_pretty(config)?;
        text.push('\n');
        std::fs::write(&self.path, text).map_err(write_err)?;

        info!(path = %self.path.display(), "Saved config");
        Ok(())
    }
}
