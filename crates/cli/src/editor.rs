//! Editing the whole profile in an external editor.
//!
//! The profile is written as JSON to a scratch file, the editor runs against
//! it, and the result is parsed back. The caller gets a new [`Config`] and only
//! replaces its live record on success.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use pizza_core::Config;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur while editing the profile.
#[derive(Debug, Error)]
pub enum EditError {
    #[error("no editor configured")]
    NoEditor,

    #[error("cannot start editor '{program}': {source}")]
    Spawn { program: String, source: io::Error },

    #[error("editor '{program}' exited with {status}")]
    Failed { program: String, status: ExitStatus },

    #[error("edit buffer {}: {source}", .path.display())]
    Buffer { path: PathBuf, source: io::Error },

    #[error("cannot serialize config: {0}")]
    Serialize(serde_json::Error),

    #[error("edited config is invalid: {0}")]
    Parse(serde_json::Error),
}

/// Round-trip `config` through a scratch file in `dir`, letting `edit` change it.
///
/// The CVV is never written to the scratch file; the in-memory value is carried
/// over to the result.
///
/// # Errors
///
/// Returns `EditError` if the scratch file cannot be written or read, if
/// `edit` fails, or if the edited text is not a valid profile.
pub fn edit_with<F>(config: &Config, dir: &Path, edit: F) -> Result<Config, EditError>
where
    F: FnOnce(&Path) -> Result<(), EditError>,
{
    let path = dir.join(format!("pizza-config-{}.json", std::process::id()));
    let buffer_err = |source: io::Error| EditError::Buffer {
        path: path.clone(),
        source,
    };

    let mut text = serde_json::to_string_pretty(config).map_err(EditError::Serialize)?;
    text.push('\n');
    create_buffer(&path)
        .and_then(|mut buffer| buffer.write_all(text.as_bytes()))
        .map_err(buffer_err)?;

    let edited = edit(path.as_path()).and_then(|()| std::fs::read_to_string(&path).map_err(buffer_err));
    if let Err(e) = std::fs::remove_file(&path) {
        warn!(path = %path.display(), error = %e, "Could not remove edit buffer");
    }

    let mut edited: Config = serde_json::from_str(&edited?).map_err(EditError::Parse)?;
    edited.card.set_cvv(config.card.cvv());
    Ok(edited)
}

/// Create the scratch file, owner-only on unix. Fails if `path` already
/// exists, so a planted file or symlink is never written through.
fn create_buffer(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);
    options.open(path)
}

/// An edit step that runs `editor` with the scratch file as its last argument.
///
/// `editor` is split on whitespace, so `"code --wait"` works.
pub fn launch(editor: &str) -> impl FnOnce(&Path) -> Result<(), EditError> + '_ {
    move |path: &Path| {
        let mut parts = editor.split_whitespace();
        let program = parts.next().ok_or(EditError::NoEditor)?;

        debug!(program, path = %path.display(), "Launching editor");
        let status = Command::new(program)
            .args(parts)
            .arg(path)
            .status()
            .map_err(|source| EditError::Spawn {
                program: program.to_string(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(EditError::Failed {
                program: program.to_string(),
                status,
            })
        }
    }
}
