//! Profile commands.
//!
//! # Usage
//!
//! ```bash
//! # Print fields (keys are case-insensitive)
//! pizza config get name address.street
//!
//! # Change fields; '-' clears a field
//! pizza config set name=joe zip=20500 state=-
//!
//! # Show everything, or edit everything in $EDITOR
//! pizza config --getall
//! pizza config --edit
//! ```

use std::io::Write;
use std::path::Path;

use pizza_core::{Config, ConfigKey, parse_assignment};
use tracing::{info, warn};

use crate::editor;
use crate::error::CliError;

/// Print the requested fields, one per line.
///
/// # Errors
///
/// Returns an error if no key is given or a key matches no field.
pub fn get<S: AsRef<str>>(config: &Config, keys: &[S], out: &mut impl Write) -> Result<(), CliError> {
    for value in config.get_many(keys)? {
        writeln!(out, "{value}")?;
    }
    Ok(())
}

/// Apply `key=value` assignments. Nothing changes unless all of them succeed.
///
/// # Errors
///
/// Returns an error if no assignment is given, one is malformed, names an
/// unknown key, or carries a value of the wrong type.
pub fn set<S: AsRef<str>>(config: &mut Config, assignments: &[S]) -> Result<(), CliError> {
    config.set_many(assignments)?;
    info!(fields = assignments.len(), "Updated config");
    if sets_cvv(assignments) {
        warn!("The CVV is kept for this run only and is not saved to the config file");
    }
    Ok(())
}

fn sets_cvv<S: AsRef<str>>(assignments: &[S]) -> bool {
    assignments.iter().any(|arg| {
        parse_assignment(arg.as_ref())
            .ok()
            .and_then(|(key, _)| key.parse::<ConfigKey>().ok())
            == Some(ConfigKey::Cvv)
    })
}

/// Print every field except the CVV.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn list(config: &Config, out: &mut impl Write) -> Result<(), CliError> {
    write!(out, "{}", config.listing())?;
    Ok(())
}

/// Edit the whole profile with `editor`, using `scratch_dir` for the buffer.
///
/// # Errors
///
/// Returns an error if the editor fails or leaves an invalid profile; the
/// profile is unchanged in that case.
pub fn edit(config: &mut Config, editor: &str, scratch_dir: &Path) -> Result<(), CliError> {
    *config = editor::edit_with(config, scratch_dir, editor::launch(editor))?;
    Ok(())
}

/// Print a path on its own line.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn show_path(path: &Path, out: &mut impl Write) -> Result<(), CliError> {
    writeln!(out, "{}", path.display())?;
    Ok(())
}
