//! Unified error handling for commands.
//!
//! Every command returns `Result<T, CliError>`. Most variants are recoverable:
//! the command stops and `main` reports the error. [`CliError::Fatal`] is raised
//! where a lower layer has decided the run cannot continue. Either way, only
//! `main` exits the process, so unit tests see fatal conditions as values.

use pizza_core::AccessError;
use thiserror::Error;

use crate::editor::EditError;
use crate::persist::PersistError;
use crate::settings::SettingsError;

/// Application-level error type for the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Bad key, bad `key=value` argument, or a value of the wrong type.
    #[error(transparent)]
    Access(#[from] AccessError),

    /// Reading or writing the config file failed.
    #[error(transparent)]
    Persist(#[from] PersistError),

    /// The editor failed or produced an invalid profile.
    #[error(transparent)]
    Edit(#[from] EditError),

    /// Environment settings are missing or invalid.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// Writing command output failed.
    #[error("cannot write output: {0}")]
    Output(#[from] std::io::Error),

    /// Unrecoverable condition; the process should end.
    #[error("{label}: {message}")]
    Fatal {
        label: &'static str,
        message: String,
    },
}

impl CliError {
    /// Build a fatal error with a short label and the underlying message.
    pub fn fatal(label: &'static str, message: impl Into<String>) -> Self {
        Self::Fatal {
            label,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal { .. })
    }

    /// Short label printed in front of the message.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Access(_) | Self::Output(_) => "Error",
            Self::Persist(_) => "Config File Error",
            Self::Edit(_) => "Editor Error",
            Self::Settings(_) => "Settings Error",
            Self::Fatal { label, .. } => *label,
        }
    }

    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        1
    }

    /// The line shown to the user: label plus message.
    #[must_use]
    pub fn report(&self) -> String {
        if self.is_fatal() {
            self.to_string()
        } else {
            format!("{}: {self}", self.label())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_errors_keep_their_message() {
        let err = CliError::from(AccessError::NoVariable);
        assert_eq!(err.to_string(), "no variable given");
        assert_eq!(err.report(), "Error: no variable given");
        assert!(!err.is_fatal());
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_fatal_report() {
        let err = CliError::fatal("Store Find Error", "HTTP error: timed out");
        assert!(err.is_fatal());
        assert_eq!(err.label(), "Store Find Error");
        assert_eq!(err.report(), "Store Find Error: HTTP error: timed out");
    }

    #[test]
    fn test_labels() {
        let err = CliError::from(EditError::NoEditor);
        assert_eq!(err.report(), "Editor Error: no editor configured");

        let err = CliError::from(SettingsError::MissingEnvVar("HOME".to_string()));
        assert_eq!(
            err.report(),
            "Settings Error: Missing environment variable: HOME"
        );
    }
}
