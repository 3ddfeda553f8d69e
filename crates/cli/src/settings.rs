//! CLI settings loaded from environment variables.
//!
//! These control where the program keeps its files and which vendor endpoint
//! it talks to. The user's ordering profile itself lives in the config file,
//! see [`crate::persist`].
//!
//! # Environment Variables
//!
//! - `PIZZA_CONFIG_DIR` - Directory holding `config.json` (default: `$HOME/.pizza`)
//! - `PIZZA_API_BASE` - Vendor API base URL (default: `https://order.dominos.com`)
//! - `EDITOR` - Editor used by `pizza config --edit` (default: `vi`)
//! - `RUST_LOG` - Log filter (default: `warn`)

use std::path::{Path, PathBuf};

use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE: &str = "https://order.dominos.com";
const DEFAULT_EDITOR: &str = "vi";
const CONFIG_DIR_NAME: &str = ".pizza";
const CONFIG_FILE_NAME: &str = "config.json";

/// Settings errors that can occur during loading.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Process-level settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory holding the config file
    pub config_dir: PathBuf,
    /// Vendor API base URL
    pub api_base: Url,
    /// Editor command line, split on whitespace when launched
    pub editor: String,
}

impl Settings {
    /// Load settings from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if no config directory can be determined or the
    /// API base URL is invalid.
    pub fn from_env() -> Result<Self, SettingsError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let config_dir = match get("PIZZA_CONFIG_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => get("HOME")
                .map(|home| PathBuf::from(home).join(CONFIG_DIR_NAME))
                .ok_or_else(|| SettingsError::MissingEnvVar("HOME".to_string()))?,
        };

        let api_base = parse_api_base(&get("PIZZA_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()))?;

        let editor = get("EDITOR").unwrap_or_else(|| {
            tracing::debug!("EDITOR not set, using {DEFAULT_EDITOR}");
            DEFAULT_EDITOR.to_string()
        });

        Ok(Self {
            config_dir,
            api_base,
            editor,
        })
    }

    /// Returns the directory holding the config file.
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Returns the path of the config file.
    #[must_use]
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }
}

fn parse_api_base(raw: &str) -> Result<Url, SettingsError> {
    let invalid = |reason: String| SettingsError::InvalidEnvVar("PIZZA_API_BASE".to_string(), reason);

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("cannot be used as a base URL".to_string()));
    }
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Settings, SettingsError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let settings = load(&[("HOME", "/home/joe")]).unwrap();
        assert_eq!(settings.config_dir(), Path::new("/home/joe/.pizza"));
        assert_eq!(
            settings.config_file(),
            PathBuf::from("/home/joe/.pizza/config.json")
        );
        assert_eq!(settings.api_base.as_str(), "https://order.dominos.com/");
        assert_eq!(settings.editor, "vi");
    }

    #[test]
    fn test_overrides() {
        let settings = load(&[
            ("HOME", "/home/joe"),
            ("PIZZA_CONFIG_DIR", "/tmp/pizza"),
            ("PIZZA_API_BASE", "http://localhost:8080"),
            ("EDITOR", "nano -w"),
        ])
        .unwrap();
        assert_eq!(settings.config_dir(), Path::new("/tmp/pizza"));
        assert_eq!(settings.api_base.as_str(), "http://localhost:8080/");
        assert_eq!(settings.editor, "nano -w");
    }

    #[test]
    fn test_missing_home() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, SettingsError::MissingEnvVar(ref var) if var == "HOME"));
    }

    #[test]
    fn test_empty_values_count_as_unset() {
        let settings = load(&[("HOME", "/home/joe"), ("EDITOR", "  ")]).unwrap();
        assert_eq!(settings.editor, "vi");
    }

    #[test]
    fn test_invalid_api_base() {
        assert!(matches!(
            load(&[("HOME", "/h"), ("PIZZA_API_BASE", "not a url")]),
            Err(SettingsError::InvalidEnvVar(_, _))
        ));
        assert!(matches!(
            load(&[("HOME", "/h"), ("PIZZA_API_BASE", "ftp://example.com")]),
            Err(SettingsError::InvalidEnvVar(_, _))
        ));
    }
}
