//! Configuration management
//!
//! Optional `settings.json` in the data directory:
//! ```json
//! {
//!   "app": { "maxLoginAttempts": 3, "eventLog": true }
//! }
//! ```
//! Other keys are ignored.

use std::path::Path;

use serde::Deserialize;

use crate::domain::result::{Error, Result};

pub const SETTINGS_FILE: &str = "settings.json";

/// Environment override for the event log switch
pub const EVENT_LOG_ENV: &str = "LIBRIS_EVENT_LOG";

pub const DEFAULT_MAX_LOGIN_ATTEMPTS: u32 = 3;

/// Raw settings.json structure
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    app: AppSettings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default)]
    max_login_attempts: Option<u32>,
    #[serde(default)]
    event_log: Option<bool>,
}

/// Libris configuration (resolved view of the settings)
#[derive(Debug, Clone)]
pub struct Config {
    /// Login attempts allowed before the program exits
    pub max_login_attempts: u32,
    /// Whether events are written to logs.duckdb (off unless enabled)
    pub event_log: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_login_attempts: DEFAULT_MAX_LOGIN_ATTEMPTS,
            event_log: false,
        }
    }
}

impl Config {
    /// Load config from the data directory
    ///
    /// A missing or malformed settings file yields the defaults. A settings
    /// file that exists but cannot be read is an `Error::Io`.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let settings_path = data_dir.join(SETTINGS_FILE);

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        let max_login_attempts = raw
            .app
            .max_login_attempts
            .unwrap_or(DEFAULT_MAX_LOGIN_ATTEMPTS);
        if max_login_attempts == 0 {
            return Err(Error::Config("maxLoginAttempts must be at least 1".to_string()));
        }

        let event_log = match std::env::var(EVENT_LOG_ENV).ok().as_deref() {
            Some("true" | "1" | "yes" | "TRUE" | "YES") => true,
            Some("false" | "0" | "no" | "FALSE" | "NO") => false,
            _ => raw.app.event_log.unwrap_or(false),
        };

        Ok(Self {
            max_login_attempts,
            event_log,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_settings_file() {
        let dir = tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.max_login_attempts, 3);
    }

    #[test]
    fn test_reads_app_settings() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILE),
            r#"{"app": {"maxLoginAttempts": 5, "eventLog": true}}"#,
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.max_login_attempts, 5);
        if std::env::var(EVENT_LOG_ENV).is_err() {
            assert!(config.event_log);
        }
    }

    #[test]
    fn test_event_log_is_off_by_default() {
        assert!(!Config::default().event_log);

        let dir = tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        if std::env::var(EVENT_LOG_ENV).is_err() {
            assert!(!config.event_log);
        }
    }

    #[test]
    fn test_malformed_settings_fall_back_to_defaults() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILE), "{not json").unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.max_login_attempts, DEFAULT_MAX_LOGIN_ATTEMPTS);
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILE),
            r#"{"app": {"maxLoginAttempts": 0}}"#,
        )
        .unwrap();

        assert!(matches!(Config::load(dir.path()), Err(Error::Config(_))));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILE),
            r#"{"app": {"theme": "dark", "maxLoginAttempts": 2}, "branch": "north"}"#,
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.max_login_attempts, 2);
    }

    #[test]
    fn test_unreadable_settings_file_is_io_error() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join(SETTINGS_FILE)).unwrap();

        assert!(matches!(Config::load(dir.path()), Err(Error::Io(_))));
    }
}
