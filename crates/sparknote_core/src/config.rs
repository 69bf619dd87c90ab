//! Runtime configuration.
//!
//! # Responsibility
//! - Resolve where the key-value database, logs and exports live.
//! - Carry effect tuning shared by every host.
//!
//! # Invariants
//! - `data_dir` is absolute, so log initialization accepts it.
//! - Blank environment values are ignored.

use crate::effects::particles::{BurstConfig, Viewport};
use crate::logging::default_log_level;
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "SPARKNOTE_DATA_DIR";
pub const LOG_LEVEL_ENV: &str = "SPARKNOTE_LOG_LEVEL";

const DEFAULT_DATA_DIR_NAME: &str = "sparknote";
const DB_FILE_NAME: &str = "sparknote.sqlite3";
const LOG_DIR_NAME: &str = "logs";
const EXPORT_DIR_NAME: &str = "exports";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub log_level: String,
    pub burst: BurstConfig,
    pub viewport: Viewport,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: std::env::temp_dir().join(DEFAULT_DATA_DIR_NAME),
            log_level: default_log_level().to_string(),
            burst: BurstConfig::default(),
            viewport: Viewport::default(),
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `SPARKNOTE_DATA_DIR` / `SPARKNOTE_LOG_LEVEL`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(dir) = non_blank(lookup(DATA_DIR_ENV)) {
            config.data_dir = absolutize(Path::new(&dir));
        }
        if let Some(level) = non_blank(lookup(LOG_LEVEL_ENV)) {
            config.log_level = level;
        }
        config
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }

    pub fn export_dir(&self) -> PathBuf {
        self.data_dir.join(EXPORT_DIR_NAME)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, DATA_DIR_ENV, LOG_LEVEL_ENV};
    use std::path::PathBuf;

    #[test]
    fn defaults_live_under_temp_dir() {
        let config = AppConfig::from_lookup(|_| None);
        assert!(config.data_dir.starts_with(std::env::temp_dir()));
        assert!(config.db_path().ends_with("sparknote.sqlite3"));
        assert_eq!(config.burst.count, 60);
    }

    #[test]
    fn env_values_override_and_blank_values_are_ignored() {
        let config = AppConfig::from_lookup(|key| match key {
            DATA_DIR_ENV => Some("/var/lib/sparknote".to_string()),
            LOG_LEVEL_ENV => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/sparknote"));
        assert_eq!(config.log_level, AppConfig::default().log_level);
        assert_eq!(config.log_dir(), PathBuf::from("/var/lib/sparknote/logs"));
        assert_eq!(
            config.export_dir(),
            PathBuf::from("/var/lib/sparknote/exports")
        );
    }

    #[test]
    fn relative_data_dir_is_made_absolute() {
        let config = AppConfig::from_lookup(|key| {
            (key == DATA_DIR_ENV).then(|| "notes-data".to_string())
        });
        assert!(config.data_dir.is_absolute());
        assert!(config.data_dir.ends_with("notes-data"));
    }
}
