//! Casedesk configuration.
//!
//! Config file: $XDG_CONFIG_HOME/casedesk/config.toml (or the platform
//! equivalent). Every section is optional; missing values fall back to the
//! five-day calendar and the default cases file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::calendar::CalendarConfig;

/// Fallback cases file when no data directory is known
pub const FALLBACK_CASES_FILE: &str = "data/cases.json";

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the cases JSON file
    #[serde(default = "default_cases_file")]
    pub cases_file: PathBuf,
}

fn default_cases_file() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("casedesk").join("cases.json"))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_CASES_FILE))
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            cases_file: default_cases_file(),
        }
    }
}

/// Main casedesk configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub calendar: CalendarConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Default config path: ~/.config/casedesk/config.toml
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("casedesk").join("config.toml"))
    }

    /// Load from the user config path, or defaults if it does not exist.
    pub fn load() -> Result<Self> {
        match Self::user_config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        config
            .calendar
            .validate()
            .context("Invalid [calendar] section")?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = AppConfig::parse("").unwrap();
        assert_eq!(config.calendar, CalendarConfig::default());
    }

    #[test]
    fn test_weekend_calendar_from_toml() {
        let config = AppConfig::parse(
            r#"
            [calendar]
            weekdays = [
                "Monday", "Tuesday", "Wednesday", "Thursday",
                "Friday", "Saturday", "Sunday",
            ]
            weekend = [5, 6]

            [storage]
            cases_file = "/tmp/cases.json"
            "#,
        )
        .unwrap();
        assert!(config.calendar.skips_weekends());
        assert_eq!(config.storage.cases_file, PathBuf::from("/tmp/cases.json"));
    }

    #[test]
    fn test_invalid_calendar_is_rejected() {
        let err = AppConfig::parse("[calendar]\nweekend = [5]").unwrap_err();
        assert!(format!("{:#}", err).contains("7-day"));
    }

    #[test]
    fn test_toml_round_trip() {
        let original = AppConfig {
            calendar: CalendarConfig::full_week_with_weekend(),
            storage: StorageConfig {
                cases_file: PathBuf::from("cases.json"),
            },
        };
        let parsed = AppConfig::parse(&original.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, original);
    }
}
