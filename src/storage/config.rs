//! Configuration handling for Cadence
//!
//! Configuration is read from, in order: an explicit `--config` path,
//! `cadence.toml` in the current directory or a parent, and
//! `~/.config/cadence/config.toml` (platform equivalent). Without any file
//! the built-in two-site calendar is used. Nothing is ever written back.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Weekday;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::{
    ensure_unique_ids, ContentCatalog, ContentId, ContentRecord, ContentStatus, DerivationPolicy,
    Month, Schedule, Site, UpdateDays,
};

/// File name searched for in the working directory and its parents
pub const CONFIG_FILE_NAME: &str = "cadence.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Calendar configuration as stored in TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// How content IDs advance through the year
    #[serde(default)]
    pub policy: DerivationPolicy,

    /// Managed sites
    #[serde(default = "default_sites")]
    pub sites: Vec<Site>,

    /// Records known at startup, keyed by content ID
    #[serde(default)]
    pub records: ContentCatalog,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            policy: DerivationPolicy::default(),
            sites: default_sites(),
            records: seed_records(),
        }
    }
}

fn default_sites() -> Vec<Site> {
    vec![
        Site {
            id: 1,
            name: "Site 1".to_string(),
            update_days: UpdateDays::of(&[Weekday::Mon, Weekday::Wed, Weekday::Fri]),
            base_sequence: 101,
        },
        Site {
            id: 2,
            name: "Site 2".to_string(),
            update_days: UpdateDays::of(&[Weekday::Tue, Weekday::Thu, Weekday::Sat]),
            base_sequence: 201,
        },
    ]
}

fn seed_records() -> ContentCatalog {
    [
        (101, "First Update", "Initial content update", ContentStatus::InProgress),
        (102, "Second Update", "Follow-up content", ContentStatus::Pending),
        (201, "Site 2 Update", "Main site update", ContentStatus::Complete),
    ]
    .into_iter()
    .map(|(seq, title, description, status)| {
        let mut record = ContentRecord::new(title).with_status_value(status);
        record.description = Some(description.to_string());
        (ContentId::content(seq), record)
    })
    .collect()
}

impl CalendarConfig {
    /// Parses and validates TOML content
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: CalendarConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_unique_ids(&self.sites).map_err(|e| ConfigError::Invalid(e.to_string()))?;

        for (id, record) in &self.records {
            if let Some(site) = record.site {
                if !self.sites.iter().any(|s| s.id == site) {
                    return Err(ConfigError::Invalid(format!(
                        "record {} refers to unknown site {}",
                        id, site
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    BuiltIn,
}

impl ConfigSource {
    pub fn describe(&self) -> String {
        match self {
            ConfigSource::File(path) => path.display().to_string(),
            ConfigSource::BuiltIn => "built-in defaults".to_string(),
        }
    }
}

/// Loaded configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub calendar: CalendarConfig,
    pub source: ConfigSource,
}

impl Config {
    /// Loads configuration from the explicit path or the default locations
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_path(path);
        }

        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        if let Some(path) = Self::find_config_file(&cwd) {
            return Self::from_path(&path);
        }

        if let Some(dir) = Self::global_config_dir() {
            let path = dir.join("config.toml");
            if path.is_file() {
                return Self::from_path(&path);
            }
        }

        Ok(Self::built_in())
    }

    /// Built-in defaults
    pub fn built_in() -> Self {
        Self {
            calendar: CalendarConfig::default(),
            source: ConfigSource::BuiltIn,
        }
    }

    /// Loads configuration from a specific file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let calendar = CalendarConfig::parse(&content)
            .with_context(|| format!("Failed to load config: {}", path.display()))?;

        debug!(
            path = %path.display(),
            sites = calendar.sites.len(),
            records = calendar.records.len(),
            "Loaded config"
        );

        Ok(Self {
            calendar,
            source: ConfigSource::File(path.to_path_buf()),
        })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "cadence", "cadence").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Finds `cadence.toml` in `start` or the nearest parent holding one
    pub fn find_config_file(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            let candidate = current.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                return Some(candidate);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Builds the session state, optionally overriding the configured policy
    pub fn into_schedule(self, month: Month, policy: Option<DerivationPolicy>) -> Result<Schedule> {
        let policy = policy.unwrap_or(self.calendar.policy);
        Schedule::new(self.calendar.sites, self.calendar.records, policy, month)
            .map_err(|e| ConfigError::Invalid(e.to_string()))
            .context("Failed to build calendar")
    }
}
