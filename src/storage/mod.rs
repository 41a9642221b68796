//! # Storage Layer
//!
//! Read-only configuration for Cadence. Calendar state lives only for the
//! duration of a session; the only file ever read is the configuration.
//!
//! ## Configuration File
//!
//! | Key | Format | Example |
//! |-----|--------|---------|
//! | `policy` | `stepped` or `constant` | `policy = "stepped"` |
//! | `[[sites]]` | `id`, `name`, `update_days`, `base_sequence` | `update_days = [1, 3, 5]` |
//! | `[records.<ID>]` | `title`, `description`, `notes`, `status`, `site`, `date` | `[records.C101]` |
//!
//! ## Key Types
//!
//! - [`Config`] - Loaded configuration and where it came from
//! - [`CalendarConfig`] - The TOML document itself

mod config;

pub use config::{CalendarConfig, Config, ConfigError, ConfigSource, CONFIG_FILE_NAME};
