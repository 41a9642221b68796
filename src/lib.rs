//! Cadence - a content-update calendar for managed websites
//!
//! Every site publishes on fixed weekdays. Cadence derives the content ID
//! scheduled for each (site, date) pair, keeps a catalog of content records
//! keyed by those IDs, and renumbers the catalog when an ID is edited.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{
    ContentCatalog, ContentId, ContentRecord, ContentStatus, DerivationPolicy, Schedule, Site,
    ValidationError,
};
