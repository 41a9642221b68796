//! Content record domain model
//!
//! A record holds the editable metadata of one scheduled update.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::ValidationError;

/// Status of a content update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ContentStatus {
    #[default]
    Pending,
    InProgress,
    Review,
    Complete,
}

impl ContentStatus {
    /// All statuses in workflow order
    pub const ALL: [ContentStatus; 4] = [
        ContentStatus::Pending,
        ContentStatus::InProgress,
        ContentStatus::Review,
        ContentStatus::Complete,
    ];

    /// Returns the machine key (`in-progress`)
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentStatus::Pending => "pending",
            ContentStatus::InProgress => "in-progress",
            ContentStatus::Review => "review",
            ContentStatus::Complete => "complete",
        }
    }

    /// Returns a human-readable label (`In Progress`)
    pub fn label(&self) -> &'static str {
        match self {
            ContentStatus::Pending => "Pending",
            ContentStatus::InProgress => "In Progress",
            ContentStatus::Review => "Review",
            ContentStatus::Complete => "Complete",
        }
    }

    /// Returns the next status in workflow order, wrapping around
    pub fn next(self) -> Self {
        match self {
            ContentStatus::Pending => ContentStatus::InProgress,
            ContentStatus::InProgress => ContentStatus::Review,
            ContentStatus::Review => ContentStatus::Complete,
            ContentStatus::Complete => ContentStatus::Pending,
        }
    }

    /// Returns the previous status in workflow order, wrapping around
    pub fn prev(self) -> Self {
        match self {
            ContentStatus::Pending => ContentStatus::Complete,
            ContentStatus::InProgress => ContentStatus::Pending,
            ContentStatus::Review => ContentStatus::InProgress,
            ContentStatus::Complete => ContentStatus::Review,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, ContentStatus::Complete)
    }
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(ContentStatus::Pending),
            "in-progress" => Ok(ContentStatus::InProgress),
            "review" => Ok(ContentStatus::Review),
            "complete" => Ok(ContentStatus::Complete),
            _ => Err(ValidationError::UnknownStatus(s.trim().to_string())),
        }
    }
}

/// Editable metadata for one content update
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Headline shown on the calendar
    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default)]
    pub status: ContentStatus,

    /// Owning site
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<u32>,

    /// Date the update is scheduled for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl ContentRecord {
    /// Creates a pending record with the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Creates the blank record shown when an update has no stored details
    pub fn placeholder(site: Option<u32>, date: Option<NaiveDate>) -> Self {
        Self {
            site,
            date,
            ..Self::default()
        }
    }

    /// Builder-style status setter
    pub fn with_status_value(mut self, status: ContentStatus) -> Self {
        self.status = status;
        self
    }

    /// Returns a copy with the status parsed from free text.
    ///
    /// Unknown values are rejected and the record is left untouched.
    pub fn with_status(&self, status: &str) -> Result<Self, ValidationError> {
        let status: ContentStatus = status.parse()?;
        let mut updated = self.clone();
        updated.status = status;
        Ok(updated)
    }

    /// Sets the status from free text in place, keeping the old value on error
    pub fn set_status(&mut self, status: &str) -> Result<(), ValidationError> {
        self.status = status.parse()?;
        Ok(())
    }

    /// Returns true if no field has been filled in
    pub fn is_blank(&self) -> bool {
        self.title.is_empty()
            && self.description.as_deref().unwrap_or("").is_empty()
            && self.notes.as_deref().unwrap_or("").is_empty()
    }
}
