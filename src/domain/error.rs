//! Validation errors raised by the domain layer
//!
//! Every variant is recoverable: the caller discards the attempted change
//! and keeps the previously committed state.

use thiserror::Error;

use super::id::{ContentId, IdError};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error(transparent)]
    Id(#[from] IdError),

    #[error("Unknown status '{0}': expected one of pending, in-progress, review, complete")]
    UnknownStatus(String),

    #[error("Invalid weekday {0}: expected 0 (Sunday) through 6 (Saturday)")]
    InvalidWeekday(u8),

    #[error("Duplicate site ID: {0}")]
    DuplicateSite(u32),

    #[error("Content ID {0} is already in use")]
    Collision(ContentId),

    #[error("Renumbering {id} by {delta} leaves the valid sequence range")]
    SequenceOutOfRange { id: ContentId, delta: i64 },
}
