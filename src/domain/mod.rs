//! Domain models for Cadence
//!
//! Contains the identifier engine and calendar logic without any I/O concerns.

mod id;
mod error;
mod site;
mod record;
mod derive;
mod catalog;
mod calendar;
mod session;

pub use id::{ContentId, IdError, CONTENT_PREFIX};
pub use error::ValidationError;
pub use site::{ensure_unique_ids, format_days, Site, UpdateDays, WEEKDAY_NAMES};
pub use record::{ContentRecord, ContentStatus};
pub use derive::{derive, DerivationPolicy, STEP_PER_WEEK};
pub use catalog::ContentCatalog;
pub use calendar::{entries_on, month_entries, CalendarEntry, Month, SiteFilter};
pub use session::{EditDraft, Schedule};
