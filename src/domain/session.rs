//! Editing session state
//!
//! [`Schedule`] is the whole application state of one calendar session.
//! Views read from it; edits go through an [`EditDraft`] that is committed
//! with [`Schedule::save`]. A save either applies completely or leaves the
//! schedule as it was.

use chrono::NaiveDate;
use tracing::{debug, warn};

use super::calendar::{entries_on, month_entries, CalendarEntry, Month, SiteFilter};
use super::catalog::ContentCatalog;
use super::derive::{derive, DerivationPolicy};
use super::error::ValidationError;
use super::id::ContentId;
use super::record::{ContentRecord, ContentStatus};
use super::site::{ensure_unique_ids, Site};

/// Staged edits for one content record
///
/// Field edits only touch the draft. The committed catalog changes on save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    /// ID the editor was opened on
    original_id: ContentId,

    /// ID text as typed, parsed on save
    pub id_text: String,

    /// Record fields being edited
    pub record: ContentRecord,

    /// Shift later IDs along with this one on save
    pub cascade: bool,
}

impl EditDraft {
    /// Opens a draft on an existing or lazily created record
    pub fn new(original_id: ContentId, record: ContentRecord) -> Self {
        Self {
            original_id,
            id_text: original_id.to_string(),
            record,
            cascade: false,
        }
    }

    pub fn original_id(&self) -> ContentId {
        self.original_id
    }

    /// Returns the parsed target ID, or the validation error for the typed text
    pub fn target_id(&self) -> Result<ContentId, ValidationError> {
        Ok(self.id_text.parse()?)
    }

    /// Returns true if the typed ID differs from the original
    pub fn is_renamed(&self) -> bool {
        self.target_id()
            .map(|id| id != self.original_id)
            .unwrap_or(true)
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.record.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.record.description = non_empty(description.into());
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.record.notes = non_empty(notes.into());
    }

    /// Sets the status from free text, keeping the current status on error
    pub fn set_status_text(&mut self, status: &str) -> Result<(), ValidationError> {
        self.record.set_status(status)
    }

    pub fn set_status(&mut self, status: ContentStatus) {
        self.record.status = status;
    }

    pub fn toggle_cascade(&mut self) {
        self.cascade = !self.cascade;
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Application state of a calendar session
#[derive(Debug, Clone)]
pub struct Schedule {
    sites: Vec<Site>,
    catalog: ContentCatalog,
    policy: DerivationPolicy,
    month: Month,
    filter: SiteFilter,
}

impl Schedule {
    /// Creates a schedule showing `month`
    pub fn new(
        sites: Vec<Site>,
        catalog: ContentCatalog,
        policy: DerivationPolicy,
        month: Month,
    ) -> Result<Self, ValidationError> {
        ensure_unique_ids(&sites)?;
        Ok(Self {
            sites,
            catalog,
            policy,
            month,
            filter: SiteFilter::All,
        })
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn site(&self, id: u32) -> Option<&Site> {
        self.sites.iter().find(|s| s.id == id)
    }

    pub fn catalog(&self) -> &ContentCatalog {
        &self.catalog
    }

    pub fn policy(&self) -> DerivationPolicy {
        self.policy
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn filter(&self) -> SiteFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: SiteFilter) {
        self.filter = filter;
    }

    /// Advances the filter to the next site (or back to all sites)
    pub fn cycle_filter(&mut self) {
        self.filter = self.filter.cycle(&self.sites);
    }

    /// Moves the displayed month by `delta`
    pub fn navigate(&mut self, delta: i32) {
        self.month = self.month.offset(delta);
    }

    /// Shows a specific month
    pub fn show_month(&mut self, month: Month) {
        self.month = month;
    }

    /// Derives the content ID of a site on a date
    pub fn derive(&self, site_id: u32, date: NaiveDate) -> Option<ContentId> {
        self.site(site_id)
            .and_then(|site| derive(site, date, self.policy))
    }

    /// Visible entries on one date
    pub fn entries_on(&self, date: NaiveDate) -> Vec<CalendarEntry> {
        entries_on(date, &self.sites, self.filter, self.policy)
    }

    /// Visible entries for the displayed month
    pub fn month_entries(&self) -> Vec<CalendarEntry> {
        month_entries(self.month, &self.sites, self.filter, self.policy)
    }

    /// Status of an ID, pending when no record exists
    pub fn status_of(&self, id: &ContentId) -> ContentStatus {
        self.catalog
            .get(id)
            .map(|r| r.status)
            .unwrap_or_default()
    }

    /// Opens a draft for a calendar entry without touching the catalog
    pub fn open(&self, entry: &CalendarEntry) -> EditDraft {
        let record = self.catalog.lookup_or_default(
            &entry.content_id,
            Some(entry.site_id),
            Some(entry.date),
        );
        EditDraft::new(entry.content_id, record)
    }

    /// Opens a draft for an arbitrary ID
    pub fn open_id(&self, id: ContentId) -> EditDraft {
        EditDraft::new(id, self.catalog.lookup_or_default(&id, None, None))
    }

    /// Commits a draft.
    ///
    /// Renames (with optional cascade) and stores the record under the new
    /// ID as one step. On error nothing changes. Returns the ID the record
    /// was saved under.
    pub fn save(&mut self, draft: &EditDraft) -> Result<ContentId, ValidationError> {
        let result = draft.target_id().and_then(|target| {
            let mut next = self
                .catalog
                .rename_to(&draft.original_id, target, draft.cascade)?;
            next.insert(target, draft.record.clone());
            Ok((target, next))
        });

        match result {
            Ok((target, next)) => {
                self.catalog = next;
                debug!(id = %target, original = %draft.original_id, "Saved content record");
                Ok(target)
            }
            Err(e) => {
                warn!(id = %draft.original_id, error = %e, "Rejected content edit");
                Err(e)
            }
        }
    }
}
