//! Content catalog and identifier renumbering
//!
//! The catalog maps content IDs to their records. Every mutation that can
//! touch more than one key is computed into a fresh map first and returned
//! as a new catalog, so a failed rename never leaves partial changes behind.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::ValidationError;
use super::id::ContentId;
use super::record::ContentRecord;

/// Mapping of content IDs to records, ordered by ID
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentCatalog(BTreeMap<ContentId, ContentRecord>);

impl ContentCatalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Gets the record stored under an ID
    pub fn get(&self, id: &ContentId) -> Option<&ContentRecord> {
        self.0.get(id)
    }

    /// Returns true if a record is stored under the ID
    pub fn contains(&self, id: &ContentId) -> bool {
        self.0.contains_key(id)
    }

    /// Returns the stored record, or a blank pending record carrying the
    /// site and date of the derivation context. Never writes to the catalog.
    pub fn lookup_or_default(
        &self,
        id: &ContentId,
        site: Option<u32>,
        date: Option<NaiveDate>,
    ) -> ContentRecord {
        match self.0.get(id) {
            Some(record) => record.clone(),
            None => ContentRecord::placeholder(site, date),
        }
    }

    /// Stores a record, replacing any previous record under the same ID
    pub fn insert(&mut self, id: ContentId, record: ContentRecord) -> Option<ContentRecord> {
        self.0.insert(id, record)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates records in ID order
    pub fn iter(&self) -> impl Iterator<Item = (&ContentId, &ContentRecord)> {
        self.0.iter()
    }

    /// Iterates IDs in order
    pub fn ids(&self) -> impl Iterator<Item = &ContentId> {
        self.0.keys()
    }

    /// Parses `new_id` and renames `old_id` to it, returning the new catalog.
    ///
    /// With `cascade`, every key sharing the new ID's prefix whose sequence is
    /// greater than `old_id`'s moves by the same delta. The receiver is never
    /// modified; on error the caller keeps its committed catalog.
    pub fn rename(
        &self,
        old_id: &ContentId,
        new_id: &str,
        cascade: bool,
    ) -> Result<ContentCatalog, ValidationError> {
        let new_id: ContentId = new_id.parse()?;
        self.rename_to(old_id, new_id, cascade)
    }

    /// Same as [`ContentCatalog::rename`] with an already parsed target
    pub fn rename_to(
        &self,
        old_id: &ContentId,
        new_id: ContentId,
        cascade: bool,
    ) -> Result<ContentCatalog, ValidationError> {
        if *old_id == new_id {
            return Ok(self.clone());
        }

        let delta = i64::from(new_id.sequence()) - i64::from(old_id.sequence());

        // Keys that move along with the edited one, ascending by sequence
        let shifting: Vec<ContentId> = if cascade {
            self.0
                .keys()
                .filter(|k| k.same_prefix(&new_id) && k.sequence() > old_id.sequence())
                .filter(|k| *k != old_id)
                .copied()
                .collect()
        } else {
            Vec::new()
        };

        let mut moved: BTreeMap<ContentId, ContentRecord> = BTreeMap::new();

        if let Some(record) = self.0.get(old_id) {
            moved.insert(new_id, record.clone());
        }

        for key in &shifting {
            let target = key
                .shifted(delta)
                .ok_or(ValidationError::SequenceOutOfRange { id: *key, delta })?;
            if moved.contains_key(&target) {
                return Err(ValidationError::Collision(target));
            }
            if let Some(record) = self.0.get(key) {
                moved.insert(target, record.clone());
            }
        }

        let mut next: BTreeMap<ContentId, ContentRecord> = self
            .0
            .iter()
            .filter(|(k, _)| *k != old_id && !shifting.contains(k))
            .map(|(k, v)| (*k, v.clone()))
            .collect();

        // A moved key landing on an untouched one is a collision. The target
        // ID is checked even when the old ID has no record yet, since the
        // draft will be saved there.
        if next.contains_key(&new_id) {
            return Err(ValidationError::Collision(new_id));
        }
        for key in moved.keys() {
            if next.contains_key(key) {
                return Err(ValidationError::Collision(*key));
            }
        }

        debug!(
            old = %old_id,
            new = %new_id,
            cascade,
            shifted = shifting.len(),
            "Renumbered catalog"
        );

        next.extend(moved);
        Ok(ContentCatalog(next))
    }
}

impl FromIterator<(ContentId, ContentRecord)> for ContentCatalog {
    fn from_iter<I: IntoIterator<Item = (ContentId, ContentRecord)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ContentCatalog {
    type Item = (&'a ContentId, &'a ContentRecord);
    type IntoIter = std::collections::btree_map::Iter<'a, ContentId, ContentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
