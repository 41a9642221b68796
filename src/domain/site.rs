//! Site domain model
//!
//! A site is a managed website with a weekly update cadence. Weekdays are
//! numbered from Sunday: 0 = Sunday through 6 = Saturday.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// Set of weekdays on which a site publishes an update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct UpdateDays(u8);

impl UpdateDays {
    /// Creates an empty set
    pub fn new() -> Self {
        Self(0)
    }

    /// Builds a set from Sunday-based weekday numbers
    pub fn from_numbers(days: &[u8]) -> Result<Self, ValidationError> {
        let mut set = Self::new();
        for &day in days {
            set.insert(day)?;
        }
        Ok(set)
    }

    /// Builds a set from chrono weekdays
    pub fn of(days: &[Weekday]) -> Self {
        days.iter()
            .fold(Self::new(), |set, day| Self(set.0 | 1 << day.num_days_from_sunday()))
    }

    /// Adds a Sunday-based weekday number to the set
    pub fn insert(&mut self, day: u8) -> Result<(), ValidationError> {
        if day > 6 {
            return Err(ValidationError::InvalidWeekday(day));
        }
        self.0 |= 1 << day;
        Ok(())
    }

    /// Returns true if updates happen on the given weekday
    pub fn contains(&self, weekday: Weekday) -> bool {
        let day = weekday.num_days_from_sunday();
        self.0 & (1 << day) != 0
    }

    /// Returns true if the date falls on one of the update weekdays
    pub fn includes_date(&self, date: NaiveDate) -> bool {
        self.contains(date.weekday())
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Number of update days per week
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates weekday numbers in ascending order
    pub fn numbers(&self) -> impl Iterator<Item = u8> + '_ {
        (0..7u8).filter(move |day| self.0 & (1 << day) != 0)
    }
}

impl TryFrom<Vec<u8>> for UpdateDays {
    type Error = ValidationError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_numbers(&value)
    }
}

impl From<UpdateDays> for Vec<u8> {
    fn from(days: UpdateDays) -> Self {
        days.numbers().collect()
    }
}

/// A managed website
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    /// Unique site identifier
    pub id: u32,

    /// Display name
    pub name: String,

    /// Weekdays with a scheduled update
    pub update_days: UpdateDays,

    /// Sequence number of the first update of the year
    pub base_sequence: u32,
}

impl Site {
    /// Creates a new site
    pub fn new(
        id: u32,
        name: impl Into<String>,
        update_days: &[u8],
        base_sequence: u32,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id,
            name: name.into(),
            update_days: UpdateDays::from_numbers(update_days)?,
            base_sequence,
        })
    }

    /// Returns true if the site publishes on this date
    pub fn updates_on(&self, date: NaiveDate) -> bool {
        self.update_days.includes_date(date)
    }
}

/// Checks that no two sites share an ID
pub fn ensure_unique_ids(sites: &[Site]) -> Result<(), ValidationError> {
    let mut seen = std::collections::HashSet::new();
    for site in sites {
        if !seen.insert(site.id) {
            return Err(ValidationError::DuplicateSite(site.id));
        }
    }
    Ok(())
}

/// Weekday abbreviations, Sunday first
pub const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Formats weekday numbers as `Mon/Wed/Fri`
pub fn format_days(days: &UpdateDays) -> String {
    days.numbers()
        .map(|d| WEEKDAY_NAMES[d as usize])
        .collect::<Vec<_>>()
        .join("/")
}
