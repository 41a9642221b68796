//! Month grid and scheduled entries
//!
//! The grid is laid out Sunday first: leading `None` cells pad the first
//! week so that each date lands in its weekday column.

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use super::derive::{derive, DerivationPolicy};
use super::id::ContentId;
use super::site::Site;

/// A displayed month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Month {
    first: NaiveDate,
}

impl Month {
    /// Creates a month, or None for an invalid year/month pair
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    /// The month containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// Last date of the month
    pub fn last_day(&self) -> NaiveDate {
        self.next()
            .first
            .pred_opt()
            .unwrap_or(self.first)
    }

    /// Number of days in the month
    pub fn num_days(&self) -> u32 {
        self.last_day().day()
    }

    /// Moves by `delta` months, saturating at the calendar bounds
    pub fn offset(&self, delta: i32) -> Self {
        let shifted = if delta >= 0 {
            self.first.checked_add_months(Months::new(delta.unsigned_abs()))
        } else {
            self.first.checked_sub_months(Months::new(delta.unsigned_abs()))
        };
        Self {
            first: shifted.unwrap_or(self.first),
        }
    }

    pub fn next(&self) -> Self {
        self.offset(1)
    }

    pub fn prev(&self) -> Self {
        self.offset(-1)
    }

    /// Iterates every date of the month
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let first = self.first;
        (0..self.num_days()).filter_map(move |i| first.with_day(i + 1))
    }

    /// Grid cells: leading blanks up to the first weekday, then each date
    pub fn cells(&self) -> Vec<Option<NaiveDate>> {
        let blanks = self.first.weekday().num_days_from_sunday() as usize;
        std::iter::repeat(None)
            .take(blanks)
            .chain(self.days().map(Some))
            .collect()
    }

    /// Grid cells split into weeks of seven, last week padded with blanks
    pub fn weeks(&self) -> Vec<[Option<NaiveDate>; 7]> {
        self.cells()
            .chunks(7)
            .map(|chunk| {
                let mut week = [None; 7];
                week[..chunk.len()].copy_from_slice(chunk);
                week
            })
            .collect()
    }

    /// Long label, e.g. `January 2025`
    pub fn label(&self) -> String {
        self.first.format("%B %Y").to_string()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for Month {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || format!("Invalid month '{}': expected YYYY-MM", s);

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        Month::new(year, month).ok_or_else(invalid)
    }
}

/// Which sites the calendar shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SiteFilter {
    #[default]
    All,
    Only(u32),
}

impl SiteFilter {
    pub fn matches(&self, site: &Site) -> bool {
        match self {
            SiteFilter::All => true,
            SiteFilter::Only(id) => site.id == *id,
        }
    }

    /// Cycles All -> first site -> ... -> last site -> All
    pub fn cycle(&self, sites: &[Site]) -> Self {
        match self {
            SiteFilter::All => sites
                .first()
                .map(|s| SiteFilter::Only(s.id))
                .unwrap_or(SiteFilter::All),
            SiteFilter::Only(current) => {
                let pos = sites.iter().position(|s| s.id == *current);
                match pos.and_then(|p| sites.get(p + 1)) {
                    Some(next) => SiteFilter::Only(next.id),
                    None => SiteFilter::All,
                }
            }
        }
    }
}

impl From<Option<u32>> for SiteFilter {
    fn from(value: Option<u32>) -> Self {
        match value {
            Some(id) => SiteFilter::Only(id),
            None => SiteFilter::All,
        }
    }
}

/// One scheduled update on the calendar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEntry {
    pub date: NaiveDate,
    pub site_id: u32,
    pub site_name: String,
    pub content_id: ContentId,
}

/// Derives the entries for a single date, in site order
pub fn entries_on(
    date: NaiveDate,
    sites: &[Site],
    filter: SiteFilter,
    policy: DerivationPolicy,
) -> Vec<CalendarEntry> {
    sites
        .iter()
        .filter(|site| filter.matches(site))
        .filter_map(|site| {
            derive(site, date, policy).map(|content_id| CalendarEntry {
                date,
                site_id: site.id,
                site_name: site.name.clone(),
                content_id,
            })
        })
        .collect()
}

/// Derives every entry in a month, ordered by date then site
pub fn month_entries(
    month: Month,
    sites: &[Site],
    filter: SiteFilter,
    policy: DerivationPolicy,
) -> Vec<CalendarEntry> {
    let entries: Vec<CalendarEntry> = month
        .days()
        .flat_map(|date| entries_on(date, sites, filter, policy))
        .collect();

    debug!(%month, %policy, entries = entries.len(), "Derived month");
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sites() -> Vec<Site> {
        vec![
            Site::new(1, "Site 1", &[1, 3, 5], 101).unwrap(),
            Site::new(2, "Site 2", &[2, 4, 6], 201).unwrap(),
        ]
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_bounds() {
        let feb = Month::new(2024, 2).unwrap();
        assert_eq!(feb.num_days(), 29);
        assert_eq!(feb.last_day(), date(2024, 2, 29));
        assert_eq!(Month::new(2025, 2).unwrap().num_days(), 28);
        assert!(Month::new(2025, 13).is_none());
    }

    #[test]
    fn navigation_wraps_years() {
        let jan = Month::new(2025, 1).unwrap();
        assert_eq!(jan.prev(), Month::new(2024, 12).unwrap());
        assert_eq!(jan.prev().next(), jan);
        assert_eq!(jan.offset(13), Month::new(2026, 2).unwrap());
    }

    #[test]
    fn cells_pad_to_first_weekday() {
        // June 2025 starts on a Sunday, January 2025 on a Wednesday
        let june = Month::new(2025, 6).unwrap();
        assert_eq!(june.cells()[0], Some(date(2025, 6, 1)));

        let jan = Month::new(2025, 1).unwrap();
        let cells = jan.cells();
        assert_eq!(&cells[..3], &[None, None, None]);
        assert_eq!(cells[3], Some(date(2025, 1, 1)));
        assert_eq!(cells.len(), 3 + 31);
    }

    #[test]
    fn weeks_are_padded() {
        let jan = Month::new(2025, 1).unwrap();
        let weeks = jan.weeks();
        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[0][3], Some(date(2025, 1, 1)));
        assert_eq!(weeks[4][5], Some(date(2025, 1, 31)));
        assert_eq!(weeks[4][6], None);
    }

    #[test]
    fn month_parses_and_displays() {
        let m: Month = "2025-01".parse().unwrap();
        assert_eq!(m.to_string(), "2025-01");
        assert_eq!(m.label(), "January 2025");
        assert!("2025".parse::<Month>().is_err());
        assert!("2025-00".parse::<Month>().is_err());
        assert!("jan-2025".parse::<Month>().is_err());
    }

    #[test]
    fn containing_date() {
        assert_eq!(
            Month::containing(date(2025, 3, 17)),
            Month::new(2025, 3).unwrap()
        );
    }

    #[test]
    fn entries_on_respects_filter() {
        let sites = sites();
        // 2025-01-08 Wednesday: only Site 1 publishes
        let all = entries_on(date(2025, 1, 8), &sites, SiteFilter::All, DerivationPolicy::Stepped);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].site_id, 1);
        assert_eq!(all[0].content_id.to_string(), "C104");

        let only_two = entries_on(
            date(2025, 1, 8),
            &sites,
            SiteFilter::Only(2),
            DerivationPolicy::Stepped,
        );
        assert!(only_two.is_empty());
    }

    #[test]
    fn month_entries_count() {
        // January 2025: Mon/Wed/Fri = 4 + 5 + 5, Tue/Thu/Sat = 4 + 5 + 4
        let entries = month_entries(
            Month::new(2025, 1).unwrap(),
            &sites(),
            SiteFilter::All,
            DerivationPolicy::Constant,
        );
        assert_eq!(entries.len(), 27);
        assert!(entries.windows(2).all(|w| w[0].date <= w[1].date));

        let site_two: Vec<_> = entries.iter().filter(|e| e.site_id == 2).collect();
        assert_eq!(site_two.len(), 13);
        assert!(site_two.iter().all(|e| e.content_id.to_string() == "C201"));
    }

    #[test]
    fn filter_cycles_through_sites() {
        let sites = sites();
        let f = SiteFilter::All.cycle(&sites);
        assert_eq!(f, SiteFilter::Only(1));
        let f = f.cycle(&sites);
        assert_eq!(f, SiteFilter::Only(2));
        assert_eq!(f.cycle(&sites), SiteFilter::All);
        assert_eq!(SiteFilter::All.cycle(&[]), SiteFilter::All);
    }
}
