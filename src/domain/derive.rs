//! Content ID derivation
//!
//! Maps a (site, date) pair to the content ID scheduled on that date. The
//! numeric part is the site's base sequence plus an offset chosen by a
//! [`DerivationPolicy`].

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::id::ContentId;
use super::site::Site;

/// Sequence advance per elapsed week under [`DerivationPolicy::Stepped`]
pub const STEP_PER_WEEK: u32 = 3;

/// How the sequence offset is computed for a qualifying date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DerivationPolicy {
    /// Advance by 3 for every full week since January 1st of the date's year
    #[default]
    Stepped,
    /// Every qualifying date maps to the site's base sequence
    Constant,
}

impl DerivationPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DerivationPolicy::Stepped => "stepped",
            DerivationPolicy::Constant => "constant",
        }
    }

    /// Sequence offset for a date
    pub fn offset(&self, date: NaiveDate) -> u32 {
        match self {
            DerivationPolicy::Stepped => (date.ordinal0() / 7) * STEP_PER_WEEK,
            DerivationPolicy::Constant => 0,
        }
    }
}

impl fmt::Display for DerivationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DerivationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stepped" => Ok(DerivationPolicy::Stepped),
            "constant" => Ok(DerivationPolicy::Constant),
            other => Err(format!(
                "Unknown derivation policy '{}': expected 'stepped' or 'constant'",
                other
            )),
        }
    }
}

/// Derives the content ID a site publishes on `date`, or None when no update
/// is scheduled that day
pub fn derive(site: &Site, date: NaiveDate, policy: DerivationPolicy) -> Option<ContentId> {
    if !site.updates_on(date) {
        return None;
    }

    let sequence = site.base_sequence.checked_add(policy.offset(date))?;
    Some(ContentId::content(sequence))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site_one() -> Site {
        Site::new(1, "Site 1", &[1, 3, 5], 101).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn wednesday_of_second_week_stepped() {
        // 2025-01-08: Wednesday, ordinal0 = 7 -> one elapsed week
        let id = derive(&site_one(), date(2025, 1, 8), DerivationPolicy::Stepped);
        assert_eq!(id, Some(ContentId::content(104)));
    }

    #[test]
    fn wednesday_of_second_week_constant() {
        let id = derive(&site_one(), date(2025, 1, 8), DerivationPolicy::Constant);
        assert_eq!(id, Some(ContentId::content(101)));
    }

    #[test]
    fn first_week_uses_base_sequence() {
        // 2025-01-01 is a Wednesday, 2025-01-03 a Friday
        let site = site_one();
        assert_eq!(
            derive(&site, date(2025, 1, 1), DerivationPolicy::Stepped),
            Some(ContentId::content(101))
        );
        assert_eq!(
            derive(&site, date(2025, 1, 3), DerivationPolicy::Stepped),
            Some(ContentId::content(101))
        );
    }

    #[test]
    fn stepped_ignores_weekday_within_week() {
        // 2025-01-13 (Mon) and 2025-01-14 (Tue, no update) ... 2025-01-15 (Wed)
        // 01-13 has ordinal0 12 -> week 1, 01-15 has ordinal0 14 -> week 2
        let site = site_one();
        assert_eq!(
            derive(&site, date(2025, 1, 13), DerivationPolicy::Stepped),
            Some(ContentId::content(104))
        );
        assert_eq!(
            derive(&site, date(2025, 1, 15), DerivationPolicy::Stepped),
            Some(ContentId::content(107))
        );
    }

    #[test]
    fn offset_restarts_each_year() {
        // 2025-12-31 is a Wednesday, 2026-01-02 a Friday
        let site = site_one();
        assert_eq!(
            derive(&site, date(2025, 12, 31), DerivationPolicy::Stepped),
            Some(ContentId::content(101 + 52 * 3))
        );
        assert_eq!(
            derive(&site, date(2026, 1, 2), DerivationPolicy::Stepped),
            Some(ContentId::content(101))
        );
    }

    #[test]
    fn non_update_days_yield_none() {
        let site = site_one();
        // 2025-01-07 Tuesday, 2025-01-11 Saturday, 2025-01-12 Sunday
        for d in [7, 11, 12] {
            for policy in [DerivationPolicy::Stepped, DerivationPolicy::Constant] {
                assert_eq!(derive(&site, date(2025, 1, d), policy), None);
            }
        }
    }

    #[test]
    fn overflowing_sequence_yields_none() {
        let site = Site::new(9, "Edge", &[1, 3, 5], u32::MAX).unwrap();
        assert_eq!(derive(&site, date(2025, 1, 8), DerivationPolicy::Stepped), None);
        assert_eq!(
            derive(&site, date(2025, 1, 8), DerivationPolicy::Constant),
            Some(ContentId::content(u32::MAX))
        );
    }

    #[test]
    fn policy_parses_from_str() {
        assert_eq!("stepped".parse(), Ok(DerivationPolicy::Stepped));
        assert_eq!("Constant".parse(), Ok(DerivationPolicy::Constant));
        assert!("weekly".parse::<DerivationPolicy>().is_err());
    }
}
