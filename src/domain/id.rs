//! Content identifiers
//!
//! ID Format: a single alphabetic prefix followed by a sequence number,
//! e.g. `C101`. The sequence has exactly one textual form: no sign, no
//! leading zeros (except `0` itself).
//!
//! Identifiers order by prefix first, then numerically by sequence, so
//! `C9 < C10 < D1`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Prefix used for every derived identifier
pub const CONTENT_PREFIX: char = 'C';

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("Content ID is empty")]
    Empty,

    #[error("Invalid content ID '{0}': expected a letter prefix, e.g. 'C101'")]
    MissingPrefix(String),

    #[error("Invalid content ID '{0}': missing sequence number after prefix")]
    MissingSequence(String),

    #[error("Invalid sequence number in content ID '{0}'")]
    InvalidSequence(String),
}

/// Content ID in the format `{prefix}{sequence}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentId {
    prefix: char,
    sequence: u32,
}

impl ContentId {
    /// Creates an ID from an alphabetic prefix and a sequence number
    pub fn new(prefix: char, sequence: u32) -> Result<Self, IdError> {
        if !prefix.is_ascii_alphabetic() {
            return Err(IdError::MissingPrefix(format!("{}{}", prefix, sequence)));
        }
        Ok(Self { prefix, sequence })
    }

    /// Creates a content ID with the standard `C` prefix
    pub fn content(sequence: u32) -> Self {
        Self {
            prefix: CONTENT_PREFIX,
            sequence,
        }
    }

    pub fn prefix(&self) -> char {
        self.prefix
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    /// Returns true if both IDs share a prefix
    pub fn same_prefix(&self, other: &ContentId) -> bool {
        self.prefix == other.prefix
    }

    /// Returns this ID with its sequence moved by `delta`, or None when the
    /// result would leave the `u32` range
    pub fn shifted(&self, delta: i64) -> Option<ContentId> {
        let target = i64::from(self.sequence).checked_add(delta)?;
        let sequence = u32::try_from(target).ok()?;
        Some(Self {
            prefix: self.prefix,
            sequence,
        })
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, self.sequence)
    }
}

impl FromStr for ContentId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        let mut chars = s.chars();
        let prefix = match chars.next() {
            Some(c) if c.is_ascii_alphabetic() => c,
            Some(_) => return Err(IdError::MissingPrefix(s.to_string())),
            None => return Err(IdError::Empty),
        };

        let digits = chars.as_str();
        if digits.is_empty() {
            return Err(IdError::MissingSequence(s.to_string()));
        }
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(IdError::InvalidSequence(s.to_string()));
        }
        if digits.len() > 1 && digits.starts_with('0') {
            return Err(IdError::InvalidSequence(s.to_string()));
        }

        let sequence = digits
            .parse::<u32>()
            .map_err(|_| IdError::InvalidSequence(s.to_string()))?;

        Ok(Self { prefix, sequence })
    }
}

impl TryFrom<String> for ContentId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ContentId> for String {
    fn from(id: ContentId) -> Self {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_id_format_is_correct() {
        assert_eq!(ContentId::content(101).to_string(), "C101");
        assert_eq!(ContentId::new('D', 0).unwrap().to_string(), "D0");
    }

    #[test]
    fn content_id_parses_correctly() {
        let id: ContentId = "C101".parse().unwrap();
        assert_eq!(id.prefix(), 'C');
        assert_eq!(id.sequence(), 101);

        let padded: ContentId = "  X7 ".parse().unwrap();
        assert_eq!(padded.to_string(), "X7");
    }

    #[test]
    fn content_id_rejects_invalid_format() {
        assert_eq!("".parse::<ContentId>(), Err(IdError::Empty));
        assert_eq!(
            "101".parse::<ContentId>(),
            Err(IdError::MissingPrefix("101".to_string()))
        );
        assert_eq!(
            "C".parse::<ContentId>(),
            Err(IdError::MissingSequence("C".to_string()))
        );
        assert!("C10a".parse::<ContentId>().is_err());
        assert!("CC10".parse::<ContentId>().is_err());
        assert!("C-1".parse::<ContentId>().is_err());
        assert!("C+1".parse::<ContentId>().is_err());
        assert!("C007".parse::<ContentId>().is_err());
        assert!("C99999999999".parse::<ContentId>().is_err());
    }

    #[test]
    fn zero_sequence_is_allowed() {
        let id: ContentId = "C0".parse().unwrap();
        assert_eq!(id.sequence(), 0);
    }

    #[test]
    fn new_rejects_non_alphabetic_prefix() {
        assert!(ContentId::new('1', 5).is_err());
        assert!(ContentId::new('-', 5).is_err());
    }

    #[test]
    fn ids_order_by_prefix_then_number() {
        let mut ids: Vec<ContentId> = ["C10", "D1", "C9", "C101"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        ids.sort();

        let rendered: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
        assert_eq!(rendered, vec!["C9", "C10", "C101", "D1"]);
    }

    #[test]
    fn shifted_moves_sequence() {
        let id = ContentId::content(102);
        assert_eq!(id.shifted(4), Some(ContentId::content(106)));
        assert_eq!(id.shifted(-2), Some(ContentId::content(100)));
        assert_eq!(id.shifted(-103), None);
        assert_eq!(ContentId::content(u32::MAX).shifted(1), None);
    }

    #[test]
    fn serde_roundtrip_content_id() {
        let original = ContentId::content(205);
        let json = serde_json::to_string(&original).unwrap();
        assert_eq!(json, "\"C205\"");

        let parsed: ContentId = serde_json::from_str(&json).unwrap();
        assert_eq!(original, parsed);
        assert!(serde_json::from_str::<ContentId>("\"nope\"").is_err());
    }
}
