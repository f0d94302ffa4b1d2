//! Common types used across the platform

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Display placeholder for references that cannot be resolved
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Date range for list filters, inclusive on both ends.
///
/// Either bound may be left open.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }

    pub fn is_open(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// Case-insensitive substring search over a set of fields.
///
/// An empty or blank term matches everything.
pub fn matches_search<S: AsRef<str>>(term: &str, fields: &[S]) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    fields
        .iter()
        .any(|field| field.as_ref().to_lowercase().contains(&term))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_range_inclusive() {
        let range = DateRange::new(Some(date(2024, 1, 1)), Some(date(2024, 1, 31)));
        assert!(range.contains(date(2024, 1, 1)));
        assert!(range.contains(date(2024, 1, 31)));
        assert!(!range.contains(date(2023, 12, 31)));
        assert!(!range.contains(date(2024, 2, 1)));
    }

    #[test]
    fn test_date_range_open_bounds() {
        assert!(DateRange::default().contains(date(1990, 6, 15)));
        let from = DateRange::new(Some(date(2024, 5, 1)), None);
        assert!(from.contains(date(2030, 1, 1)));
        assert!(!from.contains(date(2024, 4, 30)));
    }

    #[test]
    fn test_matches_search() {
        let fields = ["24-PH-I3-001", "Pin d'Alep", "Azrou"];
        assert!(matches_search("", &fields));
        assert!(matches_search("pin d", &fields));
        assert!(matches_search("AZROU", &fields));
        assert!(!matches_search("cèdre", &fields));
    }
}
