//! Fiscal period representation
//!
//! A budget plan covers one contiguous date range. Unlike a recurring
//! monthly/weekly cycle, the range is free-form: whatever the subsidiary's
//! fiscal calendar says, as long as it ends no earlier than it starts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An inclusive date range for one budgeting exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FiscalPeriod {
    start: NaiveDate,
    end: NaiveDate,
}

impl FiscalPeriod {
    /// Create a fiscal period. Rejects ranges where the end precedes the
    /// start.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PeriodError> {
        if end < start {
            return Err(PeriodError::EndBeforeStart { start, end });
        }
        Ok(Self { start, end })
    }

    /// The first day of the period
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// The last day of the period (inclusive)
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days covered, inclusive of both endpoints
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Check if a date falls within this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Parse a period string in the form "YYYY-MM-DD..YYYY-MM-DD"
    pub fn parse(s: &str) -> Result<Self, PeriodError> {
        let s = s.trim();
        let (start_str, end_str) = s
            .split_once("..")
            .ok_or_else(|| PeriodError::InvalidFormat(s.to_string()))?;

        let start = NaiveDate::parse_from_str(start_str.trim(), "%Y-%m-%d")
            .map_err(|_| PeriodError::InvalidFormat(s.to_string()))?;
        let end = NaiveDate::parse_from_str(end_str.trim(), "%Y-%m-%d")
            .map_err(|_| PeriodError::InvalidFormat(s.to_string()))?;

        Self::new(start, end)
    }
}

impl fmt::Display for FiscalPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

impl Ord for FiscalPeriod {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.start.cmp(&other.start)
    }
}

impl PartialOrd for FiscalPeriod {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Error type for fiscal period construction and parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodError {
    InvalidFormat(String),
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for PeriodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodError::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
            PeriodError::EndBeforeStart { start, end } => {
                write!(f, "Period end {} precedes start {}", end, start)
            }
        }
    }
}

impl std::error::Error for PeriodError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_valid_period() {
        let period = FiscalPeriod::new(date(2025, 1, 1), date(2025, 12, 31)).unwrap();
        assert_eq!(period.start(), date(2025, 1, 1));
        assert_eq!(period.end(), date(2025, 12, 31));
        assert_eq!(period.days(), 365);
    }

    #[test]
    fn test_single_day_period() {
        let period = FiscalPeriod::new(date(2025, 6, 1), date(2025, 6, 1)).unwrap();
        assert_eq!(period.days(), 1);
    }

    #[test]
    fn test_end_before_start_rejected() {
        let result = FiscalPeriod::new(date(2025, 12, 31), date(2025, 1, 1));
        assert_eq!(
            result,
            Err(PeriodError::EndBeforeStart {
                start: date(2025, 12, 31),
                end: date(2025, 1, 1),
            })
        );
    }

    #[test]
    fn test_contains() {
        let period = FiscalPeriod::new(date(2025, 1, 1), date(2025, 3, 31)).unwrap();
        assert!(period.contains(date(2025, 2, 15)));
        assert!(period.contains(date(2025, 1, 1)));
        assert!(period.contains(date(2025, 3, 31)));
        assert!(!period.contains(date(2025, 4, 1)));
    }

    #[test]
    fn test_parse() {
        let period = FiscalPeriod::parse("2025-01-01..2025-12-31").unwrap();
        assert_eq!(period.start(), date(2025, 1, 1));
        assert_eq!(period.end(), date(2025, 12, 31));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(FiscalPeriod::parse("2025-01-01").is_err());
        assert!(FiscalPeriod::parse("not..dates").is_err());
        assert!(FiscalPeriod::parse("2025-12-31..2025-01-01").is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let period = FiscalPeriod::new(date(2025, 1, 1), date(2025, 6, 30)).unwrap();
        let shown = format!("{}", period);
        assert_eq!(shown, "2025-01-01..2025-06-30");
        assert_eq!(FiscalPeriod::parse(&shown).unwrap(), period);
    }

    #[test]
    fn test_ordering() {
        let q1 = FiscalPeriod::new(date(2025, 1, 1), date(2025, 3, 31)).unwrap();
        let q2 = FiscalPeriod::new(date(2025, 4, 1), date(2025, 6, 30)).unwrap();
        assert!(q1 < q2);
    }

    #[test]
    fn test_serialization() {
        let period = FiscalPeriod::new(date(2025, 1, 1), date(2025, 12, 31)).unwrap();
        let json = serde_json::to_string(&period).unwrap();
        let deserialized: FiscalPeriod = serde_json::from_str(&json).unwrap();
        assert_eq!(period, deserialized);
    }
}
