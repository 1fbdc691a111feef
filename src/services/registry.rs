//! Existing-budget registry
//!
//! Initialization must be rejected when a budget already exists for the
//! subsidiary/period combination. In a real deployment that check is answered
//! by the accounting system; the core only depends on this trait.

use chrono::{Datelike, NaiveDate};

use crate::models::SubsidiaryId;

/// Answers "is there already a budget for this subsidiary and period start?"
pub trait BudgetRegistry {
    fn period_taken(&self, subsidiary: &SubsidiaryId, period_start: NaiveDate) -> bool;
}

/// In-memory registry keyed by subsidiary and fiscal year
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    taken: Vec<(SubsidiaryId, i32)>,
}

impl InMemoryRegistry {
    /// An empty registry: nothing conflicts
    pub fn empty() -> Self {
        Self::default()
    }

    /// The registry state the simulated deployment ships with: subsidiary
    /// `2` already has a budget for fiscal year 2024.
    pub fn seeded() -> Self {
        let mut registry = Self::default();
        registry.record(SubsidiaryId::new("2"), 2024);
        registry
    }

    /// Record an existing budget for a subsidiary and fiscal year
    pub fn record(&mut self, subsidiary: SubsidiaryId, year: i32) {
        self.taken.push((subsidiary, year));
    }
}

impl BudgetRegistry for InMemoryRegistry {
    fn period_taken(&self, subsidiary: &SubsidiaryId, period_start: NaiveDate) -> bool {
        self.taken
            .iter()
            .any(|(sub, year)| sub == subsidiary && *year == period_start.year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_registry_never_conflicts() {
        let registry = InMemoryRegistry::empty();
        assert!(!registry.period_taken(&SubsidiaryId::new("2"), date(2024, 1, 1)));
    }

    #[test]
    fn test_seeded_registry_blocks_2024_for_subsidiary_2() {
        let registry = InMemoryRegistry::seeded();
        assert!(registry.period_taken(&SubsidiaryId::new("2"), date(2024, 1, 1)));
        assert!(registry.period_taken(&SubsidiaryId::new("2"), date(2024, 7, 15)));
        // Different year or subsidiary: no conflict
        assert!(!registry.period_taken(&SubsidiaryId::new("2"), date(2025, 1, 1)));
        assert!(!registry.period_taken(&SubsidiaryId::new("1"), date(2024, 1, 1)));
    }

    #[test]
    fn test_record() {
        let mut registry = InMemoryRegistry::empty();
        registry.record(SubsidiaryId::new("3"), 2026);
        assert!(registry.period_taken(&SubsidiaryId::new("3"), date(2026, 3, 1)));
    }
}
