//! Reference data catalog
//!
//! The four fixed lookup tables a budgeting session works against:
//! subsidiaries, departments, locations, and GL accounts. The catalog is
//! read-only for the lifetime of a session; in a real deployment it would be
//! synced from the accounting system, here it is either the built-in default
//! or loaded from a file (see [`loader`]).

mod loader;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{CascadeError, CascadeResult};
use crate::models::{DepartmentId, GlAccountId, LocationId, SubsidiaryId};

/// One row of a reference table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
}

impl CatalogEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// The full reference catalog for one budgeting session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    subsidiaries: Vec<CatalogEntry>,
    departments: Vec<CatalogEntry>,
    locations: Vec<CatalogEntry>,
    gl_accounts: Vec<CatalogEntry>,

    /// Optional department-to-locations assignment. When absent, every
    /// department gets the full location table (the historical behavior).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    department_locations: Option<HashMap<String, Vec<String>>>,
}

impl Catalog {
    /// Build a catalog from its four tables, validating as a unit
    pub fn new(
        subsidiaries: Vec<CatalogEntry>,
        departments: Vec<CatalogEntry>,
        locations: Vec<CatalogEntry>,
        gl_accounts: Vec<CatalogEntry>,
        department_locations: Option<HashMap<String, Vec<String>>>,
    ) -> CascadeResult<Self> {
        let catalog = Self {
            subsidiaries,
            departments,
            locations,
            gl_accounts,
            department_locations,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The built-in default catalog, used when no catalog file is configured
    pub fn builtin() -> Self {
        Self {
            subsidiaries: vec![
                CatalogEntry::new("1", "Global Operations Inc."),
                CatalogEntry::new("2", "US West Subsidiary"),
                CatalogEntry::new("3", "EMEA Region"),
                CatalogEntry::new("4", "APAC Division"),
            ],
            departments: vec![
                CatalogEntry::new("d1", "Sales & Marketing"),
                CatalogEntry::new("d2", "Engineering"),
                CatalogEntry::new("d3", "Operations"),
                CatalogEntry::new("d4", "Human Resources"),
                CatalogEntry::new("d5", "Finance"),
            ],
            locations: vec![
                CatalogEntry::new("l1", "San Francisco HQ"),
                CatalogEntry::new("l2", "London Office"),
                CatalogEntry::new("l3", "Tokyo Branch"),
                CatalogEntry::new("l4", "Remote Global"),
            ],
            gl_accounts: vec![
                CatalogEntry::new("a1", "4000 Sales Revenue"),
                CatalogEntry::new("a2", "6100 Salaries & Wages"),
                CatalogEntry::new("a3", "7200 Travel & Entertainment"),
                CatalogEntry::new("a4", "8100 Rent & Utilities"),
                CatalogEntry::new("a5", "8500 Office Supplies"),
                CatalogEntry::new("a6", "9000 Marketing Campaigns"),
            ],
            department_locations: None,
        }
    }

    // --- tables ----------------------------------------------------------

    pub fn subsidiaries(&self) -> &[CatalogEntry] {
        &self.subsidiaries
    }

    pub fn departments(&self) -> &[CatalogEntry] {
        &self.departments
    }

    pub fn locations(&self) -> &[CatalogEntry] {
        &self.locations
    }

    pub fn gl_accounts(&self) -> &[CatalogEntry] {
        &self.gl_accounts
    }

    // --- lookups ---------------------------------------------------------

    pub fn subsidiary(&self, id: &SubsidiaryId) -> Option<&CatalogEntry> {
        self.subsidiaries.iter().find(|e| e.id == id.as_str())
    }

    pub fn department(&self, id: &DepartmentId) -> Option<&CatalogEntry> {
        self.departments.iter().find(|e| e.id == id.as_str())
    }

    pub fn location(&self, id: &LocationId) -> Option<&CatalogEntry> {
        self.locations.iter().find(|e| e.id == id.as_str())
    }

    pub fn gl_account(&self, id: &GlAccountId) -> Option<&CatalogEntry> {
        self.gl_accounts.iter().find(|e| e.id == id.as_str())
    }

    /// The locations assigned to a department: the mapped subset when a
    /// `department_locations` assignment exists, otherwise the full table.
    pub fn locations_for(&self, dept: &DepartmentId) -> Vec<&CatalogEntry> {
        match self
            .department_locations
            .as_ref()
            .and_then(|map| map.get(dept.as_str()))
        {
            Some(ids) => ids
                .iter()
                .filter_map(|id| self.locations.iter().find(|e| &e.id == id))
                .collect(),
            None => self.locations.iter().collect(),
        }
    }

    // --- validation ------------------------------------------------------

    fn validate(&self) -> CascadeResult<()> {
        for (table, entries) in [
            ("subsidiaries", &self.subsidiaries),
            ("departments", &self.departments),
            ("locations", &self.locations),
            ("gl_accounts", &self.gl_accounts),
        ] {
            if entries.is_empty() {
                return Err(CascadeError::Validation(format!(
                    "Catalog table '{}' is empty",
                    table
                )));
            }
            let mut seen = std::collections::HashSet::new();
            for entry in entries.iter() {
                if entry.id.trim().is_empty() {
                    return Err(CascadeError::Validation(format!(
                        "Catalog table '{}' contains an entry with an empty id",
                        table
                    )));
                }
                if entry.name.trim().is_empty() {
                    return Err(CascadeError::Validation(format!(
                        "Catalog entry '{}' in table '{}' has an empty name",
                        entry.id, table
                    )));
                }
                if !seen.insert(entry.id.as_str()) {
                    return Err(CascadeError::Validation(format!(
                        "Catalog table '{}' contains duplicate id '{}'",
                        table, entry.id
                    )));
                }
            }
        }

        if let Some(map) = &self.department_locations {
            for (dept_id, loc_ids) in map {
                if !self.departments.iter().any(|d| &d.id == dept_id) {
                    return Err(CascadeError::Validation(format!(
                        "department_locations references unknown department '{}'",
                        dept_id
                    )));
                }
                for loc_id in loc_ids {
                    if !self.locations.iter().any(|l| &l.id == loc_id) {
                        return Err(CascadeError::Validation(format!(
                            "department_locations references unknown location '{}'",
                            loc_id
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

/// Entries from `pool` whose ids are not in `used`.
///
/// Every "what can still be picked here" dropdown goes through this one
/// query; the pools are small enough that a linear scan is fine.
pub fn available_from<'a>(pool: &'a [CatalogEntry], used: &[&str]) -> Vec<&'a CatalogEntry> {
    pool.iter()
        .filter(|entry| !used.contains(&entry.id.as_str()))
        .collect()
}
