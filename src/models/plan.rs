//! Hierarchical budget plan
//!
//! The central data structure of the application: one budgeting exercise that
//! distributes a fixed subsidiary total down three levels (departments,
//! locations, GL account lines). Children may be set to any non-negative
//! amount at any time; the model never forces the books to balance mid-edit.
//! Instead it reports the signed remaining balance per node, and the wizard
//! gates forward navigation on those balances reaching zero.
//!
//! Every mutation either applies fully or returns an error leaving the plan
//! untouched. Once a plan is finalized it is read-only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::{CascadeError, CascadeResult};

use super::ids::{DepartmentId, GlAccountId, LocationId, PlanId, SubsidiaryId};
use super::money::Money;
use super::period::FiscalPeriod;

/// Amounts within one cent of each other are considered equal. This is the
/// integer-cents equivalent of the 0.01 tolerance a float-based model would
/// use for the same check.
pub const BALANCE_TOLERANCE: Money = Money::from_cents(1);

/// Lifecycle status of a budget plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    /// Being edited; amounts may change freely
    Draft,
    /// Accepted by the external accounting system; read-only
    Finalized,
}

/// Inputs collected by the setup step
#[derive(Debug, Clone)]
pub struct PlanSetup {
    pub subsidiary_id: SubsidiaryId,
    pub period: FiscalPeriod,
    pub total_amount: Money,
}

/// A GL account line at a location (leaf of the hierarchy)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlLine {
    pub id: GlAccountId,
    pub name: String,
    pub amount: Money,
}

/// A location under a department
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub amount: Money,
    /// GL lines start empty; membership is managed explicitly by the user
    pub accounts: Vec<GlLine>,
}

impl Location {
    /// Sum of the GL line amounts under this location
    pub fn allocated(&self) -> Money {
        self.accounts.iter().map(|a| a.amount).sum()
    }

    /// Assigned amount minus allocated sum. Positive means under-allocated,
    /// negative means over-allocated.
    pub fn remaining(&self) -> Money {
        self.amount - self.allocated()
    }

    /// Whether the GL lines sum to the location amount within `tolerance`
    pub fn is_balanced_with(&self, tolerance: Money) -> bool {
        self.remaining().abs() < tolerance
    }

    /// `is_balanced_with` at the default one-cent tolerance
    pub fn is_balanced(&self) -> bool {
        self.is_balanced_with(BALANCE_TOLERANCE)
    }

    /// The GL line for `account_id`, if present
    pub fn line(&self, account_id: &GlAccountId) -> Option<&GlLine> {
        self.accounts.iter().find(|a| &a.id == account_id)
    }
}

/// A department under the subsidiary root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    pub amount: Money,
    pub locations: Vec<Location>,
}

impl Department {
    /// Sum of the location amounts under this department
    pub fn allocated(&self) -> Money {
        self.locations.iter().map(|l| l.amount).sum()
    }

    /// Assigned amount minus allocated sum
    pub fn remaining(&self) -> Money {
        self.amount - self.allocated()
    }

    /// Whether the locations sum to the department amount within `tolerance`
    pub fn is_balanced_with(&self, tolerance: Money) -> bool {
        self.remaining().abs() < tolerance
    }

    /// `is_balanced_with` at the default one-cent tolerance
    pub fn is_balanced(&self) -> bool {
        self.is_balanced_with(BALANCE_TOLERANCE)
    }

    /// The location with the given id, if present
    pub fn location(&self, loc_id: &LocationId) -> Option<&Location> {
        self.locations.iter().find(|l| &l.id == loc_id)
    }
}

/// Hierarchy level of a non-leaf node, used in balance reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeLevel {
    Root,
    Department,
    Location,
}

/// Balance snapshot for one non-leaf node
///
/// The full-balance gate is defined over these rows: the tree is submittable
/// iff every row reports balanced. Adding a hierarchy level later means
/// emitting more rows, not rewriting the gate.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeBalance {
    pub level: NodeLevel,
    /// Display path, e.g. "Engineering / London Office"
    pub label: String,
    pub amount: Money,
    pub allocated: Money,
    pub remaining: Money,
}

impl NodeBalance {
    /// Whether this node's children sum to its amount within `tolerance`
    pub fn is_balanced_with(&self, tolerance: Money) -> bool {
        self.remaining.abs() < tolerance
    }

    /// `is_balanced_with` at the default one-cent tolerance
    pub fn is_balanced(&self) -> bool {
        self.is_balanced_with(BALANCE_TOLERANCE)
    }
}

/// One complete budgeting exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetPlan {
    pub id: PlanId,
    pub subsidiary_id: SubsidiaryId,
    pub subsidiary_name: String,
    pub period: FiscalPeriod,
    /// Fixed at creation; the root of every conservation check below
    pub total_amount: Money,
    pub departments: Vec<Department>,
    pub status: PlanStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BudgetPlan {
    /// Build a new draft plan from setup inputs and the reference catalog.
    ///
    /// Materializes a department node for every catalog department and, under
    /// each, a location node for every location the catalog assigns to that
    /// department, all amounts zeroed and all account lists empty.
    ///
    /// The subsidiary/period conflict check is a service-layer concern; this
    /// constructor validates only what the model itself owns.
    pub fn new(setup: PlanSetup, catalog: &Catalog) -> CascadeResult<Self> {
        if !setup.total_amount.is_positive() {
            return Err(CascadeError::Validation(
                "Total budget amount must be greater than zero".into(),
            ));
        }

        let subsidiary = catalog
            .subsidiary(&setup.subsidiary_id)
            .ok_or_else(|| CascadeError::subsidiary_not_found(setup.subsidiary_id.as_str()))?;

        let departments = catalog
            .departments()
            .iter()
            .map(|dept| {
                let dept_id = DepartmentId::new(&dept.id);
                let locations = catalog
                    .locations_for(&dept_id)
                    .into_iter()
                    .map(|loc| Location {
                        id: LocationId::new(&loc.id),
                        name: loc.name.clone(),
                        amount: Money::zero(),
                        accounts: Vec::new(),
                    })
                    .collect();
                Department {
                    id: dept_id,
                    name: dept.name.clone(),
                    amount: Money::zero(),
                    locations,
                }
            })
            .collect();

        let now = Utc::now();
        Ok(Self {
            id: PlanId::new(),
            subsidiary_id: setup.subsidiary_id,
            subsidiary_name: subsidiary.name.clone(),
            period: setup.period,
            total_amount: setup.total_amount,
            departments,
            status: PlanStatus::Draft,
            created_at: now,
            updated_at: now,
        })
    }

    // --- mutations -------------------------------------------------------

    /// Replace a department's amount. Its locations are untouched; over- or
    /// under-allocation relative to the plan total is allowed transiently.
    pub fn set_department_amount(
        &mut self,
        dept_id: &DepartmentId,
        amount: Money,
    ) -> CascadeResult<()> {
        self.ensure_draft()?;
        ensure_non_negative(amount)?;
        let dept = self.department_mut(dept_id)?;
        dept.amount = amount;
        self.touch();
        Ok(())
    }

    /// Replace a location's amount under the named department
    pub fn set_location_amount(
        &mut self,
        dept_id: &DepartmentId,
        loc_id: &LocationId,
        amount: Money,
    ) -> CascadeResult<()> {
        self.ensure_draft()?;
        ensure_non_negative(amount)?;
        let loc = self.location_mut(dept_id, loc_id)?;
        loc.amount = amount;
        self.touch();
        Ok(())
    }

    /// Append a zero-amount GL line at a location. Rejects a second line for
    /// the same GL account at the same location.
    ///
    /// The caller is responsible for resolving `account_id` against the
    /// catalog; the model only guards against duplicates.
    pub fn add_gl_line(
        &mut self,
        dept_id: &DepartmentId,
        loc_id: &LocationId,
        account_id: GlAccountId,
        name: impl Into<String>,
    ) -> CascadeResult<()> {
        self.ensure_draft()?;
        let loc = self.location_mut(dept_id, loc_id)?;
        if loc.accounts.iter().any(|a| a.id == account_id) {
            return Err(CascadeError::duplicate_gl_line(account_id.as_str()));
        }
        loc.accounts.push(GlLine {
            id: account_id,
            name: name.into(),
            amount: Money::zero(),
        });
        self.touch();
        Ok(())
    }

    /// Remove a GL line if present. Removing an absent line is an Ok no-op
    /// that leaves the plan byte-identical, so callers never need a
    /// presence check first.
    pub fn remove_gl_line(
        &mut self,
        dept_id: &DepartmentId,
        loc_id: &LocationId,
        account_id: &GlAccountId,
    ) -> CascadeResult<()> {
        self.ensure_draft()?;
        let loc = self.location_mut(dept_id, loc_id)?;
        let before = loc.accounts.len();
        loc.accounts.retain(|a| &a.id != account_id);
        if loc.accounts.len() != before {
            self.touch();
        }
        Ok(())
    }

    /// Replace the amount of an existing GL line. Unlike removal, a set on a
    /// missing line is a caller error: it would silently drop data.
    pub fn set_gl_line_amount(
        &mut self,
        dept_id: &DepartmentId,
        loc_id: &LocationId,
        account_id: &GlAccountId,
        amount: Money,
    ) -> CascadeResult<()> {
        self.ensure_draft()?;
        ensure_non_negative(amount)?;
        let loc = self.location_mut(dept_id, loc_id)?;
        let line = loc
            .accounts
            .iter_mut()
            .find(|a| &a.id == account_id)
            .ok_or_else(|| CascadeError::NotFound {
                entity_type: "GL line",
                identifier: account_id.as_str().to_string(),
            })?;
        line.amount = amount;
        self.touch();
        Ok(())
    }

    /// Mark the plan as accepted by the external system. Called by the
    /// service layer after a successful publish; all further mutations are
    /// rejected.
    pub fn finalize(&mut self) -> CascadeResult<()> {
        self.ensure_draft()?;
        self.status = PlanStatus::Finalized;
        self.touch();
        Ok(())
    }

    // --- queries ---------------------------------------------------------

    /// Sum of the department amounts
    pub fn allocated(&self) -> Money {
        self.departments.iter().map(|d| d.amount).sum()
    }

    /// Plan total minus the department sum
    pub fn remaining(&self) -> Money {
        self.total_amount - self.allocated()
    }

    /// Whether the departments sum to the plan total within `tolerance`
    pub fn is_root_balanced_with(&self, tolerance: Money) -> bool {
        self.remaining().abs() < tolerance
    }

    /// `is_root_balanced_with` at the default one-cent tolerance
    pub fn is_root_balanced(&self) -> bool {
        self.is_root_balanced_with(BALANCE_TOLERANCE)
    }

    /// Balance snapshot for every non-leaf node: the root, each department,
    /// and each location, in tree order.
    pub fn balance_report(&self) -> Vec<NodeBalance> {
        let mut report = Vec::with_capacity(1 + self.departments.len() * 5);
        report.push(NodeBalance {
            level: NodeLevel::Root,
            label: self.subsidiary_name.clone(),
            amount: self.total_amount,
            allocated: self.allocated(),
            remaining: self.remaining(),
        });
        for dept in &self.departments {
            report.push(NodeBalance {
                level: NodeLevel::Department,
                label: dept.name.clone(),
                amount: dept.amount,
                allocated: dept.allocated(),
                remaining: dept.remaining(),
            });
            for loc in &dept.locations {
                report.push(NodeBalance {
                    level: NodeLevel::Location,
                    label: format!("{} / {}", dept.name, loc.name),
                    amount: loc.amount,
                    allocated: loc.allocated(),
                    remaining: loc.remaining(),
                });
            }
        }
        report
    }

    /// The single gate for submission: every non-leaf node balanced
    pub fn is_fully_balanced(&self) -> bool {
        self.balance_report().iter().all(|n| n.is_balanced())
    }

    /// Whether every department individually balances its locations
    pub fn all_departments_balanced(&self) -> bool {
        self.departments.iter().all(|d| d.is_balanced())
    }

    /// The department with the given id, if present
    pub fn department(&self, dept_id: &DepartmentId) -> Option<&Department> {
        self.departments.iter().find(|d| &d.id == dept_id)
    }

    /// The location with the given id under the given department, if present
    pub fn location(&self, dept_id: &DepartmentId, loc_id: &LocationId) -> Option<&Location> {
        self.department(dept_id).and_then(|d| d.location(loc_id))
    }

    /// Number of departments
    pub fn department_count(&self) -> usize {
        self.departments.len()
    }

    /// Number of location nodes across all departments
    pub fn location_count(&self) -> usize {
        self.departments.iter().map(|d| d.locations.len()).sum()
    }

    /// Number of GL lines across the whole plan
    pub fn line_count(&self) -> usize {
        self.departments
            .iter()
            .flat_map(|d| &d.locations)
            .map(|l| l.accounts.len())
            .sum()
    }

    // --- internals -------------------------------------------------------

    fn ensure_draft(&self) -> CascadeResult<()> {
        match self.status {
            PlanStatus::Draft => Ok(()),
            PlanStatus::Finalized => Err(CascadeError::Validation(
                "Plan is finalized and can no longer be edited".into(),
            )),
        }
    }

    fn department_mut(&mut self, dept_id: &DepartmentId) -> CascadeResult<&mut Department> {
        self.departments
            .iter_mut()
            .find(|d| &d.id == dept_id)
            .ok_or_else(|| CascadeError::department_not_found(dept_id.as_str()))
    }

    fn location_mut(
        &mut self,
        dept_id: &DepartmentId,
        loc_id: &LocationId,
    ) -> CascadeResult<&mut Location> {
        let dept = self.department_mut(dept_id)?;
        dept.locations
            .iter_mut()
            .find(|l| &l.id == loc_id)
            .ok_or_else(|| CascadeError::location_not_found(loc_id.as_str()))
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

fn ensure_non_negative(amount: Money) -> CascadeResult<()> {
    if amount.is_negative() {
        return Err(CascadeError::Validation(
            "Amount cannot be negative".into(),
        ));
    }
    Ok(())
}

/// Fraction of `parent` covered by `child`, for progress display.
///
/// Defined as 0 when the parent amount is zero (never NaN), and clamped to
/// [0, 1] so an over-allocated child never renders past 100%.
pub fn allocation_share(child: Money, parent: Money) -> f64 {
    if parent.cents() <= 0 {
        return 0.0;
    }
    (child.cents() as f64 / parent.cents() as f64).clamp(0.0, 1.0)
}
