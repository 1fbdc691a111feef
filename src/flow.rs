//! Wizard flow state machine
//!
//! The five-screen flow (setup, departments, locations, GL accounts,
//! summary) modeled as an explicit state machine with guarded forward
//! transitions. Each forward step requires the level just edited to balance;
//! moving back is always allowed down to the departments screen. Which
//! department or location is focused on a screen is view state owned by the
//! interactive layer, not by this machine.

use std::fmt;

use crate::error::{CascadeError, CascadeResult};
use crate::models::BudgetPlan;

/// The five wizard screens, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    Setup,
    Departments,
    Locations,
    Accounts,
    Summary,
}

impl WizardStep {
    /// Zero-based position in the flow
    pub fn index(&self) -> usize {
        match self {
            Self::Setup => 0,
            Self::Departments => 1,
            Self::Locations => 2,
            Self::Accounts => 3,
            Self::Summary => 4,
        }
    }

    /// Screen title as shown in the step header
    pub fn title(&self) -> &'static str {
        match self {
            Self::Setup => "Configuration",
            Self::Departments => "Departments (N1)",
            Self::Locations => "Locations (N2)",
            Self::Accounts => "GL Accounts (N3)",
            Self::Summary => "Review",
        }
    }

    fn successor(&self) -> Option<Self> {
        match self {
            Self::Setup => Some(Self::Departments),
            Self::Departments => Some(Self::Locations),
            Self::Locations => Some(Self::Accounts),
            Self::Accounts => Some(Self::Summary),
            Self::Summary => None,
        }
    }

    fn predecessor(&self) -> Option<Self> {
        match self {
            Self::Setup => None,
            // Setup is re-entered only by starting a new plan
            Self::Departments => None,
            Self::Locations => Some(Self::Departments),
            Self::Accounts => Some(Self::Locations),
            Self::Summary => Some(Self::Accounts),
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Tracks the current wizard screen and enforces the balance gates
#[derive(Debug, Clone)]
pub struct WizardFlow {
    current: WizardStep,
}

impl WizardFlow {
    /// Start a flow at the setup screen
    pub fn new() -> Self {
        Self {
            current: WizardStep::Setup,
        }
    }

    /// Start a flow at the departments screen, for a plan already created
    pub fn for_plan() -> Self {
        Self {
            current: WizardStep::Departments,
        }
    }

    /// The current screen
    pub fn current(&self) -> WizardStep {
        self.current
    }

    /// Why the current screen cannot advance yet, or None if it can
    pub fn gate_failure(&self, plan: &BudgetPlan) -> Option<String> {
        match self.current {
            WizardStep::Setup => None,
            WizardStep::Departments => {
                if plan.is_root_balanced() {
                    None
                } else {
                    Some(format!(
                        "Department amounts must sum to the total budget ({} remaining)",
                        plan.remaining()
                    ))
                }
            }
            WizardStep::Locations => {
                if plan.all_departments_balanced() {
                    None
                } else {
                    let unbalanced: Vec<&str> = plan
                        .departments
                        .iter()
                        .filter(|d| !d.is_balanced())
                        .map(|d| d.name.as_str())
                        .collect();
                    Some(format!(
                        "Every department must balance its locations (unbalanced: {})",
                        unbalanced.join(", ")
                    ))
                }
            }
            WizardStep::Accounts => {
                if plan.is_fully_balanced() {
                    None
                } else {
                    Some("Every location must balance its GL lines".to_string())
                }
            }
            WizardStep::Summary => Some("Already at the final step".to_string()),
        }
    }

    /// Whether the current screen's gate is satisfied
    pub fn can_advance(&self, plan: &BudgetPlan) -> bool {
        self.current != WizardStep::Summary && self.gate_failure(plan).is_none()
    }

    /// Move to the next screen if the gate allows it
    pub fn advance(&mut self, plan: &BudgetPlan) -> CascadeResult<WizardStep> {
        if let Some(reason) = self.gate_failure(plan) {
            return Err(CascadeError::Validation(reason));
        }
        // Summary has no successor, but its gate always fails first
        let next = self
            .current
            .successor()
            .ok_or_else(|| CascadeError::Validation("Already at the final step".into()))?;
        self.current = next;
        Ok(next)
    }

    /// Move back one screen; returns the new screen, or None at the front
    pub fn retreat(&mut self) -> Option<WizardStep> {
        let prev = self.current.predecessor()?;
        self.current = prev;
        Some(prev)
    }
}

impl Default for WizardFlow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::models::{
        DepartmentId, FiscalPeriod, GlAccountId, LocationId, Money, PlanSetup, SubsidiaryId,
    };
    use chrono::NaiveDate;

    fn draft_plan() -> BudgetPlan {
        let setup = PlanSetup {
            subsidiary_id: SubsidiaryId::new("1"),
            period: FiscalPeriod::new(
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            )
            .unwrap(),
            total_amount: Money::from_major(100_000),
        };
        BudgetPlan::new(setup, &Catalog::builtin()).unwrap()
    }

    /// Balance the builtin-catalog plan completely: everything on one
    /// department, one location, one GL line.
    fn balance_fully(plan: &mut BudgetPlan) {
        let d1 = DepartmentId::new("d1");
        let l1 = LocationId::new("l1");
        plan.set_department_amount(&d1, plan.total_amount).unwrap();
        plan.set_location_amount(&d1, &l1, plan.total_amount).unwrap();
        plan.add_gl_line(&d1, &l1, GlAccountId::new("a1"), "4000 Sales Revenue")
            .unwrap();
        plan.set_gl_line_amount(&d1, &l1, &GlAccountId::new("a1"), plan.total_amount)
            .unwrap();
    }

    #[test]
    fn test_setup_advances_unconditionally() {
        let plan = draft_plan();
        let mut flow = WizardFlow::new();
        assert_eq!(flow.current(), WizardStep::Setup);
        assert_eq!(flow.advance(&plan).unwrap(), WizardStep::Departments);
    }

    #[test]
    fn test_departments_gate_requires_root_balance() {
        let mut plan = draft_plan();
        let mut flow = WizardFlow::for_plan();

        let err = flow.advance(&plan).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(flow.current(), WizardStep::Departments);

        plan.set_department_amount(&DepartmentId::new("d1"), plan.total_amount)
            .unwrap();
        assert!(flow.can_advance(&plan));
        assert_eq!(flow.advance(&plan).unwrap(), WizardStep::Locations);
    }

    #[test]
    fn test_locations_gate_requires_all_departments_balanced() {
        let mut plan = draft_plan();
        let d1 = DepartmentId::new("d1");
        plan.set_department_amount(&d1, plan.total_amount).unwrap();

        let mut flow = WizardFlow::for_plan();
        flow.advance(&plan).unwrap();
        assert_eq!(flow.current(), WizardStep::Locations);

        // d1 has 100k assigned but nothing on its locations yet
        let err = flow.advance(&plan).unwrap_err();
        assert!(err.to_string().contains("Sales & Marketing"));

        plan.set_location_amount(&d1, &LocationId::new("l1"), plan.total_amount)
            .unwrap();
        assert_eq!(flow.advance(&plan).unwrap(), WizardStep::Accounts);
    }

    #[test]
    fn test_accounts_gate_requires_full_balance() {
        let mut plan = draft_plan();
        balance_fully(&mut plan);

        let mut flow = WizardFlow::for_plan();
        flow.advance(&plan).unwrap();
        flow.advance(&plan).unwrap();
        assert_eq!(flow.current(), WizardStep::Accounts);

        // Knock one line off balance
        plan.set_gl_line_amount(
            &DepartmentId::new("d1"),
            &LocationId::new("l1"),
            &GlAccountId::new("a1"),
            Money::from_major(1),
        )
        .unwrap();
        assert!(!flow.can_advance(&plan));

        plan.set_gl_line_amount(
            &DepartmentId::new("d1"),
            &LocationId::new("l1"),
            &GlAccountId::new("a1"),
            plan.total_amount,
        )
        .unwrap();
        assert_eq!(flow.advance(&plan).unwrap(), WizardStep::Summary);
    }

    #[test]
    fn test_summary_never_advances() {
        let mut plan = draft_plan();
        balance_fully(&mut plan);

        let mut flow = WizardFlow::for_plan();
        flow.advance(&plan).unwrap();
        flow.advance(&plan).unwrap();
        flow.advance(&plan).unwrap();
        assert_eq!(flow.current(), WizardStep::Summary);
        assert!(!flow.can_advance(&plan));
        assert!(flow.advance(&plan).is_err());
    }

    #[test]
    fn test_retreat_is_ungated_and_bounded() {
        let mut plan = draft_plan();
        balance_fully(&mut plan);

        let mut flow = WizardFlow::for_plan();
        flow.advance(&plan).unwrap();
        flow.advance(&plan).unwrap();
        flow.advance(&plan).unwrap();

        assert_eq!(flow.retreat(), Some(WizardStep::Accounts));
        assert_eq!(flow.retreat(), Some(WizardStep::Locations));
        assert_eq!(flow.retreat(), Some(WizardStep::Departments));
        // Departments is the floor; setup is re-entered only via a new plan
        assert_eq!(flow.retreat(), None);
        assert_eq!(flow.current(), WizardStep::Departments);
    }

    #[test]
    fn test_step_titles_and_order() {
        assert_eq!(WizardStep::Setup.index(), 0);
        assert_eq!(WizardStep::Summary.index(), 4);
        assert!(WizardStep::Departments < WizardStep::Accounts);
        assert_eq!(WizardStep::Accounts.title(), "GL Accounts (N3)");
    }
}
