//! Plan service
//!
//! Business logic on top of the pure plan model: creation with the
//! duplicate-budget conflict check, catalog-verified mutations, audit
//! logging, and submission to the external accounting system.

use crate::audit::{AuditEntry, AuditLogger, EntityType, Operation};
use crate::catalog::Catalog;
use crate::error::{CascadeError, CascadeResult};
use crate::models::{
    BudgetPlan, DepartmentId, GlAccountId, LocationId, Money, PlanSetup, PlanStatus,
};
use crate::services::publish::{ErpPublisher, PublishReceipt};
use crate::services::registry::BudgetRegistry;

/// Service for budget plan management
pub struct PlanService<'a> {
    catalog: &'a Catalog,
    audit: Option<&'a AuditLogger>,
}

impl<'a> PlanService<'a> {
    /// Create a plan service without audit logging
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            audit: None,
        }
    }

    /// Create a plan service that records mutations in the audit log
    pub fn with_audit(catalog: &'a Catalog, audit: &'a AuditLogger) -> Self {
        Self {
            catalog,
            audit: Some(audit),
        }
    }

    /// Create a new draft plan.
    ///
    /// Beyond the model's own preconditions, this rejects setups whose
    /// subsidiary/period-start combination collides with an existing budget
    /// according to the registry.
    pub fn create_plan(
        &self,
        setup: PlanSetup,
        registry: &dyn BudgetRegistry,
    ) -> CascadeResult<BudgetPlan> {
        let subsidiary = self
            .catalog
            .subsidiary(&setup.subsidiary_id)
            .ok_or_else(|| CascadeError::subsidiary_not_found(setup.subsidiary_id.as_str()))?;

        if registry.period_taken(&setup.subsidiary_id, setup.period.start()) {
            return Err(CascadeError::Conflict {
                subsidiary: subsidiary.name.clone(),
                period_start: setup.period.start().format("%Y-%m-%d").to_string(),
            });
        }

        let plan = BudgetPlan::new(setup, self.catalog)?;

        self.record(AuditEntry::new(
            Operation::Create,
            EntityType::Plan,
            plan.id.to_string(),
            Some(plan.subsidiary_name.clone()),
            Some(format!(
                "period {} total {}",
                plan.period, plan.total_amount
            )),
        ))?;

        Ok(plan)
    }

    /// Set a department's amount
    pub fn set_department_amount(
        &self,
        plan: &mut BudgetPlan,
        dept_id: &DepartmentId,
        amount: Money,
    ) -> CascadeResult<()> {
        let before = plan
            .department(dept_id)
            .map(|d| (d.amount, d.name.clone()));

        plan.set_department_amount(dept_id, amount)?;

        let (old_amount, name) = before.expect("department exists after successful set");
        self.record(AuditEntry::new(
            Operation::Update,
            EntityType::Department,
            dept_id.to_string(),
            Some(name),
            Some(format!("amount: {} -> {}", old_amount, amount)),
        ))
    }

    /// Set a location's amount under a department
    pub fn set_location_amount(
        &self,
        plan: &mut BudgetPlan,
        dept_id: &DepartmentId,
        loc_id: &LocationId,
        amount: Money,
    ) -> CascadeResult<()> {
        let before = plan
            .location(dept_id, loc_id)
            .map(|l| (l.amount, l.name.clone()));

        plan.set_location_amount(dept_id, loc_id, amount)?;

        let (old_amount, name) = before.expect("location exists after successful set");
        self.record(AuditEntry::new(
            Operation::Update,
            EntityType::Location,
            format!("{}/{}", dept_id, loc_id),
            Some(name),
            Some(format!("amount: {} -> {}", old_amount, amount)),
        ))
    }

    /// Add a GL line at a location, verifying the account against the catalog
    pub fn add_account_line(
        &self,
        plan: &mut BudgetPlan,
        dept_id: &DepartmentId,
        loc_id: &LocationId,
        account_id: &GlAccountId,
    ) -> CascadeResult<()> {
        let account = self
            .catalog
            .gl_account(account_id)
            .ok_or_else(|| CascadeError::gl_account_not_found(account_id.as_str()))?;

        plan.add_gl_line(dept_id, loc_id, account_id.clone(), &account.name)?;

        self.record(AuditEntry::new(
            Operation::Create,
            EntityType::GlLine,
            format!("{}/{}/{}", dept_id, loc_id, account_id),
            Some(account.name.clone()),
            None,
        ))
    }

    /// Remove a GL line at a location; a no-op when the line is absent
    pub fn remove_account_line(
        &self,
        plan: &mut BudgetPlan,
        dept_id: &DepartmentId,
        loc_id: &LocationId,
        account_id: &GlAccountId,
    ) -> CascadeResult<()> {
        let existing = plan
            .location(dept_id, loc_id)
            .and_then(|l| l.line(account_id))
            .map(|line| line.name.clone());

        plan.remove_gl_line(dept_id, loc_id, account_id)?;

        // Nothing removed, nothing to audit
        if let Some(name) = existing {
            self.record(AuditEntry::new(
                Operation::Delete,
                EntityType::GlLine,
                format!("{}/{}/{}", dept_id, loc_id, account_id),
                Some(name),
                None,
            ))?;
        }
        Ok(())
    }

    /// Set the amount of an existing GL line
    pub fn set_account_amount(
        &self,
        plan: &mut BudgetPlan,
        dept_id: &DepartmentId,
        loc_id: &LocationId,
        account_id: &GlAccountId,
        amount: Money,
    ) -> CascadeResult<()> {
        let before = plan
            .location(dept_id, loc_id)
            .and_then(|l| l.line(account_id))
            .map(|line| (line.amount, line.name.clone()));

        plan.set_gl_line_amount(dept_id, loc_id, account_id, amount)?;

        let (old_amount, name) = before.expect("line exists after successful set");
        self.record(AuditEntry::new(
            Operation::Update,
            EntityType::GlLine,
            format!("{}/{}/{}", dept_id, loc_id, account_id),
            Some(name),
            Some(format!("amount: {} -> {}", old_amount, amount)),
        ))
    }

    /// Submit a fully balanced draft plan to the accounting system.
    ///
    /// On success the plan is finalized and becomes read-only. On failure it
    /// stays in draft, untouched; resubmission is simply another call.
    pub fn submit(
        &self,
        plan: &mut BudgetPlan,
        publisher: &dyn ErpPublisher,
    ) -> CascadeResult<PublishReceipt> {
        if plan.status == PlanStatus::Finalized {
            return Err(CascadeError::Validation(
                "Plan has already been submitted".into(),
            ));
        }
        if !plan.is_fully_balanced() {
            return Err(CascadeError::Validation(
                "Plan cannot be submitted until every level balances".into(),
            ));
        }

        let receipt = publisher.publish(plan)?;
        plan.finalize()?;

        self.record(AuditEntry::new(
            Operation::Publish,
            EntityType::Plan,
            plan.id.to_string(),
            Some(plan.subsidiary_name.clone()),
            Some(format!(
                "reference {} ({} GL records)",
                receipt.reference, receipt.line_count
            )),
        ))?;

        Ok(receipt)
    }

    fn record(&self, entry: AuditEntry) -> CascadeResult<()> {
        if let Some(audit) = self.audit {
            audit.log(&entry)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FiscalPeriod, PlanStatus, SubsidiaryId};
    use crate::services::publish::SimulatedErp;
    use crate::services::registry::InMemoryRegistry;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn period(y: i32) -> FiscalPeriod {
        FiscalPeriod::new(
            NaiveDate::from_ymd_opt(y, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(y, 12, 31).unwrap(),
        )
        .unwrap()
    }

    fn setup(subsidiary: &str, year: i32, total: Money) -> PlanSetup {
        PlanSetup {
            subsidiary_id: SubsidiaryId::new(subsidiary),
            period: period(year),
            total_amount: total,
        }
    }

    fn balance_fully(service: &PlanService<'_>, plan: &mut BudgetPlan) {
        let d1 = DepartmentId::new("d1");
        let l1 = LocationId::new("l1");
        let total = plan.total_amount;
        service.set_department_amount(plan, &d1, total).unwrap();
        service
            .set_location_amount(plan, &d1, &l1, total)
            .unwrap();
        service
            .add_account_line(plan, &d1, &l1, &GlAccountId::new("a1"))
            .unwrap();
        service
            .set_account_amount(plan, &d1, &l1, &GlAccountId::new("a1"), total)
            .unwrap();
    }

    #[test]
    fn test_create_plan() {
        let catalog = Catalog::builtin();
        let service = PlanService::new(&catalog);
        let plan = service
            .create_plan(
                setup("1", 2025, Money::from_major(1000)),
                &InMemoryRegistry::seeded(),
            )
            .unwrap();

        assert_eq!(plan.status, PlanStatus::Draft);
        assert_eq!(plan.department_count(), 5);
    }

    #[test]
    fn test_create_plan_conflict() {
        let catalog = Catalog::builtin();
        let service = PlanService::new(&catalog);

        // Subsidiary 2 already has a 2024 budget in the seeded registry
        let err = service
            .create_plan(
                setup("2", 2024, Money::from_major(1000)),
                &InMemoryRegistry::seeded(),
            )
            .unwrap_err();
        assert!(err.is_conflict());
        assert!(err.to_string().contains("US West Subsidiary"));

        // The same subsidiary in another year is fine
        service
            .create_plan(
                setup("2", 2025, Money::from_major(1000)),
                &InMemoryRegistry::seeded(),
            )
            .unwrap();
    }

    #[test]
    fn test_create_plan_unknown_subsidiary() {
        let catalog = Catalog::builtin();
        let service = PlanService::new(&catalog);
        let err = service
            .create_plan(
                setup("99", 2025, Money::from_major(1000)),
                &InMemoryRegistry::empty(),
            )
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_add_account_line_verifies_catalog() {
        let catalog = Catalog::builtin();
        let service = PlanService::new(&catalog);
        let mut plan = service
            .create_plan(
                setup("1", 2025, Money::from_major(1000)),
                &InMemoryRegistry::empty(),
            )
            .unwrap();

        let err = service
            .add_account_line(
                &mut plan,
                &DepartmentId::new("d1"),
                &LocationId::new("l1"),
                &GlAccountId::new("a99"),
            )
            .unwrap_err();
        assert!(err.is_not_found());

        service
            .add_account_line(
                &mut plan,
                &DepartmentId::new("d1"),
                &LocationId::new("l1"),
                &GlAccountId::new("a1"),
            )
            .unwrap();
        // The catalog name is copied onto the line
        let line_name = &plan
            .location(&DepartmentId::new("d1"), &LocationId::new("l1"))
            .unwrap()
            .accounts[0]
            .name;
        assert_eq!(line_name, "4000 Sales Revenue");
    }

    #[test]
    fn test_submit_requires_full_balance() {
        let catalog = Catalog::builtin();
        let service = PlanService::new(&catalog);
        let mut plan = service
            .create_plan(
                setup("1", 2025, Money::from_major(1000)),
                &InMemoryRegistry::empty(),
            )
            .unwrap();

        let err = service
            .submit(&mut plan, &SimulatedErp::instant())
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(plan.status, PlanStatus::Draft);
    }

    #[test]
    fn test_submit_success_finalizes() {
        let catalog = Catalog::builtin();
        let service = PlanService::new(&catalog);
        let mut plan = service
            .create_plan(
                setup("1", 2025, Money::from_major(1000)),
                &InMemoryRegistry::empty(),
            )
            .unwrap();
        balance_fully(&service, &mut plan);

        let receipt = service.submit(&mut plan, &SimulatedErp::instant()).unwrap();
        assert_eq!(receipt.line_count, 1);
        assert_eq!(plan.status, PlanStatus::Finalized);

        // Finalized plans reject both edits and resubmission
        assert!(service
            .set_department_amount(&mut plan, &DepartmentId::new("d1"), Money::zero())
            .unwrap_err()
            .is_validation());
        assert!(service
            .submit(&mut plan, &SimulatedErp::instant())
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_submit_failure_keeps_draft() {
        let catalog = Catalog::builtin();
        let service = PlanService::new(&catalog);
        let mut plan = service
            .create_plan(
                setup("1", 2025, Money::from_major(1000)),
                &InMemoryRegistry::empty(),
            )
            .unwrap();
        balance_fully(&service, &mut plan);

        let err = service
            .submit(&mut plan, &SimulatedErp::failing("gateway timeout"))
            .unwrap_err();
        assert!(matches!(err, CascadeError::Publish(_)));
        assert_eq!(plan.status, PlanStatus::Draft);

        // A fresh submit against a working publisher succeeds
        service.submit(&mut plan, &SimulatedErp::instant()).unwrap();
        assert_eq!(plan.status, PlanStatus::Finalized);
    }

    #[test]
    fn test_mutations_are_audited() {
        let temp = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp.path().join("audit.log"));
        let catalog = Catalog::builtin();
        let service = PlanService::with_audit(&catalog, &logger);

        let mut plan = service
            .create_plan(
                setup("1", 2025, Money::from_major(1000)),
                &InMemoryRegistry::empty(),
            )
            .unwrap();
        balance_fully(&service, &mut plan);
        service.submit(&mut plan, &SimulatedErp::instant()).unwrap();

        let entries = logger.read_all().unwrap();
        // create + 4 balancing mutations + publish
        assert_eq!(entries.len(), 6);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries.last().unwrap().operation, Operation::Publish);
        assert!(entries[1]
            .detail
            .as_deref()
            .unwrap()
            .contains("$0.00 -> $1,000.00"));
    }

    #[test]
    fn test_idempotent_remove_not_audited() {
        let temp = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp.path().join("audit.log"));
        let catalog = Catalog::builtin();
        let service = PlanService::with_audit(&catalog, &logger);

        let mut plan = service
            .create_plan(
                setup("1", 2025, Money::from_major(1000)),
                &InMemoryRegistry::empty(),
            )
            .unwrap();
        let before_count = logger.entry_count().unwrap();

        // Removing a line that was never added: Ok, and no audit entry
        service
            .remove_account_line(
                &mut plan,
                &DepartmentId::new("d1"),
                &LocationId::new("l1"),
                &GlAccountId::new("a1"),
            )
            .unwrap();
        assert_eq!(logger.entry_count().unwrap(), before_count);
    }
}
