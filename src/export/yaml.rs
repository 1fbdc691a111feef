//! YAML export functionality
//!
//! Human-readable export of a finalized plan, with a commented header.

use std::io::Write;

use crate::error::{CascadeError, CascadeResult};
use crate::export::json::PlanExport;
use crate::models::BudgetPlan;

/// Export a plan to YAML
pub fn export_plan_yaml<W: Write>(plan: &BudgetPlan, writer: &mut W) -> CascadeResult<()> {
    let export = PlanExport::from_plan(plan);

    writeln!(writer, "# cascade-cli budget plan export")
        .map_err(|e| CascadeError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| CascadeError::Export(e.to_string()))?;
    writeln!(writer, "# App Version: {}", export.app_version)
        .map_err(|e| CascadeError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| CascadeError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| CascadeError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::models::{FiscalPeriod, Money, PlanSetup, SubsidiaryId};
    use chrono::NaiveDate;

    #[test]
    fn test_export_yaml() {
        let setup = PlanSetup {
            subsidiary_id: SubsidiaryId::new("1"),
            period: FiscalPeriod::new(
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            )
            .unwrap(),
            total_amount: Money::from_major(1000),
        };
        let plan = BudgetPlan::new(setup, &Catalog::builtin()).unwrap();

        let mut output = Vec::new();
        export_plan_yaml(&plan, &mut output).unwrap();

        let yaml = String::from_utf8(output).unwrap();
        assert!(yaml.starts_with("# cascade-cli budget plan export"));
        assert!(yaml.contains("schema_version"));
        assert!(yaml.contains("Global Operations Inc."));
    }
}
