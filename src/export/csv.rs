//! CSV export functionality
//!
//! Flattens a plan into one spreadsheet-friendly row per GL line.

use std::io::Write;

use crate::error::{CascadeError, CascadeResult};
use crate::models::BudgetPlan;

/// Export a plan's GL lines to CSV
///
/// One row per line: subsidiary, department, location, account, amount.
pub fn export_plan_csv<W: Write>(plan: &BudgetPlan, writer: &mut W) -> CascadeResult<()> {
    writeln!(
        writer,
        "Subsidiary,Period Start,Period End,Department,Location,GL Account,Amount"
    )
    .map_err(|e| CascadeError::Export(e.to_string()))?;

    for dept in &plan.departments {
        for loc in &dept.locations {
            for line in &loc.accounts {
                writeln!(
                    writer,
                    "{},{},{},{},{},{},{:.2}",
                    escape_csv(&plan.subsidiary_name),
                    plan.period.start(),
                    plan.period.end(),
                    escape_csv(&dept.name),
                    escape_csv(&loc.name),
                    escape_csv(&line.name),
                    line.amount.to_major_units()
                )
                .map_err(|e| CascadeError::Export(e.to_string()))?;
            }
        }
    }

    Ok(())
}

/// Escape a string for CSV format
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
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

    fn plan_with_lines() -> BudgetPlan {
        let setup = PlanSetup {
            subsidiary_id: SubsidiaryId::new("1"),
            period: FiscalPeriod::new(
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            )
            .unwrap(),
            total_amount: Money::from_major(1000),
        };
        let mut plan = BudgetPlan::new(setup, &Catalog::builtin()).unwrap();
        let d1 = DepartmentId::new("d1");
        let l1 = LocationId::new("l1");
        plan.add_gl_line(&d1, &l1, GlAccountId::new("a1"), "4000 Sales Revenue")
            .unwrap();
        plan.set_gl_line_amount(&d1, &l1, &GlAccountId::new("a1"), Money::from_major(600))
            .unwrap();
        plan.add_gl_line(&d1, &l1, GlAccountId::new("a2"), "6100 Salaries & Wages")
            .unwrap();
        plan
    }

    #[test]
    fn test_export_csv() {
        let mut output = Vec::new();
        export_plan_csv(&plan_with_lines(), &mut output).unwrap();

        let csv = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        // Header plus one row per GL line
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Subsidiary,"));
        assert!(lines[1].contains("Global Operations Inc."));
        assert!(lines[1].contains("4000 Sales Revenue"));
        assert!(lines[1].contains("600.00"));
        assert!(lines[2].contains("6100 Salaries & Wages"));
        assert!(lines[2].contains("0.00"));
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
