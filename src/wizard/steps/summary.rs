//! Summary step: review the full tree, submit, and optionally export

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use crate::config::CascadePaths;
use crate::display::{format_balance_report, format_plan_tree};
use crate::error::CascadeResult;
use crate::export::{export_plan_csv, export_plan_json, export_plan_yaml};
use crate::models::BudgetPlan;
use crate::services::{ErpPublisher, PlanService};
use crate::wizard::prompt::prompt_string;

/// How the review screen ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryOutcome {
    /// The plan was accepted by the accounting system and finalized
    Submitted,
    /// Back to the GL accounts screen
    Back,
    /// Abandon the wizard
    Quit,
}

pub fn run(
    service: &PlanService<'_>,
    publisher: &dyn ErpPublisher,
    paths: &CascadePaths,
    plan: &mut BudgetPlan,
) -> CascadeResult<SummaryOutcome> {
    loop {
        println!();
        println!("Step 5: Review");
        println!("==============");
        println!();
        print!("{}", format_plan_tree(plan));
        println!();
        print!("{}", format_balance_report(plan));
        println!();

        let input = prompt_string("[s] submit to accounting system, [b] back, [q] quit: ")?;
        match input.as_str() {
            "b" => return Ok(SummaryOutcome::Back),
            "q" => return Ok(SummaryOutcome::Quit),
            "s" => {
                println!();
                println!("Submitting...");
                match service.submit(plan, publisher) {
                    Ok(receipt) => {
                        println!();
                        println!("Budget accepted by the accounting system.");
                        println!("  Reference:  {}", receipt.reference);
                        println!("  GL records: {}", receipt.line_count);
                        println!();
                        offer_export(paths, plan)?;
                        return Ok(SummaryOutcome::Submitted);
                    }
                    Err(e) => {
                        // Submission failed; the plan stays in draft and the
                        // user may simply try again.
                        println!("  {}", e);
                    }
                }
            }
            other => println!("  Unrecognized command '{}'", other),
        }
    }
}

/// Offer to export the finalized plan
fn offer_export(paths: &CascadePaths, plan: &BudgetPlan) -> CascadeResult<()> {
    let input = prompt_string("Export plan? [j]son / [c]sv / [y]aml / blank to skip: ")?;
    let (extension, format): (&str, fn(&BudgetPlan, &mut BufWriter<File>) -> CascadeResult<()>) =
        match input.as_str() {
            "j" => ("json", |p, w| export_plan_json(p, w)),
            "c" => ("csv", |p, w| export_plan_csv(p, w)),
            "y" => ("yaml", |p, w| export_plan_yaml(p, w)),
            _ => return Ok(()),
        };

    paths.ensure_directories()?;
    let path: PathBuf = paths.export_dir().join(format!("{}.{}", plan.id, extension));
    let file = File::create(&path)
        .map_err(|e| crate::error::CascadeError::Export(format!("{}: {}", path.display(), e)))?;
    let mut writer = BufWriter::new(file);
    format(plan, &mut writer)?;

    println!("Exported to {}", path.display());
    Ok(())
}
