//! Locations step: distribute each department's amount across its locations

use crate::display::format_location_table;
use crate::error::CascadeResult;
use crate::models::BudgetPlan;
use crate::services::PlanService;
use crate::wizard::prompt::{parse_index, prompt_money, prompt_string};

use super::StepOutcome;

pub fn run(service: &PlanService<'_>, plan: &mut BudgetPlan) -> CascadeResult<StepOutcome> {
    loop {
        println!();
        println!("Step 3: Locations (N2)");
        println!("======================");
        println!();
        for (i, dept) in plan.departments.iter().enumerate() {
            let marker = if dept.is_balanced() { "✓" } else { "•" };
            println!(
                "  {}. {} {}  (assigned {}, remaining {})",
                i + 1,
                marker,
                dept.name,
                dept.amount,
                dept.remaining()
            );
        }
        println!();

        let input = prompt_string("[#] edit department, [n] next, [b] back, [q] quit: ")?;
        match input.as_str() {
            "n" => return Ok(StepOutcome::Next),
            "b" => return Ok(StepOutcome::Back),
            "q" => return Ok(StepOutcome::Quit),
            other => {
                let Some(idx) = parse_index(other, plan.departments.len()) else {
                    println!("  Unrecognized command '{}'", other);
                    continue;
                };
                edit_department(service, plan, idx)?;
            }
        }
    }
}

/// The per-department location editor. The focused department is view state
/// here; the plan itself has no notion of focus.
fn edit_department(
    service: &PlanService<'_>,
    plan: &mut BudgetPlan,
    dept_idx: usize,
) -> CascadeResult<()> {
    loop {
        let dept = &plan.departments[dept_idx];
        let dept_id = dept.id.clone();
        println!();
        println!("Distributing {} for {}", dept.amount, dept.name);
        println!();
        print!("{}", format_location_table(dept));
        println!();

        let location_count = plan.departments[dept_idx].locations.len();
        let input = prompt_string("[#] set amount, [d] done: ")?;
        match input.as_str() {
            "d" => return Ok(()),
            other => {
                let Some(idx) = parse_index(other, location_count) else {
                    println!("  Unrecognized command '{}'", other);
                    continue;
                };
                let loc = &plan.departments[dept_idx].locations[idx];
                let loc_id = loc.id.clone();
                let name = loc.name.clone();
                let Some(amount) = prompt_money(&format!("Amount for {}: ", name))? else {
                    continue;
                };
                if let Err(e) = service.set_location_amount(plan, &dept_id, &loc_id, amount) {
                    println!("  {}", e);
                }
            }
        }
    }
}
