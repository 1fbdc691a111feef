//! GL accounts step: line out each location against the GL account catalog

use crate::catalog::{available_from, Catalog};
use crate::error::CascadeResult;
use crate::models::{BudgetPlan, DepartmentId, GlAccountId, LocationId};
use crate::services::PlanService;
use crate::wizard::prompt::{parse_index, prompt_money, prompt_string};

use super::StepOutcome;

pub fn run(
    service: &PlanService<'_>,
    catalog: &Catalog,
    plan: &mut BudgetPlan,
) -> CascadeResult<StepOutcome> {
    loop {
        println!();
        println!("Step 4: GL Accounts (N3)");
        println!("========================");
        println!();

        // Flat navigator over every department/location pair
        let mut targets: Vec<(DepartmentId, LocationId)> = Vec::new();
        for dept in &plan.departments {
            println!("  {}", dept.name);
            for loc in &dept.locations {
                targets.push((dept.id.clone(), loc.id.clone()));
                let marker = if loc.is_balanced() { "✓" } else { "•" };
                println!(
                    "    {}. {} {}  ({} of {} lined)",
                    targets.len(),
                    marker,
                    loc.name,
                    loc.allocated(),
                    loc.amount
                );
            }
        }
        println!();

        let input = prompt_string("[#] edit location, [n] next, [b] back, [q] quit: ")?;
        match input.as_str() {
            "n" => return Ok(StepOutcome::Next),
            "b" => return Ok(StepOutcome::Back),
            "q" => return Ok(StepOutcome::Quit),
            other => {
                let Some(idx) = parse_index(other, targets.len()) else {
                    println!("  Unrecognized command '{}'", other);
                    continue;
                };
                let (dept_id, loc_id) = targets[idx].clone();
                edit_location(service, catalog, plan, &dept_id, &loc_id)?;
            }
        }
    }
}

/// The per-location line editor. Focus is view state owned here.
fn edit_location(
    service: &PlanService<'_>,
    catalog: &Catalog,
    plan: &mut BudgetPlan,
    dept_id: &DepartmentId,
    loc_id: &LocationId,
) -> CascadeResult<()> {
    loop {
        let loc = plan
            .location(dept_id, loc_id)
            .expect("location picked from the navigator");
        println!();
        println!("GL lines for {} (target {})", loc.name, loc.amount);
        println!();
        if loc.accounts.is_empty() {
            println!("  (no GL lines yet - use [a] to add one)");
        } else {
            for (i, line) in loc.accounts.iter().enumerate() {
                println!("  {}. {}  {}", i + 1, line.name, line.amount);
            }
        }
        println!();
        println!("  Remaining to line out: {}", loc.remaining());
        println!();

        let line_count = loc.accounts.len();
        let input = prompt_string("[#] set amount, [a] add, [r] remove, [d] done: ")?;
        match input.as_str() {
            "d" => return Ok(()),
            "a" => add_line(service, catalog, plan, dept_id, loc_id)?,
            "r" => remove_line(service, plan, dept_id, loc_id)?,
            other => {
                let Some(idx) = parse_index(other, line_count) else {
                    println!("  Unrecognized command '{}'", other);
                    continue;
                };
                let loc = plan.location(dept_id, loc_id).expect("still present");
                let line = &loc.accounts[idx];
                let account_id = line.id.clone();
                let name = line.name.clone();
                let Some(amount) = prompt_money(&format!("Amount for {}: ", name))? else {
                    continue;
                };
                if let Err(e) =
                    service.set_account_amount(plan, dept_id, loc_id, &account_id, amount)
                {
                    println!("  {}", e);
                }
            }
        }
    }
}

fn add_line(
    service: &PlanService<'_>,
    catalog: &Catalog,
    plan: &mut BudgetPlan,
    dept_id: &DepartmentId,
    loc_id: &LocationId,
) -> CascadeResult<()> {
    let loc = plan
        .location(dept_id, loc_id)
        .expect("location picked from the navigator");
    let used: Vec<&str> = loc.accounts.iter().map(|a| a.id.as_str()).collect();
    let available = available_from(catalog.gl_accounts(), &used);

    if available.is_empty() {
        println!("  No more GL accounts available for this location");
        return Ok(());
    }

    println!();
    for (i, account) in available.iter().enumerate() {
        println!("  {}. {}", i + 1, account.name);
    }
    let input = prompt_string("Add GL account [blank to cancel]: ")?;
    let Some(idx) = parse_index(&input, available.len()) else {
        return Ok(());
    };
    let account_id = GlAccountId::new(&available[idx].id);

    if let Err(e) = service.add_account_line(plan, dept_id, loc_id, &account_id) {
        println!("  {}", e);
    }
    Ok(())
}

fn remove_line(
    service: &PlanService<'_>,
    plan: &mut BudgetPlan,
    dept_id: &DepartmentId,
    loc_id: &LocationId,
) -> CascadeResult<()> {
    let loc = plan
        .location(dept_id, loc_id)
        .expect("location picked from the navigator");
    if loc.accounts.is_empty() {
        println!("  Nothing to remove");
        return Ok(());
    }

    println!();
    for (i, line) in loc.accounts.iter().enumerate() {
        println!("  {}. {}  {}", i + 1, line.name, line.amount);
    }
    let input = prompt_string("Remove which line [blank to cancel]: ")?;
    let Some(idx) = parse_index(&input, loc.accounts.len()) else {
        return Ok(());
    };
    let account_id = loc.accounts[idx].id.clone();

    if let Err(e) = service.remove_account_line(plan, dept_id, loc_id, &account_id) {
        println!("  {}", e);
    }
    Ok(())
}
