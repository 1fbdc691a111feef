//! Departments step: distribute the subsidiary total across departments

use crate::display::format_department_table;
use crate::error::CascadeResult;
use crate::models::BudgetPlan;
use crate::services::PlanService;
use crate::wizard::prompt::{parse_index, prompt_money, prompt_string};

use super::StepOutcome;

pub fn run(service: &PlanService<'_>, plan: &mut BudgetPlan) -> CascadeResult<StepOutcome> {
    loop {
        println!();
        println!("Step 2: Departments (N1)");
        println!("========================");
        println!();
        print!("{}", format_department_table(plan));
        println!();

        let input = prompt_string("[#] set amount, [n] next, [q] quit: ")?;
        match input.as_str() {
            "n" => return Ok(StepOutcome::Next),
            "q" => return Ok(StepOutcome::Quit),
            other => {
                let Some(idx) = parse_index(other, plan.departments.len()) else {
                    println!("  Unrecognized command '{}'", other);
                    continue;
                };
                let dept_id = plan.departments[idx].id.clone();
                let name = plan.departments[idx].name.clone();
                let Some(amount) = prompt_money(&format!("Amount for {}: ", name))? else {
                    continue;
                };
                if let Err(e) = service.set_department_amount(plan, &dept_id, amount) {
                    println!("  {}", e);
                }
            }
        }
    }
}
