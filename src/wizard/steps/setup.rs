//! Setup step: subsidiary, fiscal period, total budget amount

use chrono::NaiveDate;

use crate::catalog::Catalog;
use crate::error::CascadeResult;
use crate::models::{FiscalPeriod, Money, PlanSetup, SubsidiaryId};
use crate::wizard::prompt::{parse_index, prompt_string};

/// Collect the plan setup inputs. Returns None if the user cancels.
pub fn run(catalog: &Catalog) -> CascadeResult<Option<PlanSetup>> {
    println!();
    println!("Step 1: Configuration");
    println!("=====================");
    println!();
    println!("Select the subsidiary this budget is for:");
    println!();
    for (i, sub) in catalog.subsidiaries().iter().enumerate() {
        println!("  {}. {}", i + 1, sub.name);
    }
    println!();

    let subsidiary_id = loop {
        let input = prompt_string("Subsidiary [q to cancel]: ")?;
        if input.eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        match parse_index(&input, catalog.subsidiaries().len()) {
            Some(idx) => break SubsidiaryId::new(&catalog.subsidiaries()[idx].id),
            None => println!("  Enter a number between 1 and {}", catalog.subsidiaries().len()),
        }
    };

    println!();
    let period = loop {
        let start = match prompt_date("Period start (YYYY-MM-DD): ")? {
            Some(date) => date,
            None => return Ok(None),
        };
        let end = match prompt_date("Period end (YYYY-MM-DD): ")? {
            Some(date) => date,
            None => return Ok(None),
        };
        match FiscalPeriod::new(start, end) {
            Ok(period) => break period,
            Err(e) => println!("  {}", e),
        }
    };

    println!();
    let total_amount = loop {
        let input = prompt_string("Total budget amount [q to cancel]: ")?;
        if input.eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        match Money::parse(&input) {
            Ok(amount) if amount.is_positive() => break amount,
            Ok(_) => println!("  The total must be greater than zero"),
            Err(e) => println!("  {}", e),
        }
    };

    Ok(Some(PlanSetup {
        subsidiary_id,
        period,
        total_amount,
    }))
}

/// Prompt for a date; returns None when the user cancels with 'q'
fn prompt_date(prompt: &str) -> CascadeResult<Option<NaiveDate>> {
    loop {
        let input = prompt_string(prompt)?;
        if input.eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        match NaiveDate::parse_from_str(&input, "%Y-%m-%d") {
            Ok(date) => return Ok(Some(date)),
            Err(_) => println!("  Enter a date as YYYY-MM-DD"),
        }
    }
}
