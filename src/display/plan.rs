//! Plan display formatting
//!
//! Formats budget plans for terminal output: the per-level allocation tables
//! the wizard shows while editing, the balance report, and the full tree for
//! the review screen.

use crate::models::{allocation_share, BudgetPlan, Department, Money, NodeLevel};

const BAR_WIDTH: usize = 20;

/// Render a [0, 1] share as a fixed-width bar, e.g. `[#####...............]`
pub fn share_bar(share: f64) -> String {
    let filled = (share * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

/// Format the department allocation table for the departments screen
pub fn format_department_table(plan: &BudgetPlan) -> String {
    let name_width = plan
        .departments
        .iter()
        .map(|d| d.name.len())
        .max()
        .unwrap_or(10)
        .max(10);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>3}  {:<width$}  {:>15}  {}\n",
        "#",
        "Department",
        "Amount",
        "Share of total",
        width = name_width
    ));
    output.push_str(&format!(
        "{:->3}  {:-<width$}  {:->15}  {:-<22}\n",
        "",
        "",
        "",
        "",
        width = name_width
    ));

    for (i, dept) in plan.departments.iter().enumerate() {
        let share = allocation_share(dept.amount, plan.total_amount);
        output.push_str(&format!(
            "{:>3}  {:<width$}  {:>15}  {}\n",
            i + 1,
            dept.name,
            dept.amount.to_string(),
            share_bar(share),
            width = name_width
        ));
    }

    output.push('\n');
    output.push_str(&format!(
        "Total budget: {}   Allocated: {}   Remaining: {}\n",
        plan.total_amount,
        plan.allocated(),
        plan.remaining()
    ));

    output
}

/// Format the location table for one department on the locations screen
pub fn format_location_table(dept: &Department) -> String {
    let name_width = dept
        .locations
        .iter()
        .map(|l| l.name.len())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>3}  {:<width$}  {:>15}  {:>8}\n",
        "#",
        "Location",
        "Amount",
        "Lines",
        width = name_width
    ));
    output.push_str(&format!(
        "{:->3}  {:-<width$}  {:->15}  {:->8}\n",
        "",
        "",
        "",
        "",
        width = name_width
    ));

    for (i, loc) in dept.locations.iter().enumerate() {
        output.push_str(&format!(
            "{:>3}  {:<width$}  {:>15}  {:>8}\n",
            i + 1,
            loc.name,
            loc.amount.to_string(),
            loc.accounts.len(),
            width = name_width
        ));
    }

    output.push('\n');
    output.push_str(&format!(
        "Department amount: {}   Allocated: {}   Remaining: {}\n",
        dept.amount,
        dept.allocated(),
        dept.remaining()
    ));

    output
}

/// Format the full balance report: one row per non-leaf node
pub fn format_balance_report(plan: &BudgetPlan) -> String {
    let report = plan.balance_report();
    let label_width = report
        .iter()
        .map(|n| n.label.len() + indent_for(n.level).len())
        .max()
        .unwrap_or(10)
        .max(10);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<width$}  {:>15}  {:>15}  {:>15}  {}\n",
        "Node",
        "Amount",
        "Allocated",
        "Remaining",
        "Status",
        width = label_width
    ));
    output.push_str(&format!(
        "{:-<width$}  {:->15}  {:->15}  {:->15}  {:-<8}\n",
        "",
        "",
        "",
        "",
        "",
        width = label_width
    ));

    for node in &report {
        let status = if node.is_balanced() { "ok" } else { "OFF" };
        output.push_str(&format!(
            "{:<width$}  {:>15}  {:>15}  {:>15}  {}\n",
            format!("{}{}", indent_for(node.level), node.label),
            node.amount.to_string(),
            node.allocated.to_string(),
            node.remaining.to_string(),
            status,
            width = label_width
        ));
    }

    output
}

fn indent_for(level: NodeLevel) -> &'static str {
    match level {
        NodeLevel::Root => "",
        NodeLevel::Department => "  ",
        NodeLevel::Location => "    ",
    }
}

/// Format the complete plan as a tree for the review screen
pub fn format_plan_tree(plan: &BudgetPlan) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{} ({})  {}\n",
        plan.subsidiary_name, plan.period, plan.total_amount
    ));

    for (di, dept) in plan.departments.iter().enumerate() {
        let dept_last = di == plan.departments.len() - 1;
        let dept_prefix = if dept_last { "└── " } else { "├── " };
        let dept_bar = if dept_last { "    " } else { "│   " };
        output.push_str(&format!("{}{}  {}\n", dept_prefix, dept.name, dept.amount));

        for (li, loc) in dept.locations.iter().enumerate() {
            let loc_last = li == dept.locations.len() - 1;
            let loc_prefix = if loc_last { "└── " } else { "├── " };
            let loc_bar = if loc_last { "    " } else { "│   " };
            output.push_str(&format!(
                "{}{}{}  {}\n",
                dept_bar, loc_prefix, loc.name, loc.amount
            ));

            if loc.accounts.is_empty() {
                output.push_str(&format!("{}{}(no GL lines)\n", dept_bar, loc_bar));
            } else {
                for (ai, line) in loc.accounts.iter().enumerate() {
                    let line_prefix = if ai == loc.accounts.len() - 1 {
                        "└── "
                    } else {
                        "├── "
                    };
                    output.push_str(&format!(
                        "{}{}{}{}  {}\n",
                        dept_bar, loc_bar, line_prefix, line.name, line.amount
                    ));
                }
            }
        }
    }

    output
}
