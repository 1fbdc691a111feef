//! Display formatting for terminal output

pub mod plan;

pub use plan::{
    format_balance_report, format_department_table, format_location_table, format_plan_tree,
    share_bar,
};
