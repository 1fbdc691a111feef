//! Core data models for cascade-cli
//!
//! This module contains the data structures that represent the budgeting
//! domain: monetary amounts, typed ids, fiscal periods, and the hierarchical
//! budget plan itself.

pub mod ids;
pub mod money;
pub mod period;
pub mod plan;

pub use ids::{DepartmentId, GlAccountId, LocationId, PlanId, SubsidiaryId};
pub use money::Money;
pub use period::FiscalPeriod;
pub use plan::{
    allocation_share, BudgetPlan, Department, GlLine, Location, NodeBalance, NodeLevel,
    PlanSetup, PlanStatus, BALANCE_TOLERANCE,
};
