//! cascade-cli - Terminal-based top-down budget distribution wizard
//!
//! This library implements a guided budgeting flow: a user fixes a total
//! budget for a subsidiary and fiscal period, then distributes it down a
//! fixed hierarchy (departments, locations, GL accounts) with the constraint
//! that every level must sum exactly to its parent before the flow advances.
//! Only a fully balanced plan can be submitted to the accounting system.
//!
//! # Architecture
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, ids, periods, the plan tree)
//! - `catalog`: Reference data tables and file loading
//! - `flow`: The wizard step state machine with balance gates
//! - `services`: Business logic (plan lifecycle, conflict check, submission)
//! - `audit`: Append-only audit log of plan mutations
//! - `display`: Terminal formatting for tables and the plan tree
//! - `export`: JSON/YAML/CSV export of finalized plans
//! - `wizard`: The interactive prompt-driven wizard itself

pub mod audit;
pub mod catalog;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod flow;
pub mod models;
pub mod services;
pub mod wizard;

pub use error::{CascadeError, CascadeResult};
