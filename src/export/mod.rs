//! Export module for cascade-cli
//!
//! Writes a finalized plan out in three formats:
//! - JSON: versioned envelope for machine consumption
//! - YAML: human-readable, with a commented header
//! - CSV: one flattened row per GL line (spreadsheet-compatible)

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::export_plan_csv;
pub use json::{export_plan_json, PlanExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_plan_yaml;
