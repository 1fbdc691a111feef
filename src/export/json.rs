//! JSON export functionality
//!
//! Exports a finalized plan as a versioned JSON envelope for downstream
//! tooling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{CascadeError, CascadeResult};
use crate::models::BudgetPlan;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Versioned export envelope around one plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// The exported plan
    pub plan: BudgetPlan,

    /// Export metadata
    pub metadata: ExportMetadata,
}

/// Counts for quick inspection without walking the tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub department_count: usize,
    pub location_count: usize,
    pub line_count: usize,
}

impl PlanExport {
    /// Wrap a plan in the export envelope
    pub fn from_plan(plan: &BudgetPlan) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            metadata: ExportMetadata {
                department_count: plan.department_count(),
                location_count: plan.location_count(),
                line_count: plan.line_count(),
            },
            plan: plan.clone(),
        }
    }
}

/// Export a plan to JSON
pub fn export_plan_json<W: Write>(plan: &BudgetPlan, writer: &mut W) -> CascadeResult<()> {
    let export = PlanExport::from_plan(plan);
    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| CascadeError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| CascadeError::Export(e.to_string()))?;
    Ok(())
}
