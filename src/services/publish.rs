//! Publishing a finalized plan to the external accounting system
//!
//! The core only needs an opaque success/failure contract: hand over a fully
//! balanced plan, get back a receipt or an error. There is no retry, no
//! timeout, and no partial submission; a failed publish leaves the plan in
//! draft and the user may simply try again.

use std::thread;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CascadeError, CascadeResult};
use crate::models::BudgetPlan;

/// Proof of acceptance returned by the accounting system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishReceipt {
    /// Reference assigned by the receiving system
    pub reference: Uuid,
    /// When the plan was accepted
    pub accepted_at: DateTime<Utc>,
    /// How many GL budget records were created
    pub line_count: usize,
}

/// The external persistence contract
pub trait ErpPublisher {
    /// Submit one complete plan; blocks until the system accepts or rejects
    fn publish(&self, plan: &BudgetPlan) -> CascadeResult<PublishReceipt>;
}

/// Stand-in for the real accounting system: waits out a configurable
/// latency, then accepts (or fails, when told to).
#[derive(Debug, Clone)]
pub struct SimulatedErp {
    latency: Duration,
    fail_with: Option<String>,
}

impl SimulatedErp {
    /// Simulated system with the given round-trip latency
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            fail_with: None,
        }
    }

    /// Instant responses, for tests and non-interactive runs
    pub fn instant() -> Self {
        Self::with_latency(Duration::ZERO)
    }

    /// A publisher that always fails with the given message
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            latency: Duration::ZERO,
            fail_with: Some(message.into()),
        }
    }
}

impl ErpPublisher for SimulatedErp {
    fn publish(&self, plan: &BudgetPlan) -> CascadeResult<PublishReceipt> {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }

        if let Some(message) = &self.fail_with {
            return Err(CascadeError::Publish(message.clone()));
        }

        Ok(PublishReceipt {
            reference: Uuid::new_v4(),
            accepted_at: Utc::now(),
            line_count: plan.line_count(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::models::{FiscalPeriod, Money, PlanSetup, SubsidiaryId};
    use chrono::NaiveDate;

    fn plan() -> BudgetPlan {
        let setup = PlanSetup {
            subsidiary_id: SubsidiaryId::new("1"),
            period: FiscalPeriod::new(
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            )
            .unwrap(),
            total_amount: Money::from_major(1000),
        };
        BudgetPlan::new(setup, &Catalog::builtin()).unwrap()
    }

    #[test]
    fn test_instant_publish_succeeds() {
        let receipt = SimulatedErp::instant().publish(&plan()).unwrap();
        assert_eq!(receipt.line_count, 0);
        assert!(!receipt.reference.is_nil());
    }

    #[test]
    fn test_failing_publisher() {
        let err = SimulatedErp::failing("connection reset")
            .publish(&plan())
            .unwrap_err();
        assert!(matches!(err, CascadeError::Publish(_)));
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn test_receipt_serialization() {
        let receipt = SimulatedErp::instant().publish(&plan()).unwrap();
        let json = serde_json::to_string(&receipt).unwrap();
        let deserialized: PublishReceipt = serde_json::from_str(&json).unwrap();
        assert_eq!(receipt, deserialized);
    }
}
