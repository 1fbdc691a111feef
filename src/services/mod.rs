//! Service layer for cascade-cli
//!
//! Business logic on top of the pure data models: plan lifecycle with the
//! conflict check, catalog-verified mutations with audit logging, and
//! submission to the external accounting system.

pub mod plan;
pub mod publish;
pub mod registry;

pub use plan::PlanService;
pub use publish::{ErpPublisher, PublishReceipt, SimulatedErp};
pub use registry::{BudgetRegistry, InMemoryRegistry};
