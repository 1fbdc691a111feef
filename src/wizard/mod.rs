//! Interactive budget wizard
//!
//! Drives the five-screen flow over the [`WizardFlow`] state machine: each
//! screen is a prompt-driven step that mutates the plan through the service
//! layer, and the flow gates decide when the user may move forward. All
//! "which node is focused" state lives in the steps, never in the model.

pub mod prompt;
pub mod steps;

use std::time::Duration;

use crate::audit::AuditLogger;
use crate::catalog::Catalog;
use crate::config::{CascadePaths, Settings};
use crate::error::CascadeResult;
use crate::flow::{WizardFlow, WizardStep};
use crate::models::BudgetPlan;
use crate::services::{InMemoryRegistry, PlanService, SimulatedErp};

use steps::summary::SummaryOutcome;
use steps::StepOutcome;

/// Result of running the wizard
pub enum WizardOutcome {
    /// The plan was submitted and finalized
    Completed(Box<BudgetPlan>),
    /// The user backed out before submission
    Cancelled,
}

/// The interactive budget wizard
pub struct BudgetWizard<'a> {
    catalog: &'a Catalog,
    settings: &'a Settings,
    paths: &'a CascadePaths,
    audit: &'a AuditLogger,
}

impl<'a> BudgetWizard<'a> {
    pub fn new(
        catalog: &'a Catalog,
        settings: &'a Settings,
        paths: &'a CascadePaths,
        audit: &'a AuditLogger,
    ) -> Self {
        Self {
            catalog,
            settings,
            paths,
            audit,
        }
    }

    /// Run the wizard from setup through submission
    pub fn run(&self) -> CascadeResult<WizardOutcome> {
        println!();
        println!("===========================================");
        println!("  New Budget Plan");
        println!("===========================================");
        println!();
        println!("Distribute a subsidiary total down to departments,");
        println!("locations, and GL accounts. Each level must balance");
        println!("before you can continue to the next.");

        let service = PlanService::with_audit(self.catalog, self.audit);
        let registry = InMemoryRegistry::seeded();
        let publisher =
            SimulatedErp::with_latency(Duration::from_millis(self.settings.publish_latency_ms));

        // Setup loop: collect inputs until a plan is created or the user
        // cancels. Conflict and validation errors restart the step.
        let mut plan = loop {
            let Some(setup) = steps::setup::run(self.catalog)? else {
                println!("Cancelled.");
                return Ok(WizardOutcome::Cancelled);
            };
            match service.create_plan(setup, &registry) {
                Ok(plan) => break plan,
                Err(e) => println!("  {}", e),
            }
        };

        let mut flow = WizardFlow::for_plan();
        loop {
            let outcome = match flow.current() {
                // Setup is handled above; the flow starts at departments
                WizardStep::Setup | WizardStep::Departments => {
                    steps::departments::run(&service, &mut plan)?
                }
                WizardStep::Locations => steps::locations::run(&service, &mut plan)?,
                WizardStep::Accounts => {
                    steps::accounts::run(&service, self.catalog, &mut plan)?
                }
                WizardStep::Summary => {
                    match steps::summary::run(&service, &publisher, self.paths, &mut plan)? {
                        SummaryOutcome::Submitted => {
                            return Ok(WizardOutcome::Completed(Box::new(plan)))
                        }
                        SummaryOutcome::Back => StepOutcome::Back,
                        SummaryOutcome::Quit => StepOutcome::Quit,
                    }
                }
            };

            match outcome {
                StepOutcome::Next => {
                    if let Err(e) = flow.advance(&plan) {
                        println!("  {}", e);
                    }
                }
                StepOutcome::Back => {
                    if flow.retreat().is_none() {
                        println!("  Already at the first step");
                    }
                }
                StepOutcome::Quit => {
                    println!("Cancelled. Nothing was submitted.");
                    return Ok(WizardOutcome::Cancelled);
                }
            }
        }
    }
}
