//! Core business logic module
//!
//! Request model, validation and planning. These are pure functions over data;
//! loading requests and printing plans live outside this module.

pub mod plan;
pub mod request;
pub mod validation;

#[cfg(test)]
mod validation_proptest;

pub use plan::{build_plan, plan_installation, InstallStep, InstallationPlan, StepAction};
pub use request::{DatabaseSettings, Ensure, InstallRequest, MediaSettings, Product};
pub use validation::{validate_request, ValidatedRequest};
