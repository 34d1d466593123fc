pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod render;

pub use crate::core::{build_plan, InstallRequest, InstallationPlan, Product};
pub use crate::error::{DialerError, Result};
