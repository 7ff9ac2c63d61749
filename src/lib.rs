//! Pool water treatment recommendations.
//!
//! Given a pool's volume, pH, free chlorine, total alkalinity and an
//! optional visual aspect, [`compute_treatment_plan`] returns which
//! products to add, how much of each, in which order, and how urgent the
//! situation is. The computation is pure and synchronous; callers may run
//! it on every keystroke.

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod message;
pub mod treatment;

pub use crate::core::{
    PlanStatus, TargetTable, TreatmentInput, TreatmentPlan, TreatmentStep, Unit, WaterAspect,
};
pub use error::{PooldoseError, Result};
pub use treatment::{compute_treatment_plan, TreatmentEngine};
