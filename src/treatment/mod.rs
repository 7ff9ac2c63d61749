//! Treatment layer module index.
//!
//! This module assembles the building blocks of the recommendation
//! engine. The submodules include:
//!
//! - [`generator`]: the [`StepGenerator`] trait and the
//!   [`GeneratorId`] priority order.
//! - [`generators`]: one concrete generator per chemical concern.
//! - [`strategy`]: aspect-driven choice of eligible generators.
//! - [`assembler`]: ordering, numbering, status and warnings.
//! - [`engine`]: the [`TreatmentEngine`] that ties them together.

pub mod assembler;
pub mod engine;
pub mod generator;
pub mod generators;
pub mod strategy;

pub use engine::{compute_treatment_plan, TreatmentEngine};
pub use generator::{GeneratorId, ProposedStep, StepGenerator};
pub use strategy::Strategy;
