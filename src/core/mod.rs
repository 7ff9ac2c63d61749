//! Data model, reference table and input normalisation.

pub mod math;
pub mod normalizer;
pub mod table;
pub mod types;

pub use normalizer::{normalize, NormalizedInput};
pub use table::{TableError, TargetTable};
pub use types::{PlanStatus, TreatmentInput, TreatmentPlan, TreatmentStep, Unit, WaterAspect};
