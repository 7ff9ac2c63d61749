//! Alkalinity generator.
//!
//! Low alkalinity lets pH drift, so when the reading falls below the
//! ideal band the increaser doses back up to the table target.

use tracing::trace;

use crate::core::math::shortfall;
use crate::core::table::TargetTable;
use crate::core::types::TreatmentInput;
use crate::treatment::generator::{dosable_volume, GeneratorId, ProposedStep, StepGenerator};

#[derive(Debug, Default, Clone, Copy)]
pub struct AlkalinityGenerator;

impl StepGenerator for AlkalinityGenerator {
    fn id(&self) -> GeneratorId {
        GeneratorId::Alkalinity
    }

    fn generate(&self, input: &TreatmentInput, table: &TargetTable) -> Option<ProposedStep> {
        let volume = dosable_volume(input)?;
        let targets = &table.alkalinity;
        if input.total_alkalinity_ppm >= targets.band.low {
            return None;
        }
        let deficit = shortfall(input.total_alkalinity_ppm, targets.target);
        let quantity = deficit * volume * table.coefficients.alkalinity_per_ppm;
        trace!(deficit, quantity, "alkalinity below band");
        ProposedStep::dose(self.id(), &table.products.alkalinity_increaser, quantity)
    }
}
