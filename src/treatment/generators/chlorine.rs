//! Chlorine generator.
//!
//! Numeric mode tops free chlorine up to the maintenance target. Green
//! water switches to a fixed shock dose whatever the test kit reads,
//! since algae consume chlorine faster than a spot reading shows.

use tracing::trace;

use crate::core::math::shortfall;
use crate::core::table::TargetTable;
use crate::core::types::TreatmentInput;
use crate::treatment::generator::{dosable_volume, GeneratorId, ProposedStep, StepGenerator};

#[derive(Debug, Default, Clone, Copy)]
pub struct ChlorineGenerator;

impl StepGenerator for ChlorineGenerator {
    fn id(&self) -> GeneratorId {
        GeneratorId::Chlorine
    }

    fn generate(&self, input: &TreatmentInput, table: &TargetTable) -> Option<ProposedStep> {
        let volume = dosable_volume(input)?;
        if input.is_green() {
            let quantity = table.coefficients.shock_chlorine * volume;
            trace!(quantity, "aspect forces shock chlorine");
            return ProposedStep::dose(self.id(), &table.products.shock_chlorine, quantity);
        }

        let target = table.chlorine.target;
        if input.free_chlorine_ppm >= target {
            return None;
        }
        let deficit = shortfall(input.free_chlorine_ppm, target);
        let quantity = deficit * table.coefficients.chlorine_per_ppm * volume;
        ProposedStep::dose(self.id(), &table.products.chlorine, quantity)
    }
}
