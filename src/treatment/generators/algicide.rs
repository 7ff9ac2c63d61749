//! Algicide generator.
//!
//! Green water gets the shock dose. Otherwise a maintenance dose is
//! proposed while free chlorine sits below target, since that is when
//! algae can take hold. The two doses never stack.

use crate::core::table::TargetTable;
use crate::core::types::TreatmentInput;
use crate::treatment::generator::{dosable_volume, GeneratorId, ProposedStep, StepGenerator};

#[derive(Debug, Default, Clone, Copy)]
pub struct AlgicideGenerator;

impl StepGenerator for AlgicideGenerator {
    fn id(&self) -> GeneratorId {
        GeneratorId::Algicide
    }

    fn generate(&self, input: &TreatmentInput, table: &TargetTable) -> Option<ProposedStep> {
        let volume = dosable_volume(input)?;
        let coefficients = &table.coefficients;
        if input.is_green() {
            return ProposedStep::dose(
                self.id(),
                &table.products.shock_algicide,
                coefficients.algicide_shock * volume,
            );
        }
        if input.free_chlorine_ppm >= table.chlorine.target {
            return None;
        }
        ProposedStep::dose(
            self.id(),
            &table.products.maintenance_algicide,
            coefficients.algicide_maintenance * volume,
        )
    }
}
