//! Clarifier / decanter generator.
//!
//! Cloudy and milky water get a clarifier; green water gets a decanter to
//! drop the dead algae to the floor. Crystal water and numeric-only
//! calls never get either.

use crate::core::table::TargetTable;
use crate::core::types::{TreatmentInput, WaterAspect};
use crate::treatment::generator::{dosable_volume, GeneratorId, ProposedStep, StepGenerator};

#[derive(Debug, Default, Clone, Copy)]
pub struct ClarifierGenerator;

impl StepGenerator for ClarifierGenerator {
    fn id(&self) -> GeneratorId {
        GeneratorId::Clarifier
    }

    fn generate(&self, input: &TreatmentInput, table: &TargetTable) -> Option<ProposedStep> {
        let volume = dosable_volume(input)?;
        let c = &table.coefficients;
        let (product, per_m3) = match input.aspect? {
            WaterAspect::Crystal => return None,
            WaterAspect::Cloudy => (&table.products.clarifier, c.clarifier_cloudy),
            WaterAspect::Milky => (&table.products.clarifier, c.clarifier_milky),
            WaterAspect::Green => (&table.products.decanter, c.decanter_green),
            WaterAspect::DarkGreen => (&table.products.decanter, c.decanter_dark_green),
        };
        ProposedStep::dose(self.id(), product, per_m3 * volume)
    }
}
