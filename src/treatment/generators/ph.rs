//! pH generator.
//!
//! Below the ideal band the increaser is dosed, above it the reducer.
//! The dose per m³ steps up from the fine to the coarse coefficient once
//! the reading sits more than `coarse_gap` outside the nearest bound.

use tracing::trace;

use crate::core::math::distance_outside;
use crate::core::table::TargetTable;
use crate::core::types::TreatmentInput;
use crate::treatment::generator::{dosable_volume, GeneratorId, ProposedStep, StepGenerator};

/// Absorbs float noise in readings such as `7.2 - 6.8`.
const GAP_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Default, Clone, Copy)]
pub struct PhGenerator;

impl StepGenerator for PhGenerator {
    fn id(&self) -> GeneratorId {
        GeneratorId::Ph
    }

    fn generate(&self, input: &TreatmentInput, table: &TargetTable) -> Option<ProposedStep> {
        let volume = dosable_volume(input)?;
        let band = table.ph.band;
        let product = if input.ph < band.low {
            &table.products.ph_increaser
        } else if input.ph > band.high {
            &table.products.ph_reducer
        } else {
            return None;
        };

        let distance = distance_outside(input.ph, band.low, band.high);
        let per_m3 = if distance > table.ph.coarse_gap + GAP_TOLERANCE {
            table.coefficients.ph_coarse
        } else {
            table.coefficients.ph_fine
        };
        trace!(ph = input.ph, distance, per_m3, "ph outside band");
        ProposedStep::dose(self.id(), product, per_m3 * volume)
    }
}
