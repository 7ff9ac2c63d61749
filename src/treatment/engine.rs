//! Treatment engine.
//!
//! The engine owns a [`TargetTable`] and one generator per
//! [`GeneratorId`]. A call normalises the readings, asks the aspect
//! strategy which generators are eligible, runs them independently and
//! hands their proposals to the assembler. Nothing is cached between
//! calls; the engine is immutable once built and can be shared freely.

use std::sync::OnceLock;

use tracing::{debug, instrument};

use crate::core::normalizer::normalize;
use crate::core::table::{TableError, TargetTable};
use crate::core::types::{TreatmentInput, TreatmentPlan};

use super::assembler::assemble;
use super::generator::{GeneratorId, StepGenerator};
use super::generators::{
    AlgicideGenerator, AlkalinityGenerator, ChlorineGenerator, ClarifierGenerator, PhGenerator,
};
use super::strategy::Strategy;

/// Computes treatment plans against a fixed target table.
pub struct TreatmentEngine {
    table: TargetTable,
    generators: Vec<Box<dyn StepGenerator>>,
}

impl TreatmentEngine {
    /// Engine over a validated table.
    pub fn new(table: TargetTable) -> Result<Self, TableError> {
        table.validate()?;
        Ok(Self::with_table_unchecked(table))
    }

    fn with_table_unchecked(table: TargetTable) -> Self {
        let generators: Vec<Box<dyn StepGenerator>> = vec![
            Box::new(AlkalinityGenerator),
            Box::new(PhGenerator),
            Box::new(ChlorineGenerator),
            Box::new(AlgicideGenerator),
            Box::new(ClarifierGenerator),
        ];
        Self { table, generators }
    }

    pub fn table(&self) -> &TargetTable {
        &self.table
    }

    fn generator(&self, id: GeneratorId) -> Option<&dyn StepGenerator> {
        self.generators.iter().find(|g| g.id() == id).map(|g| g.as_ref())
    }

    /// Compute the plan for one set of readings. Never fails: bad
    /// readings are clamped and reported in the plan warnings.
    #[instrument(level = "debug", skip_all, fields(aspect = ?raw.aspect))]
    pub fn compute(&self, raw: &TreatmentInput) -> TreatmentPlan {
        let normalized = normalize(raw);
        let input = &normalized.input;
        let strategy = Strategy::for_aspect(input.aspect);

        let candidates = strategy
            .generators()
            .iter()
            .filter_map(|id| self.generator(*id))
            .map(|generator| {
                let proposed = generator.generate(input, &self.table);
                if let Some(step) = &proposed {
                    debug!(
                        generator = generator.id().as_str(),
                        product = %step.product,
                        amount = step.amount,
                        "generator fired"
                    );
                }
                proposed
            })
            .collect();

        assemble(candidates, strategy.is_critical(), normalized.warnings)
    }
}

impl Default for TreatmentEngine {
    fn default() -> Self {
        Self::with_table_unchecked(TargetTable::default())
    }
}

/// Compute a plan with the built-in target table.
pub fn compute_treatment_plan(input: &TreatmentInput) -> TreatmentPlan {
    static ENGINE: OnceLock<TreatmentEngine> = OnceLock::new();
    ENGINE.get_or_init(TreatmentEngine::default).compute(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{PlanStatus, WaterAspect};

    fn products(plan: &TreatmentPlan) -> Vec<&str> {
        plan.steps.iter().map(|s| s.product.as_str()).collect()
    }

    #[test]
    fn balanced_crystal_water_needs_nothing() {
        let input = TreatmentInput::new(30.0, 7.4, 3.0, 100.0).with_aspect(WaterAspect::Crystal);
        let plan = compute_treatment_plan(&input);
        assert_eq!(plan.status, PlanStatus::Ok);
        assert!(plan.steps.is_empty());
        assert!(plan.warnings.is_empty());
    }

    #[test]
    fn low_ph_gives_single_increaser_step() {
        let input = TreatmentInput::new(30.0, 7.0, 3.0, 100.0).with_aspect(WaterAspect::Crystal);
        let plan = compute_treatment_plan(&input);
        assert_eq!(plan.status, PlanStatus::Warning);
        assert_eq!(plan.steps.len(), 1);
        let step = &plan.steps[0];
        assert_eq!(step.order, 1);
        assert_eq!(step.product, "pH Increaser (Soda Ash)");
        assert_eq!(step.amount, 300);
    }

    #[test]
    fn green_water_gets_rescue_sequence() {
        let input = TreatmentInput::new(50.0, 7.4, 0.0, 100.0).with_aspect(WaterAspect::Green);
        let plan = compute_treatment_plan(&input);
        assert_eq!(plan.status, PlanStatus::Critical);
        assert_eq!(products(&plan), ["Shock Chlorine", "Shock Algicide", "Decanter"]);
        assert_eq!(plan.steps[0].order, 1);
        assert_eq!(plan.steps[0].amount, 700);
        assert!(plan
            .warnings
            .iter()
            .any(|w| w.to_lowercase().contains("brush walls")));
    }

    #[test]
    fn negative_volume_gives_empty_plan_with_warning() {
        let plan = compute_treatment_plan(&TreatmentInput::new(-5.0, 7.4, 3.0, 100.0));
        assert!(plan.steps.is_empty());
        assert_eq!(plan.status, PlanStatus::Ok);
        assert_eq!(plan.warnings, ["poolVolumeM3 out of range, clamped to 0"]);
    }

    #[test]
    fn cloudy_water_with_low_alkalinity_and_high_ph() {
        let input = TreatmentInput::new(40.0, 7.8, 3.0, 60.0).with_aspect(WaterAspect::Cloudy);
        let plan = compute_treatment_plan(&input);
        assert_eq!(plan.status, PlanStatus::Warning);
        assert_eq!(
            products(&plan),
            ["Alkalinity Increaser", "pH Reducer (Acid)", "Clarifier"]
        );
        let orders: Vec<u32> = plan.steps.iter().map(|s| s.order).collect();
        assert_eq!(orders, [1, 2, 3]);
        assert_eq!(plan.steps[0].amount, 2720);
        assert_eq!(plan.steps[1].amount, 400);
        assert_eq!(plan.steps[2].amount, 160);
    }

    #[test]
    fn green_water_with_high_chlorine_still_shocks() {
        let input = TreatmentInput::new(30.0, 7.4, 10.0, 100.0).with_aspect(WaterAspect::Green);
        let plan = compute_treatment_plan(&input);
        assert!(plan.step_for("Shock Chlorine").is_some());
    }

    #[test]
    fn green_water_without_volume_stays_critical() {
        let input = TreatmentInput::new(0.0, 6.0, 0.0, 20.0).with_aspect(WaterAspect::DarkGreen);
        let plan = compute_treatment_plan(&input);
        assert!(plan.steps.is_empty());
        assert_eq!(plan.status, PlanStatus::Critical);
    }

    #[test]
    fn extreme_volume_is_capped_and_still_shocks() {
        let input = TreatmentInput::new(1e308, 7.4, 0.0, 100.0).with_aspect(WaterAspect::Green);
        let plan = compute_treatment_plan(&input);
        assert_eq!(plan.status, PlanStatus::Critical);
        assert_eq!(plan.step_for("Shock Chlorine").map(|s| s.amount), Some(140_000));
        assert_eq!(plan.warnings[0], "poolVolumeM3 out of range, clamped to 10000");
    }

    #[test]
    fn numeric_only_never_adds_aspect_products() {
        let plan = compute_treatment_plan(&TreatmentInput::new(30.0, 6.5, 0.5, 50.0));
        assert_eq!(
            products(&plan),
            ["Alkalinity Increaser", "pH Increaser (Soda Ash)", "Granular Chlorine"]
        );
        assert!(plan.warnings.is_empty());
    }

    #[test]
    fn custom_table_changes_doses() {
        let mut table = TargetTable::default();
        table.coefficients.ph_fine = 12.0;
        let engine = TreatmentEngine::new(table).unwrap();
        let plan = engine.compute(&TreatmentInput::new(10.0, 7.0, 3.0, 100.0));
        assert_eq!(plan.steps[0].amount, 120);
    }

    #[test]
    fn invalid_table_is_rejected() {
        let mut table = TargetTable::default();
        table.coefficients.chlorine_per_ppm = -4.0;
        assert!(TreatmentEngine::new(table).is_err());
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TreatmentEngine>();
    }
}
