//! Step generator trait.
//!
//! Generators encapsulate the dosing rule for one chemical concern. Each
//! one looks only at the normalised input and the target table, never at
//! another generator's output, and either proposes a step or stays quiet.
//! The [`TreatmentEngine`](super::engine::TreatmentEngine) decides which
//! generators run and the [`assembler`](super::assembler) puts their
//! proposals in order.

use crate::core::math::round_amount;
use crate::core::table::{Product, TargetTable};
use crate::core::types::{TreatmentInput, Unit};

/// Identity of a generator. Declaration order is the application order
/// on a plan: alkalinity stabilises before pH is corrected, and chlorine
/// shock goes in before algicide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GeneratorId {
    Alkalinity,
    Ph,
    Chlorine,
    Algicide,
    Clarifier,
}

impl GeneratorId {
    pub const ALL: [GeneratorId; 5] = [
        GeneratorId::Alkalinity,
        GeneratorId::Ph,
        GeneratorId::Chlorine,
        GeneratorId::Algicide,
        GeneratorId::Clarifier,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GeneratorId::Alkalinity => "alkalinity",
            GeneratorId::Ph => "ph",
            GeneratorId::Chlorine => "chlorine",
            GeneratorId::Algicide => "algicide",
            GeneratorId::Clarifier => "clarifier",
        }
    }
}

/// A step proposed by a generator, before the assembler numbers it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProposedStep {
    pub generator: GeneratorId,
    pub product: String,
    pub amount: u32,
    pub unit: Unit,
    pub instruction: String,
    /// Aspect guidance to surface in the plan warnings.
    pub guidance: Option<String>,
}

impl ProposedStep {
    /// Build a step for `product`, rounding `quantity` to whole units.
    /// Quantities that round to zero produce no step.
    pub fn dose(generator: GeneratorId, product: &Product, quantity: f64) -> Option<Self> {
        let amount = round_amount(quantity);
        if amount == 0 {
            return None;
        }
        Some(Self {
            generator,
            product: product.name.clone(),
            amount,
            unit: product.unit,
            instruction: product.instruction.clone(),
            guidance: product.guidance.clone(),
        })
    }
}

/// A unit of dosing logic.
pub trait StepGenerator: Send + Sync {
    fn id(&self) -> GeneratorId;

    /// Propose a step for the given input, or `None` when no dose is needed.
    fn generate(&self, input: &TreatmentInput, table: &TargetTable) -> Option<ProposedStep>;
}

/// Volume to dose against, or `None` when there is nothing to dose.
pub fn dosable_volume(input: &TreatmentInput) -> Option<f64> {
    let volume = input.pool_volume_m3;
    (volume.is_finite() && volume > 0.0).then_some(volume)
}
