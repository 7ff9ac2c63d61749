//! Aspect strategy selection.
//!
//! The visual aspect decides which generators are eligible to run. Green
//! water always gets the full rescue sequence; turbid water adds the
//! clarifier on top of the routine corrections; readings without an
//! aspect only get the three numeric corrections.

use crate::core::types::WaterAspect;

use super::generator::GeneratorId;

const NUMERIC_ONLY: &[GeneratorId] =
    &[GeneratorId::Alkalinity, GeneratorId::Ph, GeneratorId::Chlorine];

const CRYSTAL: &[GeneratorId] = &[
    GeneratorId::Alkalinity,
    GeneratorId::Ph,
    GeneratorId::Chlorine,
    GeneratorId::Algicide,
];

/// Turbid and green water both make every generator eligible; the
/// generators themselves switch to shock doses for green.
const EVERY_GENERATOR: &[GeneratorId] = &GeneratorId::ALL;

/// Named generator sets, one per aspect family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    NumericOnly,
    Maintenance,
    Turbid,
    Rescue,
}

impl Strategy {
    pub fn for_aspect(aspect: Option<WaterAspect>) -> Self {
        match aspect {
            None => Strategy::NumericOnly,
            Some(a) if a.is_green() => Strategy::Rescue,
            Some(a) if a.is_turbid() => Strategy::Turbid,
            Some(_) => Strategy::Maintenance,
        }
    }

    /// Eligible generators, in application order.
    pub fn generators(self) -> &'static [GeneratorId] {
        match self {
            Strategy::NumericOnly => NUMERIC_ONLY,
            Strategy::Maintenance => CRYSTAL,
            Strategy::Turbid | Strategy::Rescue => EVERY_GENERATOR,
        }
    }

    /// Rescue plans are critical whatever the generators produce.
    pub fn is_critical(self) -> bool {
        self == Strategy::Rescue
    }
}

/// Generators eligible for `aspect`, in application order.
pub fn eligible_generators(aspect: Option<WaterAspect>) -> &'static [GeneratorId] {
    Strategy::for_aspect(aspect).generators()
}
