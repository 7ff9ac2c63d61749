//! Core data types for the treatment engine.
//!
//! These structures describe the water readings supplied by callers and
//! the plan handed back to them. Field and variant names serialise to
//! the camelCase / SCREAMING_SNAKE_CASE names used by the web forms, so
//! a plan can be passed to the UI as JSON without a translation layer.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Visual classification of the water made by the technician on site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WaterAspect {
    Crystal,
    Cloudy,
    Milky,
    Green,
    DarkGreen,
}

impl WaterAspect {
    pub const ALL: [WaterAspect; 5] = [
        WaterAspect::Crystal,
        WaterAspect::Cloudy,
        WaterAspect::Milky,
        WaterAspect::Green,
        WaterAspect::DarkGreen,
    ];

    /// Green and dark green water always get the rescue sequence.
    pub fn is_green(self) -> bool {
        matches!(self, WaterAspect::Green | WaterAspect::DarkGreen)
    }

    /// Cloudy and milky water need a clarifier on top of the numeric corrections.
    pub fn is_turbid(self) -> bool {
        matches!(self, WaterAspect::Cloudy | WaterAspect::Milky)
    }

    /// Wire name, as used in JSON payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            WaterAspect::Crystal => "CRYSTAL",
            WaterAspect::Cloudy => "CLOUDY",
            WaterAspect::Milky => "MILKY",
            WaterAspect::Green => "GREEN",
            WaterAspect::DarkGreen => "DARK_GREEN",
        }
    }

    /// Lenient parse accepting wire names in any case, kebab or spaced
    /// spellings, and the Portuguese labels used on the visit forms.
    /// Returns `None` for anything unrecognised.
    pub fn parse(raw: &str) -> Option<Self> {
        let key: String = raw
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                other => other.to_ascii_lowercase(),
            })
            .collect();
        match key.as_str() {
            "crystal" | "crystal_clear" | "clear" | "cristalina" | "cristalino" => {
                Some(WaterAspect::Crystal)
            }
            "cloudy" | "turva" | "turvo" => Some(WaterAspect::Cloudy),
            "milky" | "leitosa" | "leitoso" => Some(WaterAspect::Milky),
            "green" | "verde" => Some(WaterAspect::Green),
            "dark_green" | "darkgreen" | "verde_escura" | "verde_escuro" => {
                Some(WaterAspect::DarkGreen)
            }
            _ => None,
        }
    }
}

impl fmt::Display for WaterAspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown water aspect: {0:?}")]
pub struct UnknownAspect(pub String);

impl FromStr for WaterAspect {
    type Err = UnknownAspect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WaterAspect::parse(s).ok_or_else(|| UnknownAspect(s.to_string()))
    }
}

/// Unknown or empty aspects fall back to numeric-only mode instead of
/// rejecting the whole payload.
fn lenient_aspect<'de, D>(deserializer: D) -> Result<Option<WaterAspect>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(WaterAspect::parse))
}

/// Water readings for a single pool, as typed into the calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentInput {
    /// Pool volume in cubic metres.
    pub pool_volume_m3: f64,
    /// Measured pH.
    pub ph: f64,
    /// Free chlorine in ppm.
    pub free_chlorine_ppm: f64,
    /// Total alkalinity in ppm.
    pub total_alkalinity_ppm: f64,
    /// Visual aspect. `None` runs the numeric generators only.
    #[serde(
        default,
        deserialize_with = "lenient_aspect",
        skip_serializing_if = "Option::is_none"
    )]
    pub aspect: Option<WaterAspect>,
}

impl TreatmentInput {
    pub fn new(
        pool_volume_m3: f64,
        ph: f64,
        free_chlorine_ppm: f64,
        total_alkalinity_ppm: f64,
    ) -> Self {
        Self {
            pool_volume_m3,
            ph,
            free_chlorine_ppm,
            total_alkalinity_ppm,
            aspect: None,
        }
    }

    pub fn with_aspect(mut self, aspect: WaterAspect) -> Self {
        self.aspect = Some(aspect);
        self
    }

    /// True when the aspect forces the rescue sequence.
    pub fn is_green(&self) -> bool {
        self.aspect.is_some_and(WaterAspect::is_green)
    }
}

/// Dosing unit. Powders are weighed, liquids measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "g")]
    Grams,
    #[serde(rename = "ml")]
    Milliliters,
}

impl Unit {
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Grams => "g",
            Unit::Milliliters => "ml",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One product application in the recommended sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentStep {
    /// 1-based position in the application sequence.
    pub order: u32,
    /// Canonical product name from the target table.
    pub product: String,
    /// Whole grams or millilitres.
    pub amount: u32,
    pub unit: Unit,
    /// Short operator guidance, e.g. how long to wait before the next step.
    pub instruction: String,
}

/// Overall urgency of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanStatus {
    /// All readings inside their ideal bands.
    Ok,
    /// At least one correction is needed.
    Warning,
    /// Green water; the rescue sequence applies.
    Critical,
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PlanStatus::Ok => "OK",
            PlanStatus::Warning => "WARNING",
            PlanStatus::Critical => "CRITICAL",
        })
    }
}

/// Output of the engine: ordered steps, a derived status and warnings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentPlan {
    pub status: PlanStatus,
    pub steps: Vec<TreatmentStep>,
    pub warnings: Vec<String>,
}

impl TreatmentPlan {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// True when the technician has something to do or to look at.
    pub fn requires_action(&self) -> bool {
        self.status != PlanStatus::Ok
    }

    /// First step dosing the named product, if any.
    pub fn step_for(&self, product: &str) -> Option<&TreatmentStep> {
        self.steps.iter().find(|s| s.product == product)
    }
}
