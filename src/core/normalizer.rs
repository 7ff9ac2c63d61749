//! Parameter normalizer.
//!
//! Readings typed into the calculator are pulled into their physical
//! domain before any dosing maths runs. Out-of-range values are never an
//! error: each one is clamped and reported back as a plan warning.

use tracing::trace;

use super::math::clamp_reading;
use super::types::TreatmentInput;

pub const PH_MIN: f64 = 0.0;
pub const PH_MAX: f64 = 14.0;
/// Well above any real pool, and low enough that every dose fits a `u32`.
pub const POOL_VOLUME_MAX_M3: f64 = 10_000.0;

/// Result of normalising raw readings.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedInput {
    pub input: TreatmentInput,
    /// One entry per reading that had to be changed, in field order.
    pub warnings: Vec<String>,
}

/// Clamp every reading into its domain, recording a warning per changed field.
pub fn normalize(raw: &TreatmentInput) -> NormalizedInput {
    let mut warnings = Vec::new();
    let mut clamp = |field: &str, value: f64, low: f64, high: Option<f64>| -> f64 {
        let clamped = clamp_reading(value, low, high);
        // NaN != NaN, so a NaN reading always reports.
        if clamped != value {
            trace!(field, raw = value, clamped, "reading clamped");
            warnings.push(format!("{field} out of range, clamped to {clamped}"));
        }
        clamped
    };

    let input = TreatmentInput {
        pool_volume_m3: clamp("poolVolumeM3", raw.pool_volume_m3, 0.0, Some(POOL_VOLUME_MAX_M3)),
        ph: clamp("ph", raw.ph, PH_MIN, Some(PH_MAX)),
        free_chlorine_ppm: clamp("freeChlorinePpm", raw.free_chlorine_ppm, 0.0, None),
        total_alkalinity_ppm: clamp("totalAlkalinityPpm", raw.total_alkalinity_ppm, 0.0, None),
        aspect: raw.aspect,
    };

    NormalizedInput { input, warnings }
}
