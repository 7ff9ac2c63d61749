//! Command-line arguments for the `pooldose` binary.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::warn;

use crate::core::types::{TreatmentInput, WaterAspect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Status, numbered steps, instructions and warnings.
    Text,
    /// Bullet list ready to paste into a message.
    Checklist,
    /// The plan as JSON, as served to the web forms.
    Json,
}

/// Recommend pool chemicals for a set of water readings.
#[derive(Debug, Parser)]
#[command(name = "pooldose", version)]
pub struct Cli {
    /// Pool volume in m³.
    #[arg(long, allow_negative_numbers = true)]
    pub volume: f64,
    #[arg(long, allow_negative_numbers = true)]
    pub ph: f64,
    /// Free chlorine in ppm.
    #[arg(long, allow_negative_numbers = true)]
    pub chlorine: f64,
    /// Total alkalinity in ppm.
    #[arg(long, allow_negative_numbers = true)]
    pub alkalinity: f64,
    /// Water aspect (crystal, cloudy, milky, green, dark-green). Omit for numeric-only mode.
    #[arg(long)]
    pub aspect: Option<String>,
    /// TOML configuration overriding the built-in target table.
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl Cli {
    pub fn to_input(&self) -> TreatmentInput {
        let aspect = self.aspect.as_deref().and_then(|raw| {
            let parsed = WaterAspect::parse(raw);
            if parsed.is_none() {
                warn!(aspect = raw, "unrecognised aspect, using numeric-only mode");
            }
            parsed
        });
        TreatmentInput {
            pool_volume_m3: self.volume,
            ph: self.ph,
            free_chlorine_ppm: self.chlorine,
            total_alkalinity_ppm: self.alkalinity,
            aspect,
        }
    }
}
