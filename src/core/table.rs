//! Target table: ideal bands, dosing coefficients and product catalog.
//!
//! Every threshold and coefficient the generators use comes from here.
//! The built-in [`TargetTable::default`] matches `config/base.toml`; a
//! deployment can override any subset of it through configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::Unit;

/// Target table validation failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    #[error("{parameter} band is inverted or not finite: [{low}, {high}]")]
    InvalidBand {
        parameter: &'static str,
        low: f64,
        high: f64,
    },
    #[error("{parameter} target {target} lies outside its band [{low}, {high}]")]
    TargetOutOfBand {
        parameter: &'static str,
        target: f64,
        low: f64,
        high: f64,
    },
    #[error("{name} must be a finite, non-negative number (got {value})")]
    InvalidCoefficient { name: &'static str, value: f64 },
    #[error("product {0} has an empty name")]
    EmptyProductName(&'static str),
}

/// Closed ideal interval for a reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub low: f64,
    pub high: f64,
}

impl Band {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }

    fn check(&self, parameter: &'static str) -> Result<(), TableError> {
        if !self.low.is_finite() || !self.high.is_finite() || self.low > self.high {
            return Err(TableError::InvalidBand {
                parameter,
                low: self.low,
                high: self.high,
            });
        }
        Ok(())
    }

    fn check_target(&self, parameter: &'static str, target: f64) -> Result<(), TableError> {
        if !self.contains(target) {
            return Err(TableError::TargetOutOfBand {
                parameter,
                target,
                low: self.low,
                high: self.high,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhTargets {
    pub band: Band,
    pub target: f64,
    /// Beyond this distance outside the band the coarse dose applies.
    pub coarse_gap: f64,
}

impl Default for PhTargets {
    fn default() -> Self {
        Self {
            band: Band::new(7.2, 7.6),
            target: 7.4,
            coarse_gap: 0.4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlkalinityTargets {
    pub band: Band,
    /// Level the increaser doses up to once the reading drops below the band.
    pub target: f64,
}

impl Default for AlkalinityTargets {
    fn default() -> Self {
        Self {
            band: Band::new(80.0, 120.0),
            target: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChlorineTargets {
    /// Maintenance level for free chlorine, in ppm.
    pub target: f64,
}

impl Default for ChlorineTargets {
    fn default() -> Self {
        Self { target: 3.0 }
    }
}

/// Dose coefficients, all expressed per m³ of pool volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Coefficients {
    /// Per ppm of alkalinity short of target.
    pub alkalinity_per_ppm: f64,
    pub ph_fine: f64,
    pub ph_coarse: f64,
    /// Per ppm of free chlorine short of target.
    pub chlorine_per_ppm: f64,
    pub shock_chlorine: f64,
    pub algicide_maintenance: f64,
    pub algicide_shock: f64,
    pub clarifier_cloudy: f64,
    pub clarifier_milky: f64,
    pub decanter_green: f64,
    pub decanter_dark_green: f64,
}

impl Default for Coefficients {
    fn default() -> Self {
        Self {
            alkalinity_per_ppm: 1.7,
            ph_fine: 10.0,
            ph_coarse: 20.0,
            chlorine_per_ppm: 4.0,
            shock_chlorine: 14.0,
            algicide_maintenance: 6.0,
            algicide_shock: 15.0,
            clarifier_cloudy: 4.0,
            clarifier_milky: 6.0,
            decanter_green: 40.0,
            decanter_dark_green: 60.0,
        }
    }
}

impl Coefficients {
    fn named(&self) -> [(&'static str, f64); 11] {
        [
            ("alkalinity_per_ppm", self.alkalinity_per_ppm),
            ("ph_fine", self.ph_fine),
            ("ph_coarse", self.ph_coarse),
            ("chlorine_per_ppm", self.chlorine_per_ppm),
            ("shock_chlorine", self.shock_chlorine),
            ("algicide_maintenance", self.algicide_maintenance),
            ("algicide_shock", self.algicide_shock),
            ("clarifier_cloudy", self.clarifier_cloudy),
            ("clarifier_milky", self.clarifier_milky),
            ("decanter_green", self.decanter_green),
            ("decanter_dark_green", self.decanter_dark_green),
        ]
    }
}

/// A product as it appears on a plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub name: String,
    pub unit: Unit,
    pub instruction: String,
    /// Operator guidance added to the plan warnings whenever this product is dosed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guidance: Option<String>,
}

impl Product {
    fn new(name: &str, unit: Unit, instruction: &str) -> Self {
        Self {
            name: name.to_string(),
            unit,
            instruction: instruction.to_string(),
            guidance: None,
        }
    }

    fn with_guidance(mut self, guidance: &str) -> Self {
        self.guidance = Some(guidance.to_string());
        self
    }
}

/// Products named on plans. Deserialising merges each configured entry
/// onto the built-in product, so an override only changes what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CatalogOverride")]
pub struct Catalog {
    pub alkalinity_increaser: Product,
    pub ph_increaser: Product,
    pub ph_reducer: Product,
    pub chlorine: Product,
    pub shock_chlorine: Product,
    pub maintenance_algicide: Product,
    pub shock_algicide: Product,
    pub clarifier: Product,
    pub decanter: Product,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            alkalinity_increaser: Product::new(
                "Alkalinity Increaser",
                Unit::Grams,
                "Dissolve in a bucket of pool water and spread along the edges; \
                 wait 6h with the pump running before correcting pH",
            ),
            ph_increaser: Product::new(
                "pH Increaser (Soda Ash)",
                Unit::Grams,
                "Dissolve in a bucket of pool water and spread over the surface; \
                 wait 6h before re-testing",
            ),
            ph_reducer: Product::new(
                "pH Reducer (Acid)",
                Unit::Milliliters,
                "Dilute in a bucket of pool water and pour near the return jets; \
                 wait 6h before re-testing",
            ),
            chlorine: Product::new(
                "Granular Chlorine",
                Unit::Grams,
                "Dissolve in a bucket of pool water and spread over the surface \
                 with the pump running",
            ),
            shock_chlorine: Product::new(
                "Shock Chlorine",
                Unit::Grams,
                "Dissolve and spread over the whole surface at dusk; keep filtering for 8h",
            )
            .with_guidance("Brush walls thoroughly to loosen algae before shocking"),
            maintenance_algicide: Product::new(
                "Maintenance Algicide",
                Unit::Milliliters,
                "Pour along the edges with the pump running",
            ),
            shock_algicide: Product::new(
                "Shock Algicide",
                Unit::Milliliters,
                "Apply 2h after the shock chlorine with the pump running",
            )
            .with_guidance("Keep the pool closed to bathers until free chlorine is back in range"),
            clarifier: Product::new(
                "Clarifier",
                Unit::Milliliters,
                "Dilute in a bucket of pool water and spread over the surface",
            )
            .with_guidance("Keep the filter running for at least 8h after adding clarifier"),
            decanter: Product::new(
                "Decanter",
                Unit::Grams,
                "Dissolve and spread over the surface 6h after the algicide",
            )
            .with_guidance(
                "Filter 6h, then switch the pump off and allow to settle; \
                 vacuum to waste the next day",
            ),
        }
    }
}

impl Catalog {
    fn named(&self) -> [(&'static str, &Product); 9] {
        [
            ("alkalinity_increaser", &self.alkalinity_increaser),
            ("ph_increaser", &self.ph_increaser),
            ("ph_reducer", &self.ph_reducer),
            ("chlorine", &self.chlorine),
            ("shock_chlorine", &self.shock_chlorine),
            ("maintenance_algicide", &self.maintenance_algicide),
            ("shock_algicide", &self.shock_algicide),
            ("clarifier", &self.clarifier),
            ("decanter", &self.decanter),
        ]
    }
}

/// Configured fields of one product; anything left out keeps the built-in value.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ProductOverride {
    name: Option<String>,
    unit: Option<Unit>,
    instruction: Option<String>,
    guidance: Option<String>,
}

impl ProductOverride {
    fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(unit) = self.unit {
            product.unit = unit;
        }
        if let Some(instruction) = self.instruction {
            product.instruction = instruction;
        }
        if let Some(guidance) = self.guidance {
            product.guidance = Some(guidance);
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct CatalogOverride {
    alkalinity_increaser: ProductOverride,
    ph_increaser: ProductOverride,
    ph_reducer: ProductOverride,
    chlorine: ProductOverride,
    shock_chlorine: ProductOverride,
    maintenance_algicide: ProductOverride,
    shock_algicide: ProductOverride,
    clarifier: ProductOverride,
    decanter: ProductOverride,
}

impl From<CatalogOverride> for Catalog {
    fn from(overrides: CatalogOverride) -> Self {
        let mut catalog = Catalog::default();
        overrides.alkalinity_increaser.apply(&mut catalog.alkalinity_increaser);
        overrides.ph_increaser.apply(&mut catalog.ph_increaser);
        overrides.ph_reducer.apply(&mut catalog.ph_reducer);
        overrides.chlorine.apply(&mut catalog.chlorine);
        overrides.shock_chlorine.apply(&mut catalog.shock_chlorine);
        overrides.maintenance_algicide.apply(&mut catalog.maintenance_algicide);
        overrides.shock_algicide.apply(&mut catalog.shock_algicide);
        overrides.clarifier.apply(&mut catalog.clarifier);
        overrides.decanter.apply(&mut catalog.decanter);
        catalog
    }
}

/// Reference data driving every generator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetTable {
    pub ph: PhTargets,
    pub alkalinity: AlkalinityTargets,
    pub chlorine: ChlorineTargets,
    pub coefficients: Coefficients,
    pub products: Catalog,
}

impl TargetTable {
    /// Check bands, targets, coefficients and product names.
    pub fn validate(&self) -> Result<(), TableError> {
        self.ph.band.check("ph")?;
        self.ph.band.check_target("ph", self.ph.target)?;
        self.alkalinity.band.check("alkalinity")?;
        self.alkalinity.band.check_target("alkalinity", self.alkalinity.target)?;

        let thresholds = [
            ("ph.coarse_gap", self.ph.coarse_gap),
            ("chlorine.target", self.chlorine.target),
        ];
        for (name, value) in thresholds.into_iter().chain(self.coefficients.named()) {
            if !value.is_finite() || value < 0.0 {
                return Err(TableError::InvalidCoefficient { name, value });
            }
        }

        for (field, product) in self.products.named() {
            if product.name.trim().is_empty() {
                return Err(TableError::EmptyProductName(field));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_is_valid() {
        assert_eq!(TargetTable::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_inverted_band() {
        let mut table = TargetTable::default();
        table.ph.band = Band::new(7.6, 7.2);
        assert!(matches!(
            table.validate(),
            Err(TableError::InvalidBand { parameter: "ph", .. })
        ));
    }

    #[test]
    fn rejects_target_outside_band() {
        let mut table = TargetTable::default();
        table.alkalinity.target = 150.0;
        assert!(matches!(
            table.validate(),
            Err(TableError::TargetOutOfBand { parameter: "alkalinity", .. })
        ));
    }

    #[test]
    fn rejects_negative_or_nan_coefficient() {
        let mut table = TargetTable::default();
        table.coefficients.shock_chlorine = -1.0;
        assert_eq!(
            table.validate(),
            Err(TableError::InvalidCoefficient { name: "shock_chlorine", value: -1.0 })
        );

        let mut table = TargetTable::default();
        table.coefficients.ph_fine = f64::NAN;
        assert!(matches!(
            table.validate(),
            Err(TableError::InvalidCoefficient { name: "ph_fine", .. })
        ));
    }

    #[test]
    fn rejects_blank_product_name() {
        let mut table = TargetTable::default();
        table.products.decanter.name = "  ".into();
        assert_eq!(table.validate(), Err(TableError::EmptyProductName("decanter")));
    }

    #[test]
    fn band_contains_is_inclusive() {
        let band = Band::new(7.2, 7.6);
        assert!(band.contains(7.2));
        assert!(band.contains(7.6));
        assert!(!band.contains(7.61));
    }
}
