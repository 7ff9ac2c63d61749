//! Configuration loading.
//!
//! The shipped `config/base.toml` carries the target table and the
//! default log filter. Every section is optional: whatever a file leaves
//! out falls back to the built-in defaults.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::table::TargetTable;
use crate::error::Result;

pub const BASE_CONFIG_PATH: &str = "config/base.toml";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub table: TargetTable,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

/// Parse and validate a configuration document.
pub fn parse(s: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(s)?;
    cfg.table.validate()?;
    Ok(cfg)
}

pub fn load(path: impl AsRef<Path>) -> Result<AppConfig> {
    let s = fs::read_to_string(path)?;
    parse(&s)
}

/// The shipped `config/base.toml`, relative to the working directory.
pub fn load_base() -> Result<AppConfig> {
    load(base_path())
}

/// Whether the shipped base file is present in the working directory.
pub fn base_exists() -> bool {
    base_path().is_file()
}

/// Target table from a configuration file.
pub fn load_table(path: impl AsRef<Path>) -> Result<TargetTable> {
    load(path).map(|cfg| cfg.table)
}

fn base_path() -> PathBuf {
    PathBuf::from(BASE_CONFIG_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{TreatmentInput, WaterAspect};
    use crate::error::PooldoseError;
    use crate::treatment::TreatmentEngine;

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg.table, TargetTable::default());
        assert_eq!(cfg.logging.filter, "warn");
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = parse(
            r#"
            [table.coefficients]
            shock_chlorine = 16.0

            [table.ph]
            target = 7.5
            "#,
        )
        .unwrap();
        assert_eq!(cfg.table.coefficients.shock_chlorine, 16.0);
        assert_eq!(cfg.table.coefficients.ph_fine, 10.0);
        assert_eq!(cfg.table.ph.target, 7.5);
        assert_eq!(cfg.table.ph.band.low, 7.2);
    }

    #[test]
    fn product_override_only_changes_named_fields() {
        let cfg = parse(
            r#"
            [table.products.shock_chlorine]
            name = "Cloro Choque"
            "#,
        )
        .unwrap();
        let built_in = TargetTable::default().products.shock_chlorine;
        let shock = &cfg.table.products.shock_chlorine;
        assert_eq!(shock.name, "Cloro Choque");
        assert_eq!(shock.unit, built_in.unit);
        assert_eq!(shock.instruction, built_in.instruction);
        assert_eq!(shock.guidance, built_in.guidance);
        assert_eq!(cfg.table.products.clarifier.name, "Clarifier");
    }

    #[test]
    fn renamed_shock_product_keeps_its_guidance_on_plans() {
        let cfg = parse(
            r#"
            [table.products.shock_chlorine]
            name = "Cloro Choque"
            unit = "g"
            "#,
        )
        .unwrap();
        let engine = TreatmentEngine::new(cfg.table).unwrap();
        let input = TreatmentInput::new(50.0, 7.4, 0.0, 100.0).with_aspect(WaterAspect::Green);
        let plan = engine.compute(&input);
        let shock = plan.step_for("Cloro Choque").unwrap();
        assert!(!shock.instruction.is_empty());
        assert!(plan.warnings.iter().any(|w| w.to_lowercase().contains("brush walls")));
    }

    #[test]
    fn instruction_only_override_is_accepted() {
        let cfg = parse("[table.products.decanter]\ninstruction = \"Espalhe\"\n").unwrap();
        let decanter = &cfg.table.products.decanter;
        assert_eq!(decanter.instruction, "Espalhe");
        assert_eq!(decanter.name, "Decanter");
        assert!(decanter.guidance.is_some());
    }

    #[test]
    fn unknown_product_field_is_a_parse_error() {
        let err = parse("[table.products.decanter]\ndose = 3\n").unwrap_err();
        assert!(matches!(err, PooldoseError::Parse(_)));
    }

    #[test]
    fn invalid_table_is_a_config_error() {
        let err = parse("[table.alkalinity]\ntarget = 200.0\n").unwrap_err();
        assert!(matches!(err, PooldoseError::Config(_)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = parse("[table\n").unwrap_err();
        assert!(matches!(err, PooldoseError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load("does/not/exist.toml").unwrap_err();
        assert!(matches!(err, PooldoseError::Io(_)));
    }

    #[test]
    fn shipped_base_matches_built_in_table() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(BASE_CONFIG_PATH);
        assert_eq!(load_table(path).unwrap(), TargetTable::default());
    }

    #[test]
    fn base_config_loads_from_package_root() {
        // cargo runs unit tests from the package root.
        let cfg = load_base().unwrap();
        assert_eq!(cfg.table, TargetTable::default());
        assert_eq!(cfg.logging.filter, "warn");
    }

    #[test]
    fn load_table_rejects_invalid_table() {
        let name = format!("pooldose-invalid-{}.toml", std::process::id());
        let path = std::env::temp_dir().join(name);
        fs::write(&path, "[table.coefficients]\nph_fine = -1.0\n").unwrap();
        let err = load_table(&path).unwrap_err();
        let _ = fs::remove_file(&path);
        assert!(matches!(err, PooldoseError::Config(_)));
    }
}
