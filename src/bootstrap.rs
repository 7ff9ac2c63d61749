use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, OutputFormat};
use crate::config::{self, AppConfig};
use crate::message::{render_checklist, render_report};
use crate::treatment::TreatmentEngine;

/// Configuration from `path`; without one, the shipped `config/base.toml`
/// when it exists in the working directory, else the built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(p) => config::load(p).with_context(|| format!("loading config from {}", p.display())),
        None if config::base_exists() => {
            config::load_base().with_context(|| format!("loading {}", config::BASE_CONFIG_PATH))
        }
        None => Ok(AppConfig::default()),
    }
}

/// Install the stderr fmt subscriber. `RUST_LOG` wins over `default_filter`.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Compute the plan for the command-line readings and write it to `out`.
pub fn run(cli: &Cli, cfg: AppConfig, out: &mut impl Write) -> Result<()> {
    let engine = TreatmentEngine::new(cfg.table).context("invalid target table")?;
    let plan = engine.compute(&cli.to_input());
    info!(status = %plan.status, steps = plan.steps.len(), "plan computed");

    match cli.format {
        OutputFormat::Text => write!(out, "{}", render_report(&plan))?,
        OutputFormat::Checklist => {
            let checklist = render_checklist(&plan);
            write!(out, "{checklist}")?;
            if !checklist.is_empty() {
                writeln!(out)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &plan)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn output(args: &[&str]) -> String {
        let cli = Cli::try_parse_from(args).unwrap();
        let mut buf = Vec::new();
        run(&cli, AppConfig::default(), &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn checklist_output_for_cloudy_pool() {
        let out = output(&[
            "pooldose", "--volume", "40", "--ph", "7.8", "--chlorine", "3",
            "--alkalinity", "60", "--aspect", "CLOUDY", "--format", "checklist",
        ]);
        assert_eq!(
            out,
            "• Alkalinity Increaser: 2720g\n• pH Reducer (Acid): 400ml\n• Clarifier: 160ml\n"
        );
    }

    #[test]
    fn json_output_is_the_plan() {
        let out = output(&[
            "pooldose", "--volume", "50", "--ph", "7.4", "--chlorine", "0",
            "--alkalinity", "100", "--aspect", "green", "--format", "json",
        ]);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["status"], "CRITICAL");
        assert_eq!(value["steps"][0]["product"], "Shock Chlorine");
        assert_eq!(value["steps"][0]["order"], 1);
    }

    #[test]
    fn text_output_reports_clamped_volume() {
        let out = output(&[
            "pooldose", "--volume", "-5", "--ph", "7.4", "--chlorine", "3", "--alkalinity", "100",
        ]);
        assert!(out.starts_with("Status: OK\n"));
        assert!(out.contains("! poolVolumeM3 out of range, clamped to 0"));
    }

    #[test]
    fn empty_checklist_prints_nothing() {
        let out = output(&[
            "pooldose", "--volume", "30", "--ph", "7.4", "--chlorine", "3",
            "--alkalinity", "100", "--aspect", "crystal", "--format", "checklist",
        ]);
        assert_eq!(out, "");
    }

    #[test]
    fn default_config_comes_from_shipped_base() {
        // Unit tests run from the package root, where config/base.toml lives.
        let cfg = load_config(None).unwrap();
        assert_eq!(cfg.table, crate::core::table::TargetTable::default());
    }

    #[test]
    fn missing_config_file_is_reported() {
        let err = load_config(Some(Path::new("no/such/pooldose.toml"))).unwrap_err();
        assert!(err.to_string().contains("loading config"));
    }
}
