use clap::Parser;

use pooldose::bootstrap;
use pooldose::cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = bootstrap::load_config(cli.config.as_deref())?;
    bootstrap::init_tracing(&cfg.logging.filter);
    let stdout = std::io::stdout();
    bootstrap::run(&cli, cfg, &mut stdout.lock())
}
