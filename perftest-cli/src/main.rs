use anyhow::Result;
use clap::Parser;
use perftest_cli::{commands, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    perftest_core::tracing::init_tracing(cli.verbose);

    let config = commands::load_config(&cli)?;
    let stdout = std::io::stdout();
    commands::execute(&cli.command, &config, &mut stdout.lock())
}
