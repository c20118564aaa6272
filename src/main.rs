//! SBC -> AX15 adapter plate STL generator.

use adapter_plate::cli::{Cli, run};
use adapter_plate::prompt::Prompter;
use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut prompter = Prompter::stdio();

    run(&cli, &mut prompter)?;

    if !cli.no_pause && std::io::stdin().is_terminal() {
        prompter.say("\nPress Enter to close...")?;
        // EOF here just means there is nobody left to wait for.
        let _ = prompter.read_line();
    }

    Ok(())
}
