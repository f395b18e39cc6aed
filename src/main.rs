use anyhow::Result;
use clap::Parser;
use jsdce::cli::{Cli, Commands};
use jsdce::commands::{render_outcome, run_dce, RunConfig};
use jsdce::observability::{init_logging, install_panic_hook};

// Main orchestrator function
fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            keep,
            analyzer,
            format,
            verbosity,
        } => {
            init_logging(verbosity);
            install_panic_hook();
            handle_run_command(RunConfig {
                config,
                keep,
                analyzer,
                format,
            })
        }
        Commands::Init { force } => {
            init_logging(0);
            jsdce::commands::init::init_config(force)
        }
    }
}

// Task errors map to their category's exit code; everything else goes through anyhow
fn handle_run_command(run: RunConfig) -> Result<()> {
    match run_dce(&run) {
        Ok(outcome) => {
            println!("{}", render_outcome(&outcome, run.format)?);
            Ok(())
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(err.exit_code());
        }
    }
}
