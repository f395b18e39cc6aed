use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable one-line summary
    Text,
    /// Machine-readable invocation report
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "jsdce")]
#[command(about = "Dead-code elimination for compiled JavaScript and its libraries", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one dead-code elimination pass
    Run {
        /// Task configuration file (defaults to the nearest jsdce.toml)
        #[arg(short, long, env = "JSDCE_CONFIG")]
        config: Option<PathBuf>,

        /// Additional fully-qualified declarations to keep (repeatable)
        #[arg(short, long = "keep", value_name = "FQN")]
        keep: Vec<String>,

        /// Analyzer executable, overriding the configured command
        #[arg(long, value_name = "PROGRAM")]
        analyzer: Option<String>,

        /// Output format for the summary
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
