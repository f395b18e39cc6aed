//! External analyzer process.

use super::{Analyzer, AnalyzerRun, InvocationResult};
use crate::arguments::InvocationArguments;
use crate::config::AnalyzerCommand;
use crate::errors::{DceError, Result};
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, info};

/// Exit code reported when the process was terminated by a signal
pub const SIGNAL_EXIT_CODE: i32 = -1;

/// Runs the configured analyzer command and waits for it to exit
#[derive(Debug, Clone)]
pub struct ProcessAnalyzer {
    command: AnalyzerCommand,
}

impl ProcessAnalyzer {
    pub fn new(command: AnalyzerCommand) -> Self {
        Self { command }
    }

    /// Resolve the program through `PATH` unless it is already a path
    fn resolve_program(&self) -> Result<PathBuf> {
        let program = &self.command.program;
        if !self.command.is_bare_name() {
            return Ok(program.clone());
        }
        which::which(program)
            .map_err(|e| DceError::analyzer_launch(program.display().to_string(), e.to_string()))
    }
}

impl Analyzer for ProcessAnalyzer {
    fn analyze(&self, args: &InvocationArguments) -> Result<AnalyzerRun> {
        let program = self.resolve_program()?;
        info!(
            program = %program.display(),
            inputs = args.inputs.len(),
            "Running analyzer"
        );
        debug!(args = ?args.to_display_args(), "Analyzer arguments");

        let output = Command::new(&program)
            .args(&self.command.leading_args)
            .args(args.to_args())
            .output()
            .map_err(|e| DceError::analyzer_launch(program.display().to_string(), e.to_string()))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            debug!(output = %stdout.trim_end(), "Analyzer stdout");
        }

        let status = match output.status.code() {
            Some(code) => InvocationResult::from_code(code),
            None => InvocationResult::Failure(SIGNAL_EXIT_CODE),
        };

        Ok(AnalyzerRun {
            status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
