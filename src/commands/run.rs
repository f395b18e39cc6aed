use crate::analyzer::ProcessAnalyzer;
use crate::cli::OutputFormat;
use crate::config::{load_config, AnalyzerCommand, TaskConfig};
use crate::errors::Result;
use crate::task::{DceOutcome, DceTask};
use std::path::PathBuf;

/// Arguments of `jsdce run`
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub config: Option<PathBuf>,
    pub keep: Vec<String>,
    pub analyzer: Option<String>,
    pub format: OutputFormat,
}

/// Apply command-line overrides on top of the loaded task configuration
pub fn apply_overrides(mut config: TaskConfig, run: &RunConfig) -> TaskConfig {
    config.keep(run.keep.iter().cloned());
    if let Some(program) = &run.analyzer {
        config.analyzer = AnalyzerCommand::new(program.clone());
    }
    config
}

pub fn run_dce(run: &RunConfig) -> Result<DceOutcome> {
    let config = apply_overrides(load_config(run.config.as_deref())?, run);
    let analyzer = ProcessAnalyzer::new(config.analyzer.clone());
    DceTask::new(config).perform(&analyzer)
}

/// Render the outcome for stdout
pub fn render_outcome(outcome: &DceOutcome, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(outcome),
        OutputFormat::Text => Ok(match outcome {
            DceOutcome::Skipped => "DCE was not enabled, skipping".to_string(),
            DceOutcome::Completed(report) => format!(
                "Reduced {} input file(s) into {} ({} from libraries, {} metadata file(s) skipped)",
                report.inputs.len(),
                report.destination_dir.display(),
                report.library_inputs,
                report.metadata_skipped
            ),
        }),
    }
}
