//! The DCE task: one invocation from configuration to reduced output.
//!
//! ```text
//! Idle -> Extracting -> Assembling -> Invoking -> {Done | Failed} -> Cleanup
//! ```
//!
//! Stages run strictly one after another on the calling thread. The scratch
//! directory is released on every path out of [`DceTask::perform`]; when
//! both a stage and the release fail, the stage's error is returned.

use crate::analyzer::{self, Analyzer};
use crate::arguments;
use crate::assembly;
use crate::config::TaskConfig;
use crate::errors::Result;
use crate::extraction;
use crate::observability::{set_phase_persistent, DcePhase};
use crate::scratch::{settle, ScratchSpace};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info, info_span, warn};

/// What an invocation did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DceOutcome {
    /// The task is disabled; nothing was touched
    Skipped,
    /// The analyzer ran successfully
    Completed(DceReport),
}

/// Summary of a successful invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DceReport {
    pub destination_dir: PathBuf,
    /// Files handed to the analyzer, in order
    pub inputs: Vec<PathBuf>,
    /// How many of `inputs` came from dependency archives
    pub library_inputs: usize,
    /// Metadata companions found in archives and left out
    pub metadata_skipped: usize,
    /// Full argument list passed to the analyzer
    pub arguments: Vec<String>,
    /// States the invocation went through
    pub phases: Vec<DcePhase>,
}

struct StageSummary {
    inputs: Vec<PathBuf>,
    library_inputs: usize,
    metadata_skipped: usize,
    arguments: Vec<String>,
}

/// Ordered record of the states an invocation has entered
#[derive(Debug)]
struct PhaseTrail {
    current: DcePhase,
    visited: Vec<DcePhase>,
}

impl PhaseTrail {
    fn new() -> Self {
        set_phase_persistent(DcePhase::Idle);
        Self {
            current: DcePhase::Idle,
            visited: vec![DcePhase::Idle],
        }
    }

    fn enter(&mut self, next: DcePhase) {
        debug_assert!(
            self.current.can_transition_to(next),
            "invalid transition {} -> {}",
            self.current,
            next
        );
        debug!(from = %self.current, to = %next, "Phase transition");
        self.current = next;
        self.visited.push(next);
        set_phase_persistent(next);
    }
}

/// A configured DCE task
#[derive(Debug, Clone)]
pub struct DceTask {
    config: TaskConfig,
}

impl DceTask {
    pub fn new(config: TaskConfig) -> Self {
        Self { config }
    }

    /// Run one invocation against `analyzer`.
    ///
    /// A disabled task returns [`DceOutcome::Skipped`] without validating or
    /// touching the filesystem.
    pub fn perform<A: Analyzer + ?Sized>(&self, analyzer: &A) -> Result<DceOutcome> {
        if !self.config.enabled {
            info!("DCE was not enabled, skipping");
            return Ok(DceOutcome::Skipped);
        }
        self.config.validate()?;

        let span = info_span!("dce", destination = %self.config.destination_dir.display());
        let _entered = span.enter();

        let mut trail = PhaseTrail::new();
        let scratch = match ScratchSpace::acquire(self.config.scratch_dir()) {
            Ok(scratch) => scratch,
            Err(e) => {
                trail.enter(DcePhase::Failed);
                return Err(e);
            }
        };

        let outcome = self.run_stages(&scratch, analyzer, &mut trail);
        match &outcome {
            Ok(_) => trail.enter(DcePhase::Done),
            Err(e) => {
                warn!(phase = %trail.current, error = %e, "DCE invocation failed");
                trail.enter(DcePhase::Failed);
            }
        }

        trail.enter(DcePhase::Cleanup);
        let summary = settle(outcome, scratch.release())?;

        info!(inputs = summary.inputs.len(), "DCE finished");
        Ok(DceOutcome::Completed(DceReport {
            destination_dir: self.config.destination_dir.clone(),
            inputs: summary.inputs,
            library_inputs: summary.library_inputs,
            metadata_skipped: summary.metadata_skipped,
            arguments: summary.arguments,
            phases: trail.visited,
        }))
    }

    fn run_stages<A: Analyzer + ?Sized>(
        &self,
        scratch: &ScratchSpace,
        analyzer: &A,
        trail: &mut PhaseTrail,
    ) -> Result<StageSummary> {
        trail.enter(DcePhase::Extracting);
        let extracted = extraction::extract(&self.config.dependency_archives, scratch)?;

        trail.enter(DcePhase::Assembling);
        let inputs = assembly::assemble(&self.config.source_files, &extracted);
        let library_inputs = inputs.len() - self.config.source_files.len();
        let metadata_skipped = extracted.len() - library_inputs;
        debug!(
            declared = self.config.source_files.len(),
            library_inputs, metadata_skipped, "Assembled analyzer inputs"
        );

        let args = arguments::build(
            &self.config.analyzer_options,
            self.config.keep_list(),
            &self.config.destination_dir,
        )
        .with_inputs(inputs);

        trail.enter(DcePhase::Invoking);
        analyzer::invoke(analyzer, &args)?;

        Ok(StageSummary {
            arguments: args.to_display_args(),
            inputs: args.inputs,
            library_inputs,
            metadata_skipped,
        })
    }
}

/// Convenience wrapper: build a task from `config` and run it once
pub fn run_task<A: Analyzer + ?Sized>(config: TaskConfig, analyzer: &A) -> Result<DceOutcome> {
    DceTask::new(config).perform(analyzer)
}
