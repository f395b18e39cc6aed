//! The analysis capability behind the orchestrator.
//!
//! The reachability analysis itself lives outside this crate. [`Analyzer`] is
//! the seam: the production implementation launches an external process
//! ([`ProcessAnalyzer`]), while tests and embedders can supply an in-process
//! engine without touching the orchestration code.

mod process;

pub use process::ProcessAnalyzer;

use crate::arguments::InvocationArguments;
use crate::errors::{DceError, Result};
use serde::Serialize;

/// How an analyzer run terminated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvocationResult {
    Success,
    Failure(i32),
}

impl InvocationResult {
    /// Build from a process exit code
    pub fn from_code(code: i32) -> Self {
        if code == 0 {
            Self::Success
        } else {
            Self::Failure(code)
        }
    }

    /// Turn a failure into an [`DceError::Analysis`] carrying the exit code
    pub fn into_result(self, stderr: &str) -> Result<()> {
        match self {
            Self::Success => Ok(()),
            Self::Failure(code) => Err(DceError::analysis(code, stderr)),
        }
    }
}

/// Output of one analyzer run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerRun {
    pub status: InvocationResult,
    /// Diagnostics the analyzer wrote, surfaced when it fails
    pub stderr: String,
}

impl AnalyzerRun {
    pub fn success() -> Self {
        Self {
            status: InvocationResult::Success,
            stderr: String::new(),
        }
    }

    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            status: InvocationResult::Failure(code),
            stderr: stderr.into(),
        }
    }
}

/// Capability that performs dead-code elimination for one invocation.
///
/// Implementations block until the analysis finishes. An `Err` means the
/// analysis could not be run at all; a run that happened but failed is
/// reported through [`AnalyzerRun::status`].
pub trait Analyzer {
    fn analyze(&self, args: &InvocationArguments) -> Result<AnalyzerRun>;
}

impl<A: Analyzer + ?Sized> Analyzer for &A {
    fn analyze(&self, args: &InvocationArguments) -> Result<AnalyzerRun> {
        (**self).analyze(args)
    }
}

impl<A: Analyzer + ?Sized> Analyzer for Box<A> {
    fn analyze(&self, args: &InvocationArguments) -> Result<AnalyzerRun> {
        (**self).analyze(args)
    }
}

/// Run `analyzer` and convert a non-success status into an error
pub fn invoke<A: Analyzer + ?Sized>(analyzer: &A, args: &InvocationArguments) -> Result<()> {
    let run = analyzer.analyze(args)?;
    run.status.into_result(&run.stderr)
}
