// Export modules for library usage
pub mod analyzer;
pub mod arguments;
pub mod assembly;
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod extraction;
pub mod observability;
pub mod scratch;
pub mod task;

// Re-export commonly used types
pub use crate::analyzer::{Analyzer, AnalyzerRun, InvocationResult, ProcessAnalyzer};
pub use crate::arguments::InvocationArguments;
pub use crate::config::{AnalyzerCommand, AnalyzerOptions, OverwritingStrategy, TaskConfig};
pub use crate::errors::{DceError, Result};
pub use crate::extraction::ExtractedLibraryFile;
pub use crate::scratch::ScratchSpace;
pub use crate::task::{run_task, DceOutcome, DceReport, DceTask};
