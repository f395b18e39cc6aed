//! Error types for DCE task invocations.
//!
//! Every failure an invocation can surface maps to one `DceError` variant, so
//! callers can tell extraction problems apart from analyzer failures and I/O
//! trouble without string matching.
//!
//! # Exit Codes
//!
//! The binary maps categories to process exit codes:
//! - 1: I/O and filesystem errors
//! - 2: the analyzer ran and reported failure
//! - 3: configuration errors
//! - 4: dependency archive extraction errors
//! - 5: the analyzer could not be launched
//!
//! # Example
//!
//! ```rust
//! use jsdce::errors::DceError;
//!
//! let err = DceError::analysis(2, "unresolved reference");
//! assert_eq!(err.exit_code(), 2);
//! assert_eq!(err.category(), "analysis");
//! ```

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for DCE operations
#[derive(Debug, Error)]
pub enum DceError {
    /// Unrecognised option, ill-typed value or malformed configuration file
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Scratch directory or configuration file I/O failure
    #[error("I/O error: {message} ({})", path.display())]
    Io {
        message: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A dependency archive is missing, unreadable or corrupt
    #[error("Extraction error in {}: {reason}", archive.display())]
    Extraction { archive: PathBuf, reason: String },

    /// The analyzer executable could not be found or spawned
    #[error("Failed to launch analyzer {program}: {reason}")]
    AnalyzerLaunch { program: String, reason: String },

    /// The analyzer ran and exited with a non-success status
    #[error("Analysis failed with exit code {code}{}", format_stderr(stderr))]
    Analysis { code: i32, stderr: String },
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

impl DceError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            path: None,
        }
    }

    /// Create a configuration error tied to a configuration file
    pub fn config_with_path(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Config {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Wrap an I/O error with the path it happened on
    pub fn io(message: impl Into<String>, path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create an extraction error for an archive
    pub fn extraction(archive: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::Extraction {
            archive: archive.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Create an analyzer launch error
    pub fn analyzer_launch(program: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::AnalyzerLaunch {
            program: program.into(),
            reason: reason.into(),
        }
    }

    /// Create an analysis failure carrying the analyzer's exit code
    pub fn analysis(code: i32, stderr: impl Into<String>) -> Self {
        Self::Analysis {
            code,
            stderr: stderr.into(),
        }
    }

    /// Short category name, stable for programmatic handling
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config { .. } => "config",
            Self::Io { .. } => "io",
            Self::Extraction { .. } => "extraction",
            Self::AnalyzerLaunch { .. } => "analyzer_launch",
            Self::Analysis { .. } => "analysis",
        }
    }

    /// The analyzer exit code, if this error came from a failed analysis
    #[must_use]
    pub fn analyzer_exit_code(&self) -> Option<i32> {
        match self {
            Self::Analysis { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Get the suggested process exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io { .. } => 1,             // I/O error
            Self::Analysis { .. } => 2,       // Analyzer reported failure
            Self::Config { .. } => 3,         // Configuration error
            Self::Extraction { .. } => 4,     // Broken dependency archive
            Self::AnalyzerLaunch { .. } => 5, // Analyzer missing
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, DceError>;
