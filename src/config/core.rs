use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::options::{AnalyzerOptions, OptionValue};
use crate::arguments::KEEP_SEPARATOR;
use crate::errors::{DceError, Result};

/// Executable used when the configuration names none
pub const DEFAULT_ANALYZER_PROGRAM: &str = "kotlin-dce-js";

/// Name of the scratch subdirectory created under the destination directory
pub const SCRATCH_DIR_NAME: &str = "js-dependencies";

/// Command line used to start the external analyzer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyzerCommand {
    /// Executable name (looked up on `PATH`) or path
    pub program: PathBuf,
    /// Arguments placed before the rendered invocation arguments
    pub leading_args: Vec<String>,
}

impl AnalyzerCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    /// Build from a `[program, args...]` list
    pub fn from_parts(parts: &[String]) -> Result<Self> {
        match parts.split_first() {
            Some((program, rest)) if !program.trim().is_empty() => Ok(Self {
                program: PathBuf::from(program),
                leading_args: rest.to_vec(),
            }),
            _ => Err(DceError::config("analyzer command must name a program")),
        }
    }

    /// Whether the program is a bare name to be searched on `PATH`
    pub fn is_bare_name(&self) -> bool {
        !self.program.is_absolute() && self.program.components().count() == 1
    }

    /// Anchor a relative program path at `base_dir`; bare names are left alone
    fn resolved_against(mut self, base_dir: &Path) -> Self {
        if !self.is_bare_name() {
            self.program = resolve_path(base_dir, self.program);
        }
        self
    }
}

impl Default for AnalyzerCommand {
    fn default() -> Self {
        Self::new(DEFAULT_ANALYZER_PROGRAM)
    }
}

/// One DCE task: what to reduce, where to put it, and what must survive.
///
/// Owned by the invoking build system and read once per invocation. The
/// keep-list is appended to with [`TaskConfig::keep`] before the task runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskConfig {
    /// Skip the invocation entirely when false
    pub enabled: bool,
    /// Output directory for the reduced files
    pub destination_dir: PathBuf,
    /// Compiled script files declared by the task, in declaration order
    pub source_files: Vec<PathBuf>,
    /// Library archives whose embedded script files join the input
    pub dependency_archives: Vec<PathBuf>,
    /// Validated analyzer options
    pub analyzer_options: AnalyzerOptions,
    /// External analyzer command
    pub analyzer: AnalyzerCommand,
    keep: Vec<String>,
}

impl TaskConfig {
    /// Create an enabled task writing into `destination_dir`
    pub fn new(destination_dir: impl Into<PathBuf>) -> Self {
        Self {
            enabled: true,
            destination_dir: destination_dir.into(),
            source_files: Vec::new(),
            dependency_archives: Vec::new(),
            analyzer_options: AnalyzerOptions::default(),
            analyzer: AnalyzerCommand::default(),
            keep: Vec::new(),
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_source_files(mut self, files: Vec<PathBuf>) -> Self {
        self.source_files = files;
        self
    }

    pub fn with_dependency_archives(mut self, archives: Vec<PathBuf>) -> Self {
        self.dependency_archives = archives;
        self
    }

    pub fn with_analyzer_options(mut self, options: AnalyzerOptions) -> Self {
        self.analyzer_options = options;
        self
    }

    pub fn with_analyzer(mut self, analyzer: AnalyzerCommand) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// Append fully-qualified names to the keep-list.
    ///
    /// Order is preserved and duplicates are kept.
    pub fn keep<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keep.extend(names.into_iter().map(Into::into));
        self
    }

    /// Declarations that must never be eliminated
    pub fn keep_list(&self) -> &[String] {
        &self.keep
    }

    /// Scratch directory derived from the destination directory
    pub fn scratch_dir(&self) -> PathBuf {
        self.destination_dir.join(SCRATCH_DIR_NAME)
    }

    /// Check the task before anything touches the filesystem
    pub fn validate(&self) -> Result<()> {
        if self.destination_dir.as_os_str().is_empty() {
            return Err(DceError::config("destination_dir must not be empty"));
        }
        if let Some(blank) = self.keep.iter().find(|name| name.trim().is_empty()) {
            return Err(DceError::config(format!(
                "keep-list entries must be fully-qualified names, got {:?}",
                blank
            )));
        }
        if let Some(joined) = self.keep.iter().find(|name| name.contains(KEEP_SEPARATOR)) {
            return Err(DceError::config(format!(
                "keep-list entry {:?} contains {:?}; add each name separately",
                joined, KEEP_SEPARATOR
            )));
        }
        self.analyzer_options.validate()
    }
}

/// On-disk form of a task configuration (`jsdce.toml`)
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskConfigFile {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub destination_dir: PathBuf,
    #[serde(default)]
    pub source_files: Vec<PathBuf>,
    #[serde(default)]
    pub dependency_archives: Vec<PathBuf>,
    #[serde(default)]
    pub keep: Vec<String>,
    #[serde(default)]
    pub analyzer: AnalyzerSection,
}

/// `[analyzer]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalyzerSection {
    #[serde(default)]
    pub command: Option<Vec<String>>,
    #[serde(default)]
    pub options: BTreeMap<String, OptionValue>,
}

fn default_enabled() -> bool {
    true
}

impl TaskConfigFile {
    /// Validate and resolve into a task, anchoring relative paths at `base_dir`
    pub fn into_task_config(self, base_dir: &Path) -> Result<TaskConfig> {
        let analyzer_options = AnalyzerOptions::from_map(&self.analyzer.options)?;
        let analyzer = match &self.analyzer.command {
            Some(parts) => AnalyzerCommand::from_parts(parts)?.resolved_against(base_dir),
            None => AnalyzerCommand::default(),
        };

        let resolve = |path: PathBuf| resolve_path(base_dir, path);

        let mut config = TaskConfig::new(resolve(self.destination_dir))
            .with_enabled(self.enabled)
            .with_source_files(self.source_files.into_iter().map(resolve).collect())
            .with_dependency_archives(self.dependency_archives.into_iter().map(resolve).collect())
            .with_analyzer_options(analyzer_options)
            .with_analyzer(analyzer);
        config.keep(self.keep);
        Ok(config)
    }
}

fn resolve_path(base_dir: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base_dir.join(path)
    }
}
