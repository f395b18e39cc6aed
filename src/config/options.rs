//! Analyzer option mapping and its validated form.
//!
//! Options arrive as a loose `name -> value` mapping (from the TOML file or
//! a caller building a task programmatically). [`AnalyzerOptions::from_map`]
//! checks every key and value up front and reports all problems at once, so
//! a misconfigured task fails before anything touches the filesystem.

use crate::errors::{DceError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Raw option value as written in configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Text(String),
    List(Vec<String>),
}

impl OptionValue {
    fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "a boolean",
            Self::Text(_) => "a string",
            Self::List(_) => "a list of strings",
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// How dev mode treats files already present in the output directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverwritingStrategy {
    /// Overwrite only when the existing file is older than the input
    Older,
    /// Always overwrite
    Always,
}

impl OverwritingStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Older => "older",
            Self::Always => "always",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "older" => Some(Self::Older),
            "always" => Some(Self::Always),
            _ => None,
        }
    }
}

impl fmt::Display for OverwritingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Option keys the analyzer understands, in rendering order
pub const RECOGNIZED_OPTIONS: &[&str] = &[
    "verbose",
    "suppress_warnings",
    "all_warnings_as_errors",
    "print_reachability_info",
    "dev_mode",
    "dev_mode_overwriting_strategy",
    "free_args",
];

/// Validated analyzer options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalyzerOptions {
    /// Ask the analyzer for verbose output
    pub verbose: bool,
    /// Suppress analyzer warnings
    pub suppress_warnings: bool,
    /// Treat analyzer warnings as errors
    pub all_warnings_as_errors: bool,
    /// Print the declarations found reachable
    pub print_reachability_info: bool,
    /// Copy inputs without eliminating anything
    pub dev_mode: bool,
    /// Overwrite policy for dev mode; only meaningful with `dev_mode`
    pub dev_mode_overwriting_strategy: Option<OverwritingStrategy>,
    /// Extra arguments passed through untouched
    pub free_args: Vec<String>,
}

impl AnalyzerOptions {
    /// Validate a raw option mapping.
    ///
    /// Every unrecognised key, ill-typed value and inconsistent combination
    /// is collected into a single configuration error.
    pub fn from_map(map: &BTreeMap<String, OptionValue>) -> Result<Self> {
        let mut options = Self::default();
        let mut errors = Vec::new();

        for (key, value) in map {
            if let Err(message) = options.apply(key, value) {
                errors.push(message);
            }
        }

        if let Err(message) = options.check_consistency() {
            errors.push(message);
        }

        if errors.is_empty() {
            Ok(options)
        } else {
            Err(DceError::config(summarize_errors(&errors)))
        }
    }

    /// Check combinations of options that are invalid together
    pub fn validate(&self) -> Result<()> {
        self.check_consistency().map_err(DceError::config)
    }

    fn apply(&mut self, key: &str, value: &OptionValue) -> std::result::Result<(), String> {
        match key {
            "verbose" => self.verbose = expect_bool(key, value)?,
            "suppress_warnings" => self.suppress_warnings = expect_bool(key, value)?,
            "all_warnings_as_errors" => self.all_warnings_as_errors = expect_bool(key, value)?,
            "print_reachability_info" => self.print_reachability_info = expect_bool(key, value)?,
            "dev_mode" => self.dev_mode = expect_bool(key, value)?,
            "dev_mode_overwriting_strategy" => {
                let text = expect_text(key, value)?;
                let strategy = OverwritingStrategy::parse(text).ok_or_else(|| {
                    format!(
                        "option `{}` must be \"older\" or \"always\", got \"{}\"",
                        key, text
                    )
                })?;
                self.dev_mode_overwriting_strategy = Some(strategy);
            }
            "free_args" => self.free_args = expect_list(key, value)?.to_vec(),
            _ => {
                return Err(format!(
                    "unrecognised analyzer option `{}` (expected one of: {})",
                    key,
                    RECOGNIZED_OPTIONS.join(", ")
                ))
            }
        }
        Ok(())
    }

    fn check_consistency(&self) -> std::result::Result<(), String> {
        if self.dev_mode_overwriting_strategy.is_some() && !self.dev_mode {
            return Err(
                "option `dev_mode_overwriting_strategy` requires `dev_mode = true`".to_string(),
            );
        }
        if self.suppress_warnings && self.all_warnings_as_errors {
            return Err(
                "options `suppress_warnings` and `all_warnings_as_errors` are mutually exclusive"
                    .to_string(),
            );
        }
        Ok(())
    }
}

fn expect_bool(key: &str, value: &OptionValue) -> std::result::Result<bool, String> {
    match value {
        OptionValue::Bool(b) => Ok(*b),
        other => Err(type_mismatch(key, "a boolean", other)),
    }
}

fn expect_text<'a>(key: &str, value: &'a OptionValue) -> std::result::Result<&'a str, String> {
    match value {
        OptionValue::Text(s) => Ok(s),
        other => Err(type_mismatch(key, "a string", other)),
    }
}

fn expect_list<'a>(key: &str, value: &'a OptionValue) -> std::result::Result<&'a [String], String> {
    match value {
        OptionValue::List(items) => Ok(items),
        other => Err(type_mismatch(key, "a list of strings", other)),
    }
}

fn type_mismatch(key: &str, expected: &str, actual: &OptionValue) -> String {
    format!(
        "option `{}` expects {}, got {}",
        key,
        expected,
        actual.kind()
    )
}

fn summarize_errors(errors: &[String]) -> String {
    match errors {
        [single] => single.clone(),
        many => format!(
            "{} invalid analyzer options: {}",
            many.len(),
            many.join("; ")
        ),
    }
}
