use std::fs;
use std::path::{Path, PathBuf};

use super::core::{TaskConfig, TaskConfigFile};
use crate::errors::{DceError, Result};

/// File name searched for when no configuration path is given
pub const DEFAULT_CONFIG_FILE: &str = "jsdce.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Parse a TOML task configuration, resolving relative paths against `base_dir`
pub fn parse_task_config(contents: &str, base_dir: &Path) -> Result<TaskConfig> {
    let file = toml::from_str::<TaskConfigFile>(contents)
        .map_err(|e| DceError::config(format!("Failed to parse task configuration: {}", e)))?;
    file.into_task_config(base_dir)
}

/// Load a task configuration from an explicit path
pub fn load_task_config(path: &Path) -> Result<TaskConfig> {
    let contents = fs::read_to_string(path)
        .map_err(|e| DceError::io("Failed to read task configuration", path, e))?;

    let base_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let config = parse_task_config(&contents, &base_dir).map_err(|e| match e {
        DceError::Config { message, .. } => DceError::config_with_path(message, path),
        other => other,
    })?;
    log::debug!("Loaded task configuration from {}", path.display());
    Ok(config)
}

/// Generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for a `jsdce.toml`
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let found = directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(DEFAULT_CONFIG_FILE))
        .find(|candidate| candidate.is_file());

    if found.is_none() {
        log::debug!(
            "No {} found after checking {} directories",
            DEFAULT_CONFIG_FILE,
            MAX_TRAVERSAL_DEPTH
        );
    }
    found
}

/// Load the explicit configuration, or discover one from the current directory
pub fn load_config(explicit: Option<&Path>) -> Result<TaskConfig> {
    if let Some(path) = explicit {
        return load_task_config(path);
    }

    let current = std::env::current_dir()
        .map_err(|e| DceError::io("Failed to get current directory", ".", e))?;

    match find_config_file(&current) {
        Some(path) => load_task_config(&path),
        None => Err(DceError::config(format!(
            "No {} found in {} or its parents; pass --config or run `jsdce init`",
            DEFAULT_CONFIG_FILE,
            current.display()
        ))),
    }
}

/// Starter configuration written by `jsdce init`
pub fn default_config_template() -> &'static str {
    r#"# jsdce task configuration

enabled = true
destination_dir = "build/dce"

# Compiled script files produced by this module
source_files = []

# Library archives (jar/zip or exploded directories) with embedded .js files
dependency_archives = []

# Fully-qualified declarations that must never be eliminated
keep = []

[analyzer]
command = ["kotlin-dce-js"]

[analyzer.options]
dev_mode = false
print_reachability_info = false
"#
}
