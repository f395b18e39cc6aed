//! Dependency extraction into the scratch directory.
//!
//! Each archive gets its own namespace directory, named after its position in
//! the input and its file stem (`000-kotlin`, `001-kotlinx-html-js`, ...), so
//! two libraries shipping a file with the same relative path never overwrite
//! each other. After unpacking, every namespace is scanned in sorted order,
//! giving a deterministic file sequence for the same inputs.

mod archive;

pub use archive::{is_script_entry, unpack_library};

use crate::errors::{DceError, Result};
use crate::observability::set_current_archive;
use crate::scratch::ScratchSpace;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Suffix marking a metadata companion file that holds no executable code
pub const METADATA_SUFFIX: &str = ".meta.js";

/// Script file discovered in the scratch directory after extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedLibraryFile {
    pub path: PathBuf,
    pub is_metadata_only: bool,
}

impl ExtractedLibraryFile {
    /// Classify a script file by its name
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let is_metadata_only = path
            .file_name()
            .map(|name| name.to_string_lossy().ends_with(METADATA_SUFFIX))
            .unwrap_or(false);
        Self {
            path,
            is_metadata_only,
        }
    }
}

/// Extract every archive, in order, into `scratch`.
///
/// Returns all script files found, metadata companions included and flagged;
/// the input assembler drops the flagged ones. A missing or corrupt archive
/// aborts the whole extraction.
pub fn extract(archives: &[PathBuf], scratch: &ScratchSpace) -> Result<Vec<ExtractedLibraryFile>> {
    let mut files = Vec::new();

    for (index, archive) in archives.iter().enumerate() {
        let _archive = set_current_archive(archive);
        let namespace = scratch.path().join(namespace_dir_name(index, archive));

        let written = unpack_library(archive, &namespace)?;
        let found = scan_script_files(&namespace)?;
        debug!(
            archive = %archive.display(),
            written,
            scripts = found.len(),
            "Extracted library"
        );
        files.extend(found);
    }

    Ok(files)
}

/// Namespace directory for the archive at `index`
pub fn namespace_dir_name(index: usize, archive: &Path) -> String {
    let stem = archive
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "library".to_string());
    let sanitized: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{:03}-{}", index, sanitized)
}

/// Recursively list `.js` files under `dir` in sorted order.
///
/// A missing directory (an archive without script entries) yields nothing;
/// any entry that cannot be read fails the scan.
pub fn scan_script_files(dir: &Path) -> Result<Vec<ExtractedLibraryFile>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| scan_error(dir, e))?;
        if entry.file_type().is_file() && entry.file_name().to_string_lossy().ends_with(".js") {
            files.push(ExtractedLibraryFile::from_path(entry.into_path()));
        }
    }
    Ok(files)
}

fn scan_error(dir: &Path, err: walkdir::Error) -> DceError {
    let path = err.path().unwrap_or(dir).to_path_buf();
    DceError::io("Failed to scan extracted library files", path, err.into())
}
