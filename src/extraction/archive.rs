//! Unpacking script files from one library archive.
//!
//! A library is either a zip/jar file or an exploded directory. Only script
//! files (`.js`) and their source maps (`.js.map`) are copied; everything else
//! in the library is ignored.

use crate::errors::{DceError, Result};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Web-jar prefix stripped from entry paths
const RESOURCES_PREFIX: &str = "META-INF/resources";

/// Whether an entry name is a script file or a script source map
pub fn is_script_entry(name: &str) -> bool {
    name.ends_with(".js") || name.ends_with(".js.map")
}

/// Unpack the script entries of `archive` into `target`.
///
/// Returns the number of files written.
pub fn unpack_library(archive: &Path, target: &Path) -> Result<usize> {
    if archive.is_dir() {
        copy_from_directory(archive, target)
    } else if archive.exists() {
        unpack_zip(archive, target)
    } else {
        Err(DceError::extraction(archive, "archive does not exist"))
    }
}

fn unpack_zip(archive: &Path, target: &Path) -> Result<usize> {
    let file = fs::File::open(archive)
        .map_err(|e| DceError::extraction(archive, format!("cannot open archive: {}", e)))?;
    let mut zip = zip::ZipArchive::new(file)
        .map_err(|e| DceError::extraction(archive, format!("cannot read archive: {}", e)))?;

    let mut written = 0;
    for index in 0..zip.len() {
        let mut entry = zip
            .by_index(index)
            .map_err(|e| DceError::extraction(archive, format!("corrupt entry #{}: {}", index, e)))?;

        if entry.is_dir() || !is_script_entry(entry.name()) {
            continue;
        }

        let Some(enclosed) = entry.enclosed_name() else {
            debug!(archive = %archive.display(), entry = entry.name(), "Skipping entry outside archive root");
            continue;
        };
        let destination = target.join(library_relative_path(&enclosed));
        create_parent(&destination)?;

        let mut out = fs::File::create(&destination)
            .map_err(|e| DceError::io("Failed to create extracted file", &destination, e))?;
        io::copy(&mut entry, &mut out).map_err(|e| {
            DceError::extraction(
                archive,
                format!("cannot extract {}: {}", enclosed.display(), e),
            )
        })?;
        trace!(entry = %enclosed.display(), "Extracted");
        written += 1;
    }
    Ok(written)
}

fn copy_from_directory(library: &Path, target: &Path) -> Result<usize> {
    let mut written = 0;
    for entry in WalkDir::new(library).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            DceError::extraction(library, format!("cannot read library directory: {}", e))
        })?;
        let name = entry.file_name().to_string_lossy();
        if !entry.file_type().is_file() || !is_script_entry(&name) {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(library)
            .map_err(|e| DceError::extraction(library, e.to_string()))?;
        let destination = target.join(library_relative_path(relative));
        create_parent(&destination)?;
        fs::copy(entry.path(), &destination).map_err(|e| {
            DceError::extraction(
                library,
                format!("cannot copy {}: {}", relative.display(), e),
            )
        })?;
        written += 1;
    }
    Ok(written)
}

/// Entry path with the web-jar resources prefix removed
fn library_relative_path(entry: &Path) -> PathBuf {
    let stripped = entry.strip_prefix(RESOURCES_PREFIX).unwrap_or(entry);
    stripped
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect()
}

fn create_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) => fs::create_dir_all(parent)
            .map_err(|e| DceError::io("Failed to create extraction directory", parent, e)),
        None => Ok(()),
    }
}
