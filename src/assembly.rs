//! Input assembly: the ordered list of files handed to the analyzer.

use crate::extraction::ExtractedLibraryFile;
use std::path::PathBuf;

/// Declared sources in declaration order, then extracted library files in
/// extraction order, minus metadata-only companions.
///
/// Declared sources are passed through untouched, even if their names look
/// like metadata files; only extracted files are filtered.
pub fn assemble(declared: &[PathBuf], extracted: &[ExtractedLibraryFile]) -> Vec<PathBuf> {
    declared
        .iter()
        .cloned()
        .chain(
            extracted
                .iter()
                .filter(|file| !file.is_metadata_only)
                .map(|file| file.path.clone()),
        )
        .collect()
}
