//! Scratch directory lifecycle.
//!
//! A [`ScratchSpace`] is created at the start of an invocation and removed
//! at its end. [`ScratchSpace::release`] is the normal way out and reports
//! removal errors; if the guard is dropped without being released (an early
//! return or a panic unwinding through the invocation) the directory is
//! still removed, and the failure, if any, is logged.

use crate::errors::{DceError, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Exclusively owned staging directory for one invocation
#[derive(Debug)]
pub struct ScratchSpace {
    path: PathBuf,
    released: bool,
}

impl ScratchSpace {
    /// Create the scratch directory (and parents) at `path`.
    ///
    /// A leftover directory from an interrupted run is wiped first so the
    /// invocation always starts from an empty scratch space.
    pub fn acquire(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if path.exists() {
            warn!(path = %path.display(), "Removing stale scratch directory");
            remove_dir(&path)
                .map_err(|e| DceError::io("Failed to remove stale scratch directory", &path, e))?;
        }

        fs::create_dir_all(&path)
            .map_err(|e| DceError::io("Failed to create scratch directory", &path, e))?;
        debug!(path = %path.display(), "Acquired scratch directory");

        Ok(Self {
            path,
            released: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the directory and everything in it.
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        remove_dir(&self.path)
            .map_err(|e| DceError::io("Failed to remove scratch directory", &self.path, e))?;
        debug!(path = %self.path.display(), "Released scratch directory");
        Ok(())
    }
}

impl Drop for ScratchSpace {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Err(e) = remove_dir(&self.path) {
            warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to remove scratch directory during unwind"
            );
        }
    }
}

fn remove_dir(path: &Path) -> io::Result<()> {
    match fs::remove_dir_all(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Combine the outcome of the guarded work with the outcome of cleanup.
///
/// The primary error always wins; a cleanup error only surfaces when the
/// work itself succeeded.
pub fn settle<T>(outcome: Result<T>, cleanup: Result<()>) -> Result<T> {
    match (outcome, cleanup) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(cleanup_err)) => Err(cleanup_err),
        (Err(primary), Ok(())) => Err(primary),
        (Err(primary), Err(cleanup_err)) => {
            warn!(error = %cleanup_err, "Scratch cleanup also failed");
            Err(primary)
        }
    }
}
