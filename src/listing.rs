//! Artifact listing.
//!
//! Recursively enumerates the files under the artifact root. Files whose name
//! contains the exclusion marker (macOS `.DS_Store` by default) are skipped.
//! The walk is sorted by file name so repeated runs over the same tree see the
//! same listing order, which the table builder's duplicate handling depends on.

use crate::core::{MatrixError, MatrixResult};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File-name substring marking OS metadata files.
pub const DEFAULT_EXCLUDE_MARKER: &str = ".DS";

/// Options controlling which files the listing keeps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingOptions {
    /// Files whose name contains this substring are skipped. Empty disables exclusion.
    pub exclude_marker: String,
}

impl Default for ListingOptions {
    fn default() -> Self {
        Self {
            exclude_marker: DEFAULT_EXCLUDE_MARKER.to_string(),
        }
    }
}

impl ListingOptions {
    fn excludes(&self, file_name: &str) -> bool {
        !self.exclude_marker.is_empty() && file_name.contains(&self.exclude_marker)
    }
}

/// List every artifact file below `root`.
///
/// Returns [`MatrixError::MissingDirectory`] when `root` does not exist and
/// [`MatrixError::EmptyDirectory`] when nothing is left after exclusion.
pub fn list_artifacts(root: &Path, options: &ListingOptions) -> MatrixResult<Vec<PathBuf>> {
    if !root.exists() {
        log::debug!("Artifact directory {} does not exist", root.display());
        return Err(MatrixError::MissingDirectory {
            path: root.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|source| {
            let path = source
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf());
            MatrixError::Walk { path, source }
        })?;

        // Symlinked directories are not descended into, but they are not files either.
        let is_dir = entry.file_type().is_dir()
            || (entry.path_is_symlink() && entry.path().is_dir());
        if is_dir {
            continue;
        }

        if options.excludes(&entry.file_name().to_string_lossy()) {
            log::trace!("Skipping metadata file {}", entry.path().display());
            continue;
        }

        files.push(entry.into_path());
    }

    if files.is_empty() {
        return Err(MatrixError::EmptyDirectory {
            path: root.to_path_buf(),
        });
    }

    log::info!("Found {} artifacts under {}", files.len(), root.display());
    Ok(files)
}
