// This module defines error types for the compatibility matrix pipeline using the thiserror
// crate for idiomatic Rust error handling. MatrixError is the main error enum covering the
// failure scenarios of every stage: a missing or empty artifact directory, walk failures,
// artifact paths too short to carry a compiler directory, kernel file names that do not
// parse into a major/minor version, unparsable hex colors, and drawing or encoding failures
// in the renderer. Each variant carries the offending path, label or value so the binary can
// print a message the operator can act on. The module also provides MatrixResult<T> as a
// convenience alias for Result<T, MatrixError>.

//! Error types for the compatibility matrix pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for listing, table construction and rendering.
#[derive(Error, Debug)]
pub enum MatrixError {
    /// The artifact root does not exist. The binary exits silently on this one.
    #[error("Directory {} does not exist", path.display())]
    MissingDirectory {
        path: PathBuf,
    },

    #[error("[Error] Directory {} is empty", path.display())]
    EmptyDirectory {
        path: PathBuf,
    },

    #[error("Failed to walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Artifact path {} has no compiler directory", path.display())]
    MalformedPath {
        path: PathBuf,
    },

    #[error("Invalid kernel version '{label}': {reason}")]
    KernelVersion {
        label: String,
        reason: String,
    },

    #[error("Invalid hex color '{value}'")]
    InvalidColor {
        value: String,
    },

    #[error("Cannot render an empty matrix")]
    EmptyMatrix,

    #[error("Rendering failed: {reason}")]
    Render {
        reason: String,
    },
}

/// Result type alias for matrix operations.
pub type MatrixResult<T> = Result<T, MatrixError>;
