//! kmod-compat - kernel driver compatibility matrix plots.
//!
//! Scans a tree of driver build artifacts organized as
//! `<compiler>-<version>/<kernel release>.{o,ko}` and renders which
//! (kernel, compiler) pairs produced an artifact as a two-color heatmap.
//!
//! # Primary Usage
//!
//! ```ignore
//! use kmod_compat::{build_matrix, save_compatibility_plot, ListingOptions};
//! use std::path::Path;
//!
//! let matrix = build_matrix(Path::new("/vm/build/driver_ok"), &ListingOptions::default())?;
//! save_compatibility_plot(&matrix, Path::new("matrix.png"), "Driver compat", "#3074EC")?;
//! ```
//!
//! # Architecture
//!
//! - [`listing`] - recursive artifact enumeration
//! - [`artifact`] - compiler and kernel identities parsed from a path
//! - [`table`] - join/pivot into the dense [`CompatMatrix`]
//! - [`render`] - heatmap rasterization
//! - [`pipeline`] - the three stages chained for one run
//! - [`core`] - shared error model

pub mod core;
pub mod listing;
pub mod artifact;
pub mod table;
pub mod render;
pub mod pipeline;

pub use self::core::{MatrixError, MatrixResult};
pub use listing::{list_artifacts, ListingOptions, DEFAULT_EXCLUDE_MARKER};
pub use artifact::{parse_artifact, ArtifactRow, CompilerIdentity, KernelIdentity};
pub use table::{CompatMatrix, ABSENT, PRESENT};
pub use render::{render_heatmap, save_compatibility_plot, Palette, PlotStyle};
pub use pipeline::{build_matrix, run, PlotRequest};
