//! End-to-end pipeline: listing, table construction, rendering.

use crate::core::MatrixResult;
use crate::listing::{list_artifacts, ListingOptions};
use crate::render::save_compatibility_plot;
use crate::table::CompatMatrix;
use std::path::{Path, PathBuf};

/// Everything one plot run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotRequest {
    pub artifacts_dir: PathBuf,
    pub output: PathBuf,
    pub title: String,
    pub hex_color: String,
    pub listing: ListingOptions,
}

/// List `root` and pivot the listing into a matrix.
pub fn build_matrix(root: &Path, options: &ListingOptions) -> MatrixResult<CompatMatrix> {
    let artifacts = list_artifacts(root, options)?;
    let matrix = CompatMatrix::from_artifacts(&artifacts)?;

    let (rows, cols) = matrix.dimensions();
    log::info!(
        "Built {}x{} compatibility matrix, {} of {} cells present",
        rows,
        cols,
        matrix.success_count(),
        rows * cols
    );
    Ok(matrix)
}

/// Build the matrix and save the plot. Returns the matrix for callers that print it.
pub fn run(request: &PlotRequest) -> MatrixResult<CompatMatrix> {
    let matrix = build_matrix(&request.artifacts_dir, &request.listing)?;
    save_compatibility_plot(&matrix, &request.output, &request.title, &request.hex_color)?;
    Ok(matrix)
}
