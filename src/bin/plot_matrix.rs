//! Compatibility matrix plot binary.
//!
//! ```text
//! plot-matrix --driver-artifacts-dir=/vm/build/driver_ok \
//!     --save-png=/vm/build/driver_compat_matrix_success.png \
//!     --title="Driver kernel compat matrix [compiled + success]" \
//!     --hex-color="#3074EC"
//! ```

use clap::Parser;
use env_logger::Env;
use kmod_compat::{run, ListingOptions, MatrixError, PlotRequest, DEFAULT_EXCLUDE_MARKER};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "plot-matrix")]
#[command(about = "Render a kernel x compiler driver compatibility matrix as a heatmap")]
struct Args {
    /// Directory that contains subfolders by compiler version that contain the driver build artifacts
    #[arg(long)]
    driver_artifacts_dir: PathBuf,

    /// Plot output file path
    #[arg(long)]
    save_png: PathBuf,

    /// Title of the output plot
    #[arg(long)]
    title: String,

    /// Hex color reflecting success in the output plot, e.g. #3074EC
    #[arg(long)]
    hex_color: String,

    /// Skip files whose name contains this marker
    #[arg(long, default_value = DEFAULT_EXCLUDE_MARKER)]
    exclude_marker: String,

    /// Also print the matrix as a text table
    #[arg(long, default_value_t = false)]
    print_matrix: bool,
}

impl Args {
    fn into_request(self) -> (PlotRequest, bool) {
        let request = PlotRequest {
            artifacts_dir: self.driver_artifacts_dir,
            output: self.save_png,
            title: self.title,
            hex_color: self.hex_color,
            listing: ListingOptions {
                exclude_marker: self.exclude_marker,
            },
        };
        (request, self.print_matrix)
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let (request, print_matrix) = Args::parse().into_request();
    match run(&request) {
        Ok(matrix) => {
            if print_matrix {
                print!("{matrix}");
            }
            ExitCode::SUCCESS
        }
        // A missing artifact directory ends the run without any output.
        Err(MatrixError::MissingDirectory { .. }) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
