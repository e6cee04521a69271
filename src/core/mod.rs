//! Shared infrastructure for the pipeline stages.
//!
//! Currently this is only the error model; every stage returns
//! [`MatrixResult`] and leaves the exit policy to the binary.

pub mod error;

pub use error::{MatrixError, MatrixResult};
