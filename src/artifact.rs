//! Artifact path parsing.
//!
//! An artifact path encodes everything the matrix needs:
//!
//! ```text
//! <root>/.../clang-12/5.19.0-051900-generic.o
//!            ^^^^^^^^ ^^^^^^^^^^^^^^^^^^^^^
//!            compiler kernel release (+ .o/.ko)
//! ```
//!
//! The compiler directory yields a family and a numeric version used only for
//! column ordering. The kernel file name yields the row label and a
//! (major, minor) pair used for row ordering.

use crate::core::{MatrixError, MatrixResult};
use lazy_static::lazy_static;
use regex::Regex;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

lazy_static! {
    /// Everything before a `-` followed by one or two digits.
    static ref COMPILER_FAMILY: Regex = Regex::new(r"(.*)-\d{1,2}").unwrap();

    /// First run of one or two digits.
    static ref COMPILER_NUMERIC: Regex = Regex::new(r"(\d{1,2})").unwrap();
}

/// Artifact extensions stripped from the kernel file name, checked in order.
const ARTIFACT_EXTENSIONS: [&str; 2] = [".ko", ".o"];

/// Compiler identity taken from the artifact's parent directory name.
///
/// `family` and `version` are `None` when the directory name does not have the
/// `<family>-<digits>` shape. Such rows are kept as they are and sort last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerIdentity {
    pub label: String,
    pub family: Option<String>,
    pub version: Option<u32>,
}

impl CompilerIdentity {
    pub fn parse(label: &str) -> Self {
        let family = COMPILER_FAMILY
            .captures(label)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string());
        let version = COMPILER_NUMERIC
            .captures(label)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok());

        Self {
            label: label.to_string(),
            family,
            version,
        }
    }

    /// Column order: family, then numeric version, undefined values last.
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        cmp_none_last(&self.family, &other.family)
            .then_with(|| cmp_none_last(&self.version, &other.version))
    }
}

fn cmp_none_last<T: Ord>(a: &Option<T>, b: &Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Kernel identity taken from the artifact file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelIdentity {
    /// File name without its `.ko`/`.o` extension, e.g. `5.19.0-051900-generic`.
    pub label: String,
    pub major: i64,
    pub minor: i64,
}

impl KernelIdentity {
    /// Parse a kernel artifact file name.
    ///
    /// Fails when the stripped label does not start with two `.`-separated
    /// integer segments.
    pub fn parse(file_name: &str) -> MatrixResult<Self> {
        let label = strip_artifact_extension(file_name);
        let mut segments = label.split('.');

        let major = parse_segment(label, segments.next(), "major")?;
        let minor = parse_segment(label, segments.next(), "minor")?;

        Ok(Self {
            label: label.to_string(),
            major,
            minor,
        })
    }

    /// Row order: (major, minor) ascending.
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor).cmp(&(other.major, other.minor))
    }
}

fn strip_artifact_extension(file_name: &str) -> &str {
    ARTIFACT_EXTENSIONS
        .iter()
        .find_map(|ext| file_name.strip_suffix(ext))
        .unwrap_or(file_name)
}

fn parse_segment(label: &str, segment: Option<&str>, which: &str) -> MatrixResult<i64> {
    let segment = segment.ok_or_else(|| MatrixError::KernelVersion {
        label: label.to_string(),
        reason: format!("missing {which} version segment"),
    })?;

    segment.parse().map_err(|_| MatrixError::KernelVersion {
        label: label.to_string(),
        reason: format!("{which} version '{segment}' is not an integer"),
    })
}

/// One parsed artifact: the source path plus both identities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRow {
    pub path: PathBuf,
    pub compiler: CompilerIdentity,
    pub kernel: KernelIdentity,
}

/// Parse an artifact path into its compiler and kernel identities.
pub fn parse_artifact(path: &Path) -> MatrixResult<ArtifactRow> {
    let mut components = path.components().rev();
    let (file_name, compiler_dir) = match (components.next(), components.next()) {
        (Some(file), Some(dir)) => (file.as_os_str(), dir.as_os_str()),
        _ => {
            return Err(MatrixError::MalformedPath {
                path: path.to_path_buf(),
            })
        }
    };

    let compiler = CompilerIdentity::parse(&compiler_dir.to_string_lossy());
    let kernel = KernelIdentity::parse(&file_name.to_string_lossy())?;

    log::trace!(
        "Parsed {} -> compiler {} ({:?} {:?}), kernel {} ({}.{})",
        path.display(),
        compiler.label,
        compiler.family,
        compiler.version,
        kernel.label,
        kernel.major,
        kernel.minor
    );

    Ok(ArtifactRow {
        path: path.to_path_buf(),
        compiler,
        kernel,
    })
}
