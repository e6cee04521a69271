// This module builds the compatibility matrix from a listing of artifact paths. It parses
// every path into an ArtifactRow, derives the sorted and de-duplicated kernel and compiler
// label lists, joins the observed artifacts onto the full kernel x compiler product, turns
// each joined row into a binary success indicator, and pivots the result into a dense
// row-major matrix whose row and column order is exactly the two label lists. The join and
// pivot are plain map construction: an index from (kernel label, compiler label) to the
// artifact paths observed for that pair, and a pivot map from the same key to the indicator.

//! Compatibility matrix construction.

use crate::artifact::{parse_artifact, ArtifactRow};
use crate::core::MatrixResult;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::path::Path;

/// Cell value for a (kernel, compiler) pair with a build artifact.
pub const PRESENT: u8 = 100;

/// Cell value for a pair without one.
pub const ABSENT: u8 = 0;

/// Path representation used for universe cells no artifact joined onto.
const FILL_PLACEHOLDER: &str = "0";

/// One row of the outer join between the label universe and the parsed artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
struct JoinedRow<'a> {
    kernel: &'a str,
    compiler: &'a str,
    path: Option<&'a Path>,
}

impl JoinedRow<'_> {
    /// 100 when a real path joined onto this cell, 0 for the fill placeholder.
    fn indicator(&self) -> u8 {
        let repr = match self.path {
            Some(path) => path.display().to_string(),
            None => FILL_PLACEHOLDER.to_string(),
        };
        if repr.chars().count() > 1 {
            PRESENT
        } else {
            ABSENT
        }
    }
}

/// Dense kernel x compiler success matrix.
///
/// Rows follow the kernel label list sorted by (major, minor), columns the
/// compiler label list sorted by (family, numeric version). Every cell is
/// either [`PRESENT`] or [`ABSENT`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatMatrix {
    kernels: Vec<String>,
    compilers: Vec<String>,
    /// Row-major, `kernels.len() * compilers.len()` entries.
    cells: Vec<u8>,
}

impl CompatMatrix {
    /// Parse a listing and build the matrix. Any unparsable path aborts.
    pub fn from_artifacts<P: AsRef<Path>>(paths: &[P]) -> MatrixResult<Self> {
        let rows = paths
            .iter()
            .map(|path| parse_artifact(path.as_ref()))
            .collect::<MatrixResult<Vec<_>>>()?;
        Ok(Self::from_rows(rows))
    }

    /// Build the matrix from already parsed rows, in listing order.
    pub fn from_rows(mut rows: Vec<ArtifactRow>) -> Self {
        // Both sorts are stable; ties keep listing order, which decides the
        // survivor of a duplicated label below.
        rows.sort_by(|a, b| a.kernel.sort_cmp(&b.kernel));
        let kernels = dedup_keep_last(rows.iter().map(|row| row.kernel.label.as_str()));

        let mut by_compiler: Vec<&ArtifactRow> = rows.iter().collect();
        by_compiler.sort_by(|a, b| a.compiler.sort_cmp(&b.compiler));
        let compilers = dedup_keep_last(by_compiler.iter().map(|row| row.compiler.label.as_str()));

        log::debug!(
            "{} kernel labels, {} compiler labels from {} artifacts",
            kernels.len(),
            compilers.len(),
            rows.len()
        );

        let mut joined = outer_join(&kernels, &compilers, &rows);
        joined.sort_by(|a, b| (a.kernel, a.compiler).cmp(&(b.kernel, b.compiler)));

        let mut pivot: BTreeMap<(&str, &str), u8> = BTreeMap::new();
        for row in &joined {
            let value = row.indicator();
            pivot
                .entry((row.kernel, row.compiler))
                .and_modify(|existing| {
                    log::warn!(
                        "Multiple artifacts for kernel {} and compiler {}",
                        row.kernel,
                        row.compiler
                    );
                    *existing = (*existing).max(value);
                })
                .or_insert(value);
        }

        // Reindex onto the label lists so the result is dense and canonically ordered.
        let mut cells = Vec::with_capacity(kernels.len() * compilers.len());
        for kernel in &kernels {
            for compiler in &compilers {
                let value = pivot.get(&(kernel.as_str(), compiler.as_str()));
                cells.push(value.copied().unwrap_or(ABSENT));
            }
        }

        Self {
            kernels,
            compilers,
            cells,
        }
    }

    /// Row labels.
    pub fn kernels(&self) -> &[String] {
        &self.kernels
    }

    /// Column labels.
    pub fn compilers(&self) -> &[String] {
        &self.compilers
    }

    /// (rows, columns)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.kernels.len(), self.compilers.len())
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at `row`, `col`, or `None` when out of range.
    pub fn value(&self, row: usize, col: usize) -> Option<u8> {
        if row >= self.kernels.len() || col >= self.compilers.len() {
            return None;
        }
        self.cells.get(row * self.compilers.len() + col).copied()
    }

    /// Cell for a kernel label and a compiler label.
    pub fn get(&self, kernel: &str, compiler: &str) -> Option<u8> {
        let row = self.kernels.iter().position(|k| k == kernel)?;
        let col = self.compilers.iter().position(|c| c == compiler)?;
        self.value(row, col)
    }

    /// Rows in order, each as its kernel label and cell values.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.kernels
            .iter()
            .map(String::as_str)
            .zip(self.cells.chunks(self.compilers.len().max(1)))
    }

    /// Number of cells with an artifact.
    pub fn success_count(&self) -> usize {
        self.cells.iter().filter(|&&value| value == PRESENT).count()
    }
}

impl fmt::Display for CompatMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label_width = self
            .kernels
            .iter()
            .map(|k| k.chars().count())
            .chain(std::iter::once("kernel".len()))
            .max()
            .unwrap_or(0);
        let widths: Vec<usize> = self
            .compilers
            .iter()
            .map(|c| c.chars().count().max(3))
            .collect();

        write!(f, "{:<label_width$}", "kernel")?;
        for (compiler, &width) in self.compilers.iter().zip(&widths) {
            write!(f, "  {compiler:>width$}")?;
        }
        writeln!(f)?;

        for (kernel, values) in self.rows() {
            write!(f, "{kernel:<label_width$}")?;
            for (value, &width) in values.iter().zip(&widths) {
                write!(f, "  {value:>width$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Distinct labels in order, each kept at the position of its last occurrence.
fn dedup_keep_last<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<String> {
    let labels: Vec<&str> = labels.collect();
    let mut seen = HashSet::new();
    let mut kept: Vec<String> = labels
        .iter()
        .rev()
        .filter(|label| seen.insert(**label))
        .map(|label| label.to_string())
        .collect();
    kept.reverse();
    kept
}

/// Join the parsed rows onto every (kernel, compiler) pair of the label lists.
///
/// Pairs without an artifact produce one row with no path. Pairs with several
/// artifacts produce one row per artifact.
fn outer_join<'a>(
    kernels: &'a [String],
    compilers: &'a [String],
    rows: &'a [ArtifactRow],
) -> Vec<JoinedRow<'a>> {
    let mut observed: HashMap<(&str, &str), Vec<&Path>> = HashMap::new();
    for row in rows {
        observed
            .entry((row.kernel.label.as_str(), row.compiler.label.as_str()))
            .or_default()
            .push(row.path.as_path());
    }

    let mut joined = Vec::with_capacity(kernels.len() * compilers.len());
    for kernel in kernels {
        for compiler in compilers {
            match observed.get(&(kernel.as_str(), compiler.as_str())) {
                Some(paths) => joined.extend(paths.iter().map(|&path| JoinedRow {
                    kernel: kernel.as_str(),
                    compiler: compiler.as_str(),
                    path: Some(path),
                })),
                None => joined.push(JoinedRow {
                    kernel: kernel.as_str(),
                    compiler: compiler.as_str(),
                    path: None,
                }),
            }
        }
    }
    joined
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(paths: &[&str]) -> CompatMatrix {
        CompatMatrix::from_artifacts(paths).unwrap()
    }

    #[test]
    fn test_dedup_keeps_last_occurrence() {
        let labels = ["a", "b", "a", "c", "b"];
        assert_eq!(dedup_keep_last(labels.into_iter()), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_diagonal_matrix() {
        let m = matrix(&["/root/clang-12/5.19.0.o", "/root/gcc-9/5.4.228.ko"]);

        assert_eq!(m.kernels(), ["5.4.228", "5.19.0"]);
        assert_eq!(m.compilers(), ["clang-12", "gcc-9"]);
        assert_eq!(m.get("5.19.0", "clang-12"), Some(PRESENT));
        assert_eq!(m.get("5.4.228", "gcc-9"), Some(PRESENT));
        assert_eq!(m.get("5.19.0", "gcc-9"), Some(ABSENT));
        assert_eq!(m.get("5.4.228", "clang-12"), Some(ABSENT));
        assert_eq!(m.success_count(), 2);
    }

    #[test]
    fn test_kernels_sort_numerically() {
        let m = matrix(&[
            "/r/gcc-9/5.10.0.ko",
            "/r/gcc-9/4.19.0.ko",
            "/r/gcc-9/5.4.0.ko",
            "/r/gcc-9/6.1.0.ko",
        ]);
        assert_eq!(m.kernels(), ["4.19.0", "5.4.0", "5.10.0", "6.1.0"]);
    }

    #[test]
    fn test_compilers_sort_by_family_then_version() {
        let m = matrix(&[
            "/r/gcc-12/5.4.0.ko",
            "/r/clang-14/5.4.0.o",
            "/r/gcc-9/5.4.0.ko",
            "/r/clang-7/5.4.0.o",
        ]);
        assert_eq!(m.compilers(), ["clang-7", "clang-14", "gcc-9", "gcc-12"]);
        assert_eq!(m.success_count(), 4);
    }

    #[test]
    fn test_unversioned_compiler_sorts_last() {
        let m = matrix(&["/r/icc/5.4.0.o", "/r/gcc-9/5.4.0.ko"]);
        assert_eq!(m.compilers(), ["gcc-9", "icc"]);
    }

    #[test]
    fn test_same_key_labels_keep_last_occurrence() {
        // 5.4.0 and 5.4.1 share (5, 4). After the stable sort the listing
        // order is 5.4.0, 5.4.1, 5.4.0, so 5.4.1 comes first.
        let m = matrix(&[
            "/r/gcc-9/5.4.0.ko",
            "/r/gcc-9/5.4.1.ko",
            "/r/clang-12/5.4.0.o",
        ]);
        assert_eq!(m.kernels(), ["5.4.1", "5.4.0"]);
    }

    #[test]
    fn test_duplicate_artifacts_collapse_to_one_cell() {
        let m = matrix(&["/r/gcc-9/5.4.0.ko", "/r/gcc-9/5.4.0.o"]);
        assert_eq!(m.dimensions(), (1, 1));
        assert_eq!(m.value(0, 0), Some(PRESENT));
    }

    #[test]
    fn test_value_out_of_range() {
        let m = matrix(&["/r/gcc-9/5.4.0.ko"]);
        assert_eq!(m.value(1, 0), None);
        assert_eq!(m.value(0, 1), None);
        assert_eq!(m.get("6.1.0", "gcc-9"), None);
    }

    #[test]
    fn test_placeholder_indicator() {
        let absent = JoinedRow {
            kernel: "5.4.0",
            compiler: "gcc-9",
            path: None,
        };
        assert_eq!(absent.indicator(), ABSENT);

        let present = JoinedRow {
            path: Some(Path::new("/r/gcc-9/5.4.0.ko")),
            ..absent.clone()
        };
        assert_eq!(present.indicator(), PRESENT);
    }

    #[test]
    fn test_display_table() {
        let m = matrix(&["/root/clang-12/5.19.0.o", "/root/gcc-9/5.4.228.ko"]);
        let text = m.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("kernel"));
        assert!(lines[0].contains("clang-12"));
        assert!(lines[1].starts_with("5.4.228"));
        assert!(lines[1].trim_end().ends_with("100"));
        assert!(lines[2].starts_with("5.19.0"));
    }

    #[test]
    fn test_empty_rows_give_empty_matrix() {
        let m = CompatMatrix::from_rows(Vec::new());
        assert!(m.is_empty());
        assert_eq!(m.rows().count(), 0);
    }
}
