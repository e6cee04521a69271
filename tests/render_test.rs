//! Heatmap output written to disk.

use kmod_compat::render::parse_hex_color;
use kmod_compat::{
    render_heatmap, run, CompatMatrix, ListingOptions, Palette, PlotRequest, PlotStyle, PRESENT,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const PNG_MAGIC: [u8; 4] = [0x89, b'P', b'N', b'G'];

/// Helper to check that a file holds a PNG image
fn assert_png(path: &Path) {
    let bytes = fs::read(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
    assert!(
        bytes.starts_with(&PNG_MAGIC),
        "{} is not a PNG: {:02x?}",
        path.display(),
        &bytes[..bytes.len().min(8)]
    );
}

fn small_style() -> PlotStyle {
    PlotStyle {
        dpi: 100,
        ..PlotStyle::default()
    }
}

fn diagonal_matrix() -> CompatMatrix {
    CompatMatrix::from_artifacts(&["/r/clang-12/5.19.0.o", "/r/gcc-9/5.4.228.ko"]).unwrap()
}

#[test]
fn test_render_writes_png() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("matrix.png");
    let palette = Palette::two_class(parse_hex_color("#3074EC").unwrap());

    render_heatmap(&diagonal_matrix(), &output, "Driver compat", &palette, &small_style())
        .unwrap();

    assert_png(&output);
}

#[test]
fn test_render_replaces_existing_file() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("matrix.png");
    fs::write(&output, b"junk").unwrap();
    let palette = Palette::two_class(parse_hex_color("#3074EC").unwrap());

    render_heatmap(&diagonal_matrix(), &output, "Driver compat", &palette, &small_style())
        .unwrap();

    assert_png(&output);
}

#[test]
fn test_run_end_to_end() {
    let dir = TempDir::new().unwrap();
    let artifacts = dir.path().join("driver_ok");
    for file in ["clang-12/5.19.0.o", "gcc-9/5.4.228.ko"] {
        let path = artifacts.join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"").unwrap();
    }
    let request = PlotRequest {
        artifacts_dir: artifacts,
        output: dir.path().join("matrix.png"),
        title: "Driver compat".to_string(),
        hex_color: "#3074EC".to_string(),
        listing: ListingOptions::default(),
    };

    let matrix = run(&request).unwrap();

    assert_eq!(matrix.dimensions(), (2, 2));
    assert_eq!(matrix.get("5.19.0", "clang-12"), Some(PRESENT));
    assert_eq!(matrix.success_count(), 2);
    assert_png(&request.output);
}
