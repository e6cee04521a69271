// This module rasterizes a CompatMatrix into a heatmap image using the plotters bitmap
// backend. The visual policy is fixed: a dark background, a two-entry palette (black for
// missing artifacts, the caller's hex color for present ones) over the value domain [0, 100],
// thin white lines between cells, kernel labels horizontal on the left, compiler labels
// rotated to read bottom-to-top under the grid, a larger centered title, and no color bar.
// Geometry lives in layout.rs and the value-to-color mapping in palette.rs, so this file
// only issues draw calls. The output encoding follows the file extension of the target path
// and an existing file is overwritten.

//! Heatmap rendering.

pub mod layout;
pub mod palette;

pub use layout::{Layout, PixelRect, PlotStyle};
pub use palette::{parse_hex_color, Palette};

use crate::core::{MatrixError, MatrixResult};
use crate::table::CompatMatrix;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

const FONT_FAMILY: &str = "sans-serif";

/// Render `matrix` with the default style and save it to `output`.
///
/// `hex_color` is validated before anything is drawn.
pub fn save_compatibility_plot(
    matrix: &CompatMatrix,
    output: &Path,
    title: &str,
    hex_color: &str,
) -> MatrixResult<()> {
    let success = parse_hex_color(hex_color)?;
    render_heatmap(
        matrix,
        output,
        title,
        &Palette::two_class(success),
        &PlotStyle::default(),
    )
}

/// Render `matrix` with an explicit palette and style.
pub fn render_heatmap(
    matrix: &CompatMatrix,
    output: &Path,
    title: &str,
    palette: &Palette,
    style: &PlotStyle,
) -> MatrixResult<()> {
    if matrix.is_empty() {
        return Err(MatrixError::EmptyMatrix);
    }

    let (rows, cols) = matrix.dimensions();
    let longest = |labels: &[String]| labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let layout = Layout::compute(
        style,
        rows,
        cols,
        longest(matrix.kernels()),
        longest(matrix.compilers()),
    );

    log::info!(
        "Rendering {}x{} matrix to {} ({}x{} px at {} dpi)",
        rows,
        cols,
        output.display(),
        layout.canvas.0,
        layout.canvas.1,
        style.dpi
    );

    let root = BitMapBackend::new(output, layout.canvas).into_drawing_area();
    root.fill(&BLACK).map_err(render_error)?;

    let grid_line = WHITE.stroke_width(style.grid_px());
    for (row, (_, values)) in matrix.rows().enumerate() {
        for (col, &value) in values.iter().enumerate() {
            let cell = layout.cell(row, col).corners();
            let fill = palette.color_for(f64::from(value));
            root.draw(&Rectangle::new(cell, fill.filled()))
                .map_err(render_error)?;
            root.draw(&Rectangle::new(cell, grid_line))
                .map_err(render_error)?;
        }
    }

    let label_font = (FONT_FAMILY, style.label_px()).into_font();
    let row_label = label_font
        .color(&WHITE)
        .pos(Pos::new(HPos::Right, VPos::Center));
    for (row, kernel) in matrix.kernels().iter().enumerate() {
        root.draw(&Text::new(
            kernel.as_str(),
            layout.row_label_anchor(row),
            row_label.clone(),
        ))
        .map_err(render_error)?;
    }

    let col_label = label_font
        .transform(FontTransform::Rotate270)
        .color(&WHITE)
        .pos(Pos::new(HPos::Right, VPos::Center));
    for (col, compiler) in matrix.compilers().iter().enumerate() {
        root.draw(&Text::new(
            compiler.as_str(),
            layout.col_label_anchor(col),
            col_label.clone(),
        ))
        .map_err(render_error)?;
    }

    let title_style = (FONT_FAMILY, style.title_px())
        .into_font()
        .color(&WHITE)
        .pos(Pos::new(HPos::Center, VPos::Center));
    root.draw(&Text::new(title, layout.title_anchor, title_style))
        .map_err(render_error)?;

    root.present().map_err(render_error)?;
    log::info!(
        "Saved {} ({} of {} cells present)",
        output.display(),
        matrix.success_count(),
        rows * cols
    );
    Ok(())
}

fn render_error<E: std::fmt::Display>(err: E) -> MatrixError {
    MatrixError::Render {
        reason: err.to_string(),
    }
}
