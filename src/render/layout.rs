//! Fixed visual policy and pixel geometry of the heatmap figure.
//!
//! Sizes are specified in inches and points like a print figure and converted
//! to pixels through the DPI. Text extents are estimated from character
//! counts, which keeps the geometry independent of the installed fonts.

/// Average glyph advance as a fraction of the font size.
const GLYPH_ASPECT: f64 = 0.6;

const POINTS_PER_INCH: f64 = 72.0;

/// Figure geometry, resolution and font sizes.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotStyle {
    pub width_in: f64,
    pub height_in: f64,
    /// Used for both the canvas and the saved image.
    pub dpi: u32,
    pub label_pt: f64,
    pub title_pt: f64,
    /// Width of the lines separating cells.
    pub grid_pt: f64,
    /// Outer padding, in multiples of the label font size.
    pub pad_factor: f64,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width_in: 12.0,
            height_in: 8.0,
            dpi: 1000,
            label_pt: 10.0,
            title_pt: 16.0,
            grid_pt: 0.1,
            pad_factor: 1.08,
        }
    }
}

impl PlotStyle {
    pub fn points_to_px(&self, points: f64) -> f64 {
        points * f64::from(self.dpi) / POINTS_PER_INCH
    }

    pub fn canvas_size(&self) -> (u32, u32) {
        let px = |inches: f64| (inches * f64::from(self.dpi)).round().max(1.0) as u32;
        (px(self.width_in), px(self.height_in))
    }

    pub fn label_px(&self) -> f64 {
        self.points_to_px(self.label_pt)
    }

    pub fn title_px(&self) -> f64 {
        self.points_to_px(self.title_pt)
    }

    /// Grid lines never disappear below one pixel.
    pub fn grid_px(&self) -> u32 {
        self.points_to_px(self.grid_pt).round().max(1.0) as u32
    }
}

/// Axis-aligned pixel rectangle, `x0 <= x1`, `y0 <= y1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl PixelRect {
    #[cfg(test)]
    fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    #[cfg(test)]
    fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn corners(&self) -> [(i32, i32); 2] {
        [
            (self.x0.round() as i32, self.y0.round() as i32),
            (self.x1.round() as i32, self.y1.round() as i32),
        ]
    }
}

/// Resolved geometry for one matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub canvas: (u32, u32),
    /// Area covered by the cells.
    pub grid: PixelRect,
    pub cell_width: f64,
    pub cell_height: f64,
    /// Center of the title.
    pub title_anchor: (i32, i32),
    /// Distance between the grid and the tick labels.
    pub tick_gap: f64,
}

impl Layout {
    /// Place the grid so the longest labels and the title fit around it.
    pub fn compute(
        style: &PlotStyle,
        rows: usize,
        cols: usize,
        row_label_chars: usize,
        col_label_chars: usize,
    ) -> Self {
        let canvas = style.canvas_size();
        let (width, height) = (f64::from(canvas.0), f64::from(canvas.1));
        let label_px = style.label_px();
        let title_px = style.title_px();
        let pad = style.pad_factor * label_px;
        let tick_gap = 0.5 * label_px;

        let text_extent = |chars: usize| chars as f64 * label_px * GLYPH_ASPECT;
        let title_band = 1.6 * title_px;

        let left = pad + text_extent(row_label_chars) + tick_gap;
        let top = pad + title_band;
        let right = width - pad;
        let bottom = height - pad - text_extent(col_label_chars) - tick_gap;

        let grid_width = (right - left).max(cols.max(1) as f64);
        let grid_height = (bottom - top).max(rows.max(1) as f64);
        let grid = PixelRect {
            x0: left,
            y0: top,
            x1: left + grid_width,
            y1: top + grid_height,
        };

        Self {
            canvas,
            grid,
            cell_width: grid_width / cols.max(1) as f64,
            cell_height: grid_height / rows.max(1) as f64,
            // Centered over the axes, not the canvas.
            title_anchor: (
                ((grid.x0 + grid.x1) / 2.0).round() as i32,
                (pad + title_band / 2.0).round() as i32,
            ),
            tick_gap,
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> PixelRect {
        let x0 = self.grid.x0 + col as f64 * self.cell_width;
        let y0 = self.grid.y0 + row as f64 * self.cell_height;
        PixelRect {
            x0,
            y0,
            x1: x0 + self.cell_width,
            y1: y0 + self.cell_height,
        }
    }

    /// Anchor of a row label: right-aligned, left of the grid, vertically centered.
    pub fn row_label_anchor(&self, row: usize) -> (i32, i32) {
        let cell = self.cell(row, 0);
        (
            (self.grid.x0 - self.tick_gap).round() as i32,
            ((cell.y0 + cell.y1) / 2.0).round() as i32,
        )
    }

    /// Anchor of a column label: below the grid, horizontally centered.
    pub fn col_label_anchor(&self, col: usize) -> (i32, i32) {
        let cell = self.cell(0, col);
        (
            ((cell.x0 + cell.x1) / 2.0).round() as i32,
            (self.grid.y1 + self.tick_gap).round() as i32,
        )
    }
}
