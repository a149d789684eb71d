//! Row-major cell placement shared by the grid and strip variants.

use photobox_frame_model::{CellRect, Point};

/// Uniform cell grid anchored at `origin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub columns: usize,
    pub cell_width: f64,
    pub cell_height: f64,
    pub gap: f64,
    /// Top-left corner of the first cell.
    pub origin: Point,
}

impl GridSpec {
    /// Number of rows needed for `count` cells.
    pub fn rows_for(&self, count: usize) -> usize {
        count.div_ceil(self.columns.max(1))
    }

    /// Width of a full row.
    pub fn row_width(&self) -> f64 {
        self.columns as f64 * self.cell_width + (self.columns as f64 - 1.0) * self.gap
    }

    /// Place `count` cells row by row.
    ///
    /// A short final row is centered under the full rows: each missing cell
    /// shifts the row right by half a column pitch.
    pub fn place(&self, count: usize) -> Vec<CellRect> {
        let columns = self.columns.max(1);
        let pitch_x = self.cell_width + self.gap;
        let pitch_y = self.cell_height + self.gap;

        let mut cells = Vec::with_capacity(count);
        for row in 0..self.rows_for(count) {
            let in_row = (count - row * columns).min(columns);
            let shift = (columns - in_row) as f64 * pitch_x / 2.0;
            let y = self.origin.y + row as f64 * pitch_y;

            for col in 0..in_row {
                let x = self.origin.x + shift + col as f64 * pitch_x;
                cells.push(CellRect::new(x, y, self.cell_width, self.cell_height));
            }
        }
        cells
    }
}
