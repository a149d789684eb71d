//! Layout variants and computed composition geometry.
//!
//! All positions are in output canvas pixels with the origin at the top-left.
//! Cell rectangles keep fractional coordinates; rounding happens only when
//! the renderer rasterizes them.

use std::fmt;
use std::str::FromStr;

use photobox_common::error::PhotoboxError;
use serde::{Deserialize, Serialize};

/// Geometry-computation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutVariant {
    /// Two columns; cell height follows the first photo's aspect ratio.
    #[default]
    NaturalAspectGrid,
    /// Two columns on a fixed 4:3 canvas; cells split the interior evenly.
    FixedRatioGrid,
    /// One column; cell height follows the first photo's aspect ratio.
    VerticalStrip,
}

impl LayoutVariant {
    pub const ALL: [LayoutVariant; 3] = [
        LayoutVariant::NaturalAspectGrid,
        LayoutVariant::FixedRatioGrid,
        LayoutVariant::VerticalStrip,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LayoutVariant::NaturalAspectGrid => "natural-aspect-grid",
            LayoutVariant::FixedRatioGrid => "fixed-ratio-grid",
            LayoutVariant::VerticalStrip => "vertical-strip",
        }
    }

    /// Photo counts this variant has a layout for.
    pub fn supported_counts(self) -> &'static [usize] {
        match self {
            LayoutVariant::NaturalAspectGrid
            | LayoutVariant::FixedRatioGrid
            | LayoutVariant::VerticalStrip => &[3, 4, 5],
        }
    }

    pub fn supports(self, count: usize) -> bool {
        self.supported_counts().contains(&count)
    }

    /// Whether cell size depends on the source aspect ratio.
    pub fn needs_aspect_ratio(self) -> bool {
        !matches!(self, LayoutVariant::FixedRatioGrid)
    }
}

impl fmt::Display for LayoutVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutVariant {
    type Err = PhotoboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LayoutVariant::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| {
                PhotoboxError::config(format!(
                    "Unknown layout: {s}. Use: natural-aspect-grid, fixed-ratio-grid, vertical-strip"
                ))
            })
    }
}

/// A point in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A horizontal band spanning the canvas width (header or footer).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    /// Top edge.
    pub top: f64,
    /// Band height.
    pub height: f64,
}

impl Band {
    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Placement of one photo.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CellRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Height divided by width.
    pub fn height_ratio(&self) -> f64 {
        self.height / self.width
    }

    /// Whether the interiors of two rectangles overlap. Shared edges do not count.
    pub fn intersects(&self, other: &CellRect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// This rectangle grown by `amount` on every side.
    pub fn outset(&self, amount: f64) -> CellRect {
        CellRect {
            x: self.x - amount,
            y: self.y - amount,
            width: self.width + 2.0 * amount,
            height: self.height + 2.0 * amount,
        }
    }
}

/// Largest canvas edge, in pixels, a layout may produce.
pub const MAX_CANVAS_DIMENSION: u32 = 16_384;

/// Everything the renderer needs to place content on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutGeometry {
    pub variant: LayoutVariant,
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Cell placements in the same order as the session images.
    pub cells: Vec<CellRect>,
    pub header: Band,
    pub footer: Band,
    /// Space between the canvas edge and the content.
    pub outer_padding: f64,
    /// Decoration glyph centers: top-left, top-right, bottom-left, bottom-right.
    pub corner_anchors: [Point; 4],
}

impl LayoutGeometry {
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Whether both canvas edges are within [`MAX_CANVAS_DIMENSION`].
    pub fn within_canvas_limit(&self) -> bool {
        self.canvas_width <= MAX_CANVAS_DIMENSION && self.canvas_height <= MAX_CANVAS_DIMENSION
    }

    /// Canvas width divided by height.
    pub fn canvas_aspect_ratio(&self) -> f64 {
        self.canvas_width as f64 / self.canvas_height as f64
    }

    /// Cells grouped into rows by their top edge, in draw order.
    pub fn rows(&self) -> Vec<Vec<CellRect>> {
        let mut rows: Vec<Vec<CellRect>> = Vec::new();
        for cell in &self.cells {
            match rows.last_mut() {
                Some(row) if row[0].y == cell.y => row.push(*cell),
                _ => rows.push(vec![*cell]),
            }
        }
        rows
    }
}
