//! The layout strategy table.

use photobox_common::error::LayoutError;
use photobox_frame_model::{Band, LayoutGeometry, LayoutVariant, Point, MAX_CANVAS_DIMENSION};

use crate::grid::GridSpec;

/// Space between the canvas edge and the content (grid variants).
pub const OUTER_PADDING: f64 = 30.0;
/// Header band height.
pub const HEADER_HEIGHT: f64 = 60.0;
/// Footer band height.
pub const FOOTER_HEIGHT: f64 = 50.0;
/// Space between neighbouring cells.
pub const CELL_GAP: f64 = 15.0;
/// Cell width for the aspect-driven variants.
pub const NATURAL_CELL_WIDTH: f64 = 350.0;
/// Canvas size of the fixed-ratio grid (4:3).
pub const FIXED_CANVAS_WIDTH: u32 = 1200;
pub const FIXED_CANVAS_HEIGHT: u32 = 900;

const GRID_COLUMNS: usize = 2;

/// Compute the composition geometry for `count` photos.
///
/// `source_aspect_ratio` is the first photo's width / height. It is required
/// by the aspect-driven variants and ignored by the fixed-ratio grid. Every
/// cell gets the same size; photos whose ratio differs are stretched to fill
/// their cell exactly. A canvas edge above [`MAX_CANVAS_DIMENSION`] fails
/// with [`LayoutError::CanvasTooLarge`].
pub fn compute_geometry(
    count: usize,
    variant: LayoutVariant,
    source_aspect_ratio: Option<f64>,
) -> Result<LayoutGeometry, LayoutError> {
    if !variant.supports(count) {
        return Err(LayoutError::UnsupportedCount {
            count,
            variant: variant.as_str(),
        });
    }

    let geometry = match variant {
        LayoutVariant::NaturalAspectGrid => {
            natural_aspect_grid(count, require_aspect(source_aspect_ratio)?)?
        }
        LayoutVariant::FixedRatioGrid => fixed_ratio_grid(count)?,
        LayoutVariant::VerticalStrip => {
            vertical_strip(count, require_aspect(source_aspect_ratio)?)?
        }
    };

    tracing::debug!(
        variant = %variant,
        count,
        canvas_width = geometry.canvas_width,
        canvas_height = geometry.canvas_height,
        "Computed layout geometry"
    );

    Ok(geometry)
}

fn require_aspect(ratio: Option<f64>) -> Result<f64, LayoutError> {
    match ratio {
        Some(r) if r.is_finite() && r > 0.0 => Ok(r),
        other => Err(LayoutError::InvalidAspectRatio { ratio: other }),
    }
}

fn natural_aspect_grid(count: usize, aspect_ratio: f64) -> Result<LayoutGeometry, LayoutError> {
    let grid = GridSpec {
        columns: GRID_COLUMNS,
        cell_width: NATURAL_CELL_WIDTH,
        cell_height: NATURAL_CELL_WIDTH / aspect_ratio,
        gap: CELL_GAP,
        origin: Point {
            x: OUTER_PADDING,
            y: OUTER_PADDING + HEADER_HEIGHT,
        },
    };
    let rows = grid.rows_for(count) as f64;
    let content_height = rows * grid.cell_height + (rows - 1.0) * CELL_GAP;

    let width = grid.row_width() + 2.0 * OUTER_PADDING;
    let height = content_height + HEADER_HEIGHT + FOOTER_HEIGHT + 2.0 * OUTER_PADDING;

    framed_grid(LayoutVariant::NaturalAspectGrid, &grid, count, width, height)
}

fn fixed_ratio_grid(count: usize) -> Result<LayoutGeometry, LayoutError> {
    let width = FIXED_CANVAS_WIDTH as f64;
    let height = FIXED_CANVAS_HEIGHT as f64;
    let rows = count.div_ceil(GRID_COLUMNS) as f64;
    let columns = GRID_COLUMNS as f64;

    let interior_width = width - 2.0 * OUTER_PADDING;
    let interior_height = height - 2.0 * OUTER_PADDING - HEADER_HEIGHT - FOOTER_HEIGHT;

    let grid = GridSpec {
        columns: GRID_COLUMNS,
        cell_width: (interior_width - (columns - 1.0) * CELL_GAP) / columns,
        cell_height: (interior_height - (rows - 1.0) * CELL_GAP) / rows,
        gap: CELL_GAP,
        origin: Point {
            x: OUTER_PADDING,
            y: OUTER_PADDING + HEADER_HEIGHT,
        },
    };

    framed_grid(LayoutVariant::FixedRatioGrid, &grid, count, width, height)
}

fn vertical_strip(count: usize, aspect_ratio: f64) -> Result<LayoutGeometry, LayoutError> {
    let grid = GridSpec {
        columns: 1,
        cell_width: NATURAL_CELL_WIDTH,
        cell_height: NATURAL_CELL_WIDTH / aspect_ratio,
        gap: CELL_GAP,
        origin: Point {
            x: CELL_GAP,
            y: HEADER_HEIGHT + CELL_GAP,
        },
    };
    let n = count as f64;
    let width = grid.cell_width + 2.0 * CELL_GAP;
    let height = HEADER_HEIGHT + FOOTER_HEIGHT + n * grid.cell_height + (n + 1.0) * CELL_GAP;

    let (canvas_width, canvas_height) = canvas_size(width, height)?;

    Ok(LayoutGeometry {
        variant: LayoutVariant::VerticalStrip,
        canvas_width,
        canvas_height,
        cells: grid.place(count),
        header: Band {
            top: 0.0,
            height: HEADER_HEIGHT,
        },
        footer: Band {
            top: canvas_height as f64 - FOOTER_HEIGHT,
            height: FOOTER_HEIGHT,
        },
        outer_padding: CELL_GAP,
        corner_anchors: corner_anchors(canvas_width, canvas_height, CELL_GAP),
    })
}

/// Wrap a two-column grid with the outer padding and header/footer bands.
fn framed_grid(
    variant: LayoutVariant,
    grid: &GridSpec,
    count: usize,
    width: f64,
    height: f64,
) -> Result<LayoutGeometry, LayoutError> {
    let (canvas_width, canvas_height) = canvas_size(width, height)?;

    Ok(LayoutGeometry {
        variant,
        canvas_width,
        canvas_height,
        cells: grid.place(count),
        header: Band {
            top: OUTER_PADDING,
            height: HEADER_HEIGHT,
        },
        footer: Band {
            top: canvas_height as f64 - OUTER_PADDING - FOOTER_HEIGHT,
            height: FOOTER_HEIGHT,
        },
        outer_padding: OUTER_PADDING,
        corner_anchors: corner_anchors(canvas_width, canvas_height, OUTER_PADDING),
    })
}

/// Round a float canvas size up to whole pixels, refusing sizes the
/// renderer could not allocate.
fn canvas_size(width: f64, height: f64) -> Result<(u32, u32), LayoutError> {
    let fits = |v: f64| v.is_finite() && v.ceil() <= MAX_CANVAS_DIMENSION as f64;
    if !fits(width) || !fits(height) {
        return Err(LayoutError::CanvasTooLarge {
            width,
            height,
            max: MAX_CANVAS_DIMENSION,
        });
    }
    Ok((width.ceil() as u32, height.ceil() as u32))
}

fn corner_anchors(canvas_width: u32, canvas_height: u32, padding: f64) -> [Point; 4] {
    let w = canvas_width as f64;
    let h = canvas_height as f64;
    [
        Point {
            x: padding - 5.0,
            y: padding + 35.0,
        },
        Point {
            x: w - padding - 15.0,
            y: padding + 35.0,
        },
        Point {
            x: padding + 15.0,
            y: h - 15.0,
        },
        Point {
            x: w - padding - 35.0,
            y: h - 15.0,
        },
    ]
}
