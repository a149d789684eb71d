//! Raster drawing primitives on an RGBA canvas.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use photobox_frame_model::CellRect;

/// Integer pixel span `[x0, x1) × [y0, y1)` clipped to a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl PixelRect {
    /// Pixels whose centers fall inside `rect`, clipped to `width × height`.
    ///
    /// Rounding both edges (rather than origin and size) keeps neighbouring
    /// rectangles from overlapping or leaving a seam.
    pub fn covering(rect: &CellRect, width: u32, height: u32) -> Self {
        let clamp = |v: f64, max: u32| v.round().clamp(0.0, max as f64) as u32;
        Self {
            x0: clamp(rect.x, width),
            y0: clamp(rect.y, height),
            x1: clamp(rect.right(), width),
            y1: clamp(rect.bottom(), height),
        }
    }

    pub fn width(&self) -> u32 {
        self.x1.saturating_sub(self.x0)
    }

    pub fn height(&self) -> u32 {
        self.y1.saturating_sub(self.y0)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// Source-over blend of `overlay` onto `base`. The result is opaque.
pub fn blend_pixel(base: &mut Rgba<u8>, overlay: &Rgba<u8>) {
    let alpha = overlay[3] as f32 / 255.0;
    if alpha <= 0.0 {
        return;
    }

    let inv_alpha = 1.0 - alpha;
    for idx in 0..3 {
        base[idx] = (overlay[idx] as f32 * alpha + base[idx] as f32 * inv_alpha)
            .round()
            .clamp(0.0, 255.0) as u8;
    }
    base[3] = 255;
}

/// Overwrite every pixel inside `rect` with `color`.
pub fn fill_rect(canvas: &mut RgbaImage, rect: &CellRect, color: Rgba<u8>) {
    let span = PixelRect::covering(rect, canvas.width(), canvas.height());
    for y in span.y0..span.y1 {
        for x in span.x0..span.x1 {
            canvas.put_pixel(x, y, color);
        }
    }
}

/// Draw `source` scaled (non-uniformly) to exactly cover `rect`.
pub fn blit_stretched(canvas: &mut RgbaImage, source: &RgbaImage, rect: &CellRect) {
    let span = PixelRect::covering(rect, canvas.width(), canvas.height());
    if span.is_empty() {
        return;
    }

    let scaled;
    let pixels = if source.dimensions() == (span.width(), span.height()) {
        source
    } else {
        scaled = imageops::resize(source, span.width(), span.height(), FilterType::Triangle);
        &scaled
    };
    imageops::replace(canvas, pixels, span.x0 as i64, span.y0 as i64);
}
