//! Text rasterization with the bundled DejaVu fonts.

use image::{Rgba, RgbaImage};
use photobox_common::error::{PhotoboxError, PhotoboxResult};
use rusttype::{point, Font, PositionedGlyph, Scale};

use crate::canvas::blend_pixel;

static REGULAR_TTF: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");
static BOLD_TTF: &[u8] = include_bytes!("../assets/fonts/DejaVuSans-Bold.ttf");

/// Which face to draw with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    Regular,
    Bold,
}

/// Face, pixel size and color of a line of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub weight: Weight,
    pub size: f32,
    pub color: Rgba<u8>,
}

/// The two faces the compositor draws with.
pub struct FontSet {
    regular: Font<'static>,
    bold: Font<'static>,
}

impl FontSet {
    /// Parse the fonts compiled into the binary.
    pub fn bundled() -> PhotoboxResult<Self> {
        let parse = |bytes: &'static [u8], name: &str| {
            Font::try_from_bytes(bytes).ok_or_else(|| {
                PhotoboxError::Other(anyhow::anyhow!("Failed to parse bundled font {name}"))
            })
        };
        Ok(Self {
            regular: parse(REGULAR_TTF, "DejaVu Sans")?,
            bold: parse(BOLD_TTF, "DejaVu Sans Bold")?,
        })
    }

    fn face(&self, weight: Weight) -> &Font<'static> {
        match weight {
            Weight::Regular => &self.regular,
            Weight::Bold => &self.bold,
        }
    }

    /// Advance width of `text` at `size` pixels.
    pub fn measure(&self, text: &str, weight: Weight, size: f32) -> f32 {
        let glyphs: Vec<_> = self
            .face(weight)
            .layout(text, Scale::uniform(size), point(0.0, 0.0))
            .collect();
        line_width(&glyphs)
    }

    /// Draw `text` horizontally centered on `center_x` with its baseline at `baseline_y`.
    pub fn draw_centered(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        style: &TextStyle,
        center_x: f32,
        baseline_y: f32,
    ) {
        let width = self.measure(text, style.weight, style.size);
        let glyphs: Vec<_> = self
            .face(style.weight)
            .layout(
                text,
                Scale::uniform(style.size),
                point(center_x - width / 2.0, baseline_y),
            )
            .collect();
        draw_glyphs(canvas, &glyphs, style.color);
    }

    /// Baseline that vertically centers a line of `size` pixels on `center_y`.
    pub fn centered_baseline(&self, weight: Weight, size: f32, center_y: f32) -> f32 {
        let v = self.face(weight).v_metrics(Scale::uniform(size));
        center_y + (v.ascent + v.descent) / 2.0
    }
}

fn line_width(glyphs: &[PositionedGlyph<'_>]) -> f32 {
    match (glyphs.first(), glyphs.last()) {
        (Some(first), Some(last)) => {
            last.position().x + last.unpositioned().h_metrics().advance_width - first.position().x
        }
        _ => 0.0,
    }
}

fn draw_glyphs(canvas: &mut RgbaImage, glyphs: &[PositionedGlyph<'_>], color: Rgba<u8>) {
    let (width, height) = (canvas.width() as i32, canvas.height() as i32);

    for glyph in glyphs {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let px = bb.min.x + gx as i32;
            let py = bb.min.y + gy as i32;
            if px < 0 || py < 0 || px >= width || py >= height {
                return;
            }

            let alpha = (coverage * color[3] as f32).round() as u8;
            let overlay = Rgba([color[0], color[1], color[2], alpha]);
            blend_pixel(canvas.get_pixel_mut(px as u32, py as u32), &overlay);
        });
    }
}
