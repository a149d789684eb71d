//! Composition renderer: draws photos, borders, captions, and decorations.

use std::io::Cursor;

use chrono::{Locale, NaiveDate};
use image::{ImageFormat, Rgba, RgbaImage};
use photobox_common::error::{CompositionError, PhotoboxError, PhotoboxResult};
use photobox_frame_model::{LayoutGeometry, RawImage, Rgb, ThemeSpec, MAX_CANVAS_DIMENSION};

use crate::canvas::{blit_stretched, fill_rect};
use crate::text::{FontSet, TextStyle, Weight};

const TITLE_SIZE: f32 = 24.0;
const FOOTER_SIZE: f32 = 16.0;
const DECORATION_SIZE: f32 = 24.0;

/// Header and footer strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captions {
    pub title: String,
    pub footer: String,
}

impl Captions {
    /// Title plus `date` formatted as "16 Oktober 2026" for `locale` (e.g. "id_ID").
    pub fn dated(title: impl Into<String>, date: NaiveDate, locale: &str) -> PhotoboxResult<Self> {
        let locale = Locale::try_from(locale)
            .map_err(|_| PhotoboxError::config(format!("Unknown locale: {locale}")))?;
        Ok(Self {
            title: title.into(),
            footer: date.format_localized("%-d %B %Y", locale).to_string(),
        })
    }

    /// Captions for today in the local timezone.
    pub fn today(title: impl Into<String>, locale: &str) -> PhotoboxResult<Self> {
        Self::dated(title, chrono::Local::now().date_naive(), locale)
    }
}

/// A finished composition. Read-only once produced.
#[derive(Debug, Clone)]
pub struct CompositionResult {
    image: RgbaImage,
}

impl CompositionResult {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.image
    }

    /// Lossless PNG encoding of the composition.
    pub fn encode_png(&self) -> PhotoboxResult<Vec<u8>> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| PhotoboxError::export(format!("Failed to encode PNG: {e}")))?;
        Ok(bytes)
    }
}

/// Renders compositions. Holds the parsed fonts so they are loaded once.
pub struct Compositor {
    fonts: FontSet,
}

impl Compositor {
    pub fn new() -> PhotoboxResult<Self> {
        Ok(Self {
            fonts: FontSet::bundled()?,
        })
    }

    /// Draw `images` into the cells of `geometry` using `theme`.
    ///
    /// Fails with [`CompositionError::ImageCountMismatch`] before touching
    /// any pixels when the image count differs from the cell count, and with
    /// [`CompositionError::CanvasTooLarge`] before allocating a canvas wider
    /// or taller than [`MAX_CANVAS_DIMENSION`].
    pub fn render(
        &self,
        images: &[RawImage],
        geometry: &LayoutGeometry,
        theme: &ThemeSpec,
        captions: &Captions,
    ) -> PhotoboxResult<CompositionResult> {
        if images.len() != geometry.cells.len() {
            return Err(CompositionError::ImageCountMismatch {
                images: images.len(),
                cells: geometry.cells.len(),
            }
            .into());
        }
        if geometry.canvas_width == 0 || geometry.canvas_height == 0 {
            return Err(CompositionError::EmptyCanvas.into());
        }
        if !geometry.within_canvas_limit() {
            return Err(CompositionError::CanvasTooLarge {
                width: geometry.canvas_width,
                height: geometry.canvas_height,
                max: MAX_CANVAS_DIMENSION,
            }
            .into());
        }

        let mut canvas = RgbaImage::from_pixel(
            geometry.canvas_width,
            geometry.canvas_height,
            rgba(theme.background),
        );
        let center_x = geometry.canvas_width as f32 / 2.0;

        let title = TextStyle {
            weight: Weight::Bold,
            size: TITLE_SIZE,
            color: rgba(theme.text_color),
        };
        let baseline = self.fonts.centered_baseline(
            title.weight,
            title.size,
            geometry.header.center_y() as f32,
        );
        self.fonts
            .draw_centered(&mut canvas, &captions.title, &title, center_x, baseline);

        for (image, cell) in images.iter().zip(&geometry.cells) {
            // Border goes down first; the photo covers all of it but the outer ring.
            if theme.border_width > 0.0 {
                let ring = cell.outset(theme.border_placement.outset(theme.border_width));
                fill_rect(&mut canvas, &ring, rgba(theme.border_color));
            }
            blit_stretched(&mut canvas, image.pixels(), cell);
        }

        let footer = TextStyle {
            weight: Weight::Regular,
            size: FOOTER_SIZE,
            color: rgba(theme.text_color),
        };
        let baseline = self.fonts.centered_baseline(
            footer.weight,
            footer.size,
            geometry.footer.center_y() as f32,
        );
        self.fonts
            .draw_centered(&mut canvas, &captions.footer, &footer, center_x, baseline);

        if let Some(glyphs) = theme.decorations {
            let style = TextStyle {
                weight: Weight::Regular,
                size: DECORATION_SIZE,
                color: rgba(theme.text_color),
            };
            for (glyph, anchor) in glyphs.iter().zip(&geometry.corner_anchors) {
                self.fonts.draw_centered(
                    &mut canvas,
                    glyph,
                    &style,
                    anchor.x as f32,
                    anchor.y as f32,
                );
            }
        }

        tracing::debug!(
            theme = %theme.id,
            variant = %geometry.variant,
            width = canvas.width(),
            height = canvas.height(),
            photos = images.len(),
            "Rendered composition"
        );

        Ok(CompositionResult { image: canvas })
    }
}

/// Render once with a freshly loaded compositor.
pub fn render(
    images: &[RawImage],
    geometry: &LayoutGeometry,
    theme: &ThemeSpec,
    captions: &Captions,
) -> PhotoboxResult<CompositionResult> {
    Compositor::new()?.render(images, geometry, theme, captions)
}

fn rgba(color: Rgb) -> Rgba<u8> {
    Rgba(color.to_rgba())
}

#[cfg(test)]
mod tests {
    use photobox_frame_model::{LayoutVariant, ThemeId};
    use photobox_layout_core::compute_geometry;

    use super::*;

    fn photo(color: [u8; 4]) -> RawImage {
        RawImage::from_rgba(RgbaImage::from_pixel(64, 48, Rgba(color))).unwrap()
    }

    fn captions() -> Captions {
        Captions::dated(
            "PHOTOBOX MEMORIES",
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
            "id_ID",
        )
        .unwrap()
    }

    #[test]
    fn footer_date_uses_locale_month_names() {
        assert_eq!(captions().footer, "16 Oktober 2026");
        let en = Captions::dated("x", NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(), "en_US")
            .unwrap();
        assert_eq!(en.footer, "1 March 2026");
    }

    #[test]
    fn unknown_locale_is_a_config_error() {
        let err = Captions::dated("x", NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(), "xx_YY")
            .unwrap_err();
        assert!(matches!(err, PhotoboxError::Config { .. }));
    }

    #[test]
    fn mismatched_image_count_fails_before_drawing() {
        let geometry = compute_geometry(4, LayoutVariant::FixedRatioGrid, None).unwrap();
        let images = vec![photo([255, 0, 0, 255]); 3];

        let err = Compositor::new()
            .unwrap()
            .render(&images, &geometry, ThemeId::SimpleWhite.spec(), &captions())
            .unwrap_err();
        assert!(matches!(
            err,
            PhotoboxError::Composition(CompositionError::ImageCountMismatch { images: 3, cells: 4 })
        ));
    }

    #[test]
    fn oversized_geometry_is_refused_before_allocating() {
        let mut geometry = compute_geometry(3, LayoutVariant::VerticalStrip, Some(1.0)).unwrap();
        geometry.canvas_height = 100_000;
        let images = vec![photo([255, 0, 0, 255]); 3];

        let err = Compositor::new()
            .unwrap()
            .render(&images, &geometry, ThemeId::Neon.spec(), &captions())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            CompositionError::CanvasTooLarge {
                width: geometry.canvas_width,
                height: 100_000,
                max: MAX_CANVAS_DIMENSION,
            }
            .to_string()
        );
        assert!(matches!(
            err,
            PhotoboxError::Composition(CompositionError::CanvasTooLarge { height: 100_000, .. })
        ));
    }

    #[test]
    fn photos_fill_their_cells() {
        let geometry = compute_geometry(3, LayoutVariant::NaturalAspectGrid, Some(4.0 / 3.0)).unwrap();
        let colors = [[255, 0, 0, 255], [0, 255, 0, 255], [0, 0, 255, 255]];
        let images: Vec<_> = colors.iter().map(|c| photo(*c)).collect();

        let result = render(&images, &geometry, ThemeId::SimpleBlack.spec(), &captions()).unwrap();
        assert_eq!(
            (result.width(), result.height()),
            (geometry.canvas_width, geometry.canvas_height)
        );

        for (cell, color) in geometry.cells.iter().zip(colors) {
            let center = result
                .pixels()
                .get_pixel(cell.center_x() as u32, (cell.y + cell.height / 2.0) as u32);
            assert_eq!(center, &Rgba(color));
        }
    }

    #[test]
    fn background_is_the_theme_color() {
        let geometry = compute_geometry(4, LayoutVariant::VerticalStrip, Some(1.0)).unwrap();
        let images = vec![photo([9, 9, 9, 255]); 4];
        let result = render(&images, &geometry, ThemeId::SimpleBlack.spec(), &captions()).unwrap();

        // Between two strip cells, away from any text.
        let gap_y = (geometry.cells[0].bottom() + 7.0) as u32;
        assert_eq!(
            result.pixels().get_pixel(3, gap_y),
            &Rgba([0x1a, 0x1a, 0x1a, 255])
        );
    }

    #[test]
    fn png_encoding_round_trips_dimensions() {
        let geometry = compute_geometry(3, LayoutVariant::VerticalStrip, Some(2.0)).unwrap();
        let images = vec![photo([1, 2, 3, 255]); 3];
        let result = render(&images, &geometry, ThemeId::Neon.spec(), &captions()).unwrap();

        let decoded = RawImage::decode(&result.encode_png().unwrap()).unwrap();
        assert_eq!(decoded.width(), result.width());
        assert_eq!(decoded.height(), result.height());
        assert_eq!(decoded.pixels(), result.pixels());
    }
}
