//! Photo session state.
//!
//! One `CaptureSession` lives from the moment the user picks a photo count
//! until they restart. The image list is append-only; theme and layout are
//! replace-only selections.

use photobox_common::error::{PhotoboxError, PhotoboxResult};

use crate::geometry::LayoutVariant;
use crate::photo::RawImage;
use crate::theme::ThemeId;

#[derive(Debug, Clone)]
pub struct CaptureSession {
    target_count: usize,
    images: Vec<RawImage>,
    selected_theme: ThemeId,
    selected_layout: LayoutVariant,
}

impl CaptureSession {
    /// Start an empty session that expects `target_count` photos.
    pub fn new(target_count: usize) -> PhotoboxResult<Self> {
        if target_count == 0 {
            return Err(PhotoboxError::session(
                "A session needs at least one photo",
            ));
        }
        Ok(Self {
            target_count,
            images: Vec::with_capacity(target_count),
            selected_theme: ThemeId::default(),
            selected_layout: LayoutVariant::default(),
        })
    }

    /// Build a complete session from already captured photos.
    pub fn from_images(images: Vec<RawImage>) -> PhotoboxResult<Self> {
        let mut session = Self::new(images.len())?;
        session.images = images;
        Ok(session)
    }

    pub fn target_count(&self) -> usize {
        self.target_count
    }

    /// Photos in capture order.
    pub fn images(&self) -> &[RawImage] {
        &self.images
    }

    /// Append the next photo. Fails once the target count is reached.
    pub fn push_image(&mut self, image: RawImage) -> PhotoboxResult<()> {
        if self.images.len() >= self.target_count {
            return Err(PhotoboxError::session(format!(
                "Session already holds {} of {} photos",
                self.images.len(),
                self.target_count
            )));
        }
        self.images.push(image);
        tracing::debug!(
            captured = self.images.len(),
            target = self.target_count,
            "Photo added to session"
        );
        Ok(())
    }

    /// Photos still to be taken.
    pub fn remaining(&self) -> usize {
        self.target_count - self.images.len()
    }

    /// Composition is only valid once every photo is in.
    pub fn is_complete(&self) -> bool {
        self.images.len() == self.target_count
    }

    /// Aspect ratio of the first photo, which sizes the aspect-driven layouts.
    pub fn source_aspect_ratio(&self) -> Option<f64> {
        self.images.first().map(RawImage::aspect_ratio)
    }

    pub fn selected_theme(&self) -> ThemeId {
        self.selected_theme
    }

    pub fn selected_layout(&self) -> LayoutVariant {
        self.selected_layout
    }

    pub fn select_theme(&mut self, theme: ThemeId) {
        self.selected_theme = theme;
    }

    pub fn select_layout(&mut self, layout: LayoutVariant) {
        self.selected_layout = layout;
    }

    /// Drop every captured photo, keeping the target count and selections.
    pub fn reset(&mut self) {
        self.images.clear();
    }

    /// Move the photos out, leaving an empty session with the same target
    /// count and selections behind.
    pub fn take(&mut self) -> Self {
        Self {
            target_count: self.target_count,
            images: std::mem::replace(&mut self.images, Vec::with_capacity(self.target_count)),
            selected_theme: self.selected_theme,
            selected_layout: self.selected_layout,
        }
    }
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};

    use super::*;

    fn shot(width: u32, height: u32, shade: u8) -> RawImage {
        RawImage::from_rgba(RgbaImage::from_pixel(
            width,
            height,
            Rgba([shade, shade, shade, 255]),
        ))
        .unwrap()
    }

    #[test]
    fn zero_target_is_rejected() {
        assert!(CaptureSession::new(0).is_err());
    }

    #[test]
    fn images_never_exceed_target() {
        let mut session = CaptureSession::new(2).unwrap();
        session.push_image(shot(4, 3, 1)).unwrap();
        assert!(!session.is_complete());
        assert_eq!(session.remaining(), 1);

        session.push_image(shot(4, 3, 2)).unwrap();
        assert!(session.is_complete());

        let err = session.push_image(shot(4, 3, 3)).unwrap_err();
        assert!(matches!(err, PhotoboxError::Session { .. }));
        assert_eq!(session.images().len(), 2);
    }

    #[test]
    fn aspect_ratio_comes_from_first_image() {
        let mut session = CaptureSession::new(2).unwrap();
        assert_eq!(session.source_aspect_ratio(), None);
        session.push_image(shot(16, 9, 0)).unwrap();
        session.push_image(shot(4, 3, 0)).unwrap();
        assert!((session.source_aspect_ratio().unwrap() - 16.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn take_moves_photos_and_leaves_an_empty_session() {
        let mut session = CaptureSession::new(2).unwrap();
        session.select_layout(LayoutVariant::FixedRatioGrid);
        session.push_image(shot(4, 3, 1)).unwrap();
        session.push_image(shot(4, 3, 2)).unwrap();

        let taken = session.take();
        assert!(taken.is_complete());
        assert_eq!(taken.images()[0].pixels().get_pixel(0, 0)[0], 1);
        assert_eq!(taken.images()[1].pixels().get_pixel(0, 0)[0], 2);
        assert_eq!(taken.selected_layout(), LayoutVariant::FixedRatioGrid);

        assert!(session.images().is_empty());
        assert_eq!(session.remaining(), 2);
        assert_eq!(session.selected_layout(), LayoutVariant::FixedRatioGrid);
    }

    #[test]
    fn reset_keeps_selections() {
        let mut session = CaptureSession::from_images(vec![shot(2, 2, 9)]).unwrap();
        session.select_theme(ThemeId::Neon);
        session.select_layout(LayoutVariant::VerticalStrip);
        session.reset();

        assert!(session.images().is_empty());
        assert_eq!(session.target_count(), 1);
        assert_eq!(session.selected_theme(), ThemeId::Neon);
        assert_eq!(session.selected_layout(), LayoutVariant::VerticalStrip);
    }
}
