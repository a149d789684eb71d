//! Review controller: owns the session and keeps the composition current.

use photobox_common::error::{PhotoboxError, PhotoboxResult};
use photobox_frame_model::{CaptureSession, LayoutVariant, ThemeId};
use photobox_layout_core::compute_geometry;

use crate::compositor::{Captions, CompositionResult, Compositor};

/// Holds the captured photos, the current selections and the latest render.
///
/// Changing the theme or layout re-renders only once a composition exists,
/// so the first render is always an explicit [`Studio::compose`].
pub struct Studio {
    compositor: Compositor,
    session: CaptureSession,
    captions: Captions,
    composition: Option<CompositionResult>,
}

impl Studio {
    pub fn new(session: CaptureSession, captions: Captions) -> PhotoboxResult<Self> {
        Ok(Self {
            compositor: Compositor::new()?,
            session,
            captions,
            composition: None,
        })
    }

    pub fn session(&self) -> &CaptureSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut CaptureSession {
        &mut self.session
    }

    pub fn composition(&self) -> Option<&CompositionResult> {
        self.composition.as_ref()
    }

    /// Render the current session with its selections.
    pub fn compose(&mut self) -> PhotoboxResult<&CompositionResult> {
        if !self.session.is_complete() {
            return Err(PhotoboxError::session(format!(
                "Cannot compose {} of {} photos",
                self.session.images().len(),
                self.session.target_count()
            )));
        }

        let layout = self.session.selected_layout();
        let geometry = compute_geometry(
            self.session.images().len(),
            layout,
            self.session.source_aspect_ratio(),
        )?;
        let theme = self.session.selected_theme().spec();
        let result =
            self.compositor
                .render(self.session.images(), &geometry, theme, &self.captions)?;

        Ok(self.composition.insert(result))
    }

    pub fn select_theme(&mut self, theme: ThemeId) -> PhotoboxResult<()> {
        self.session.select_theme(theme);
        self.refresh()
    }

    pub fn select_layout(&mut self, layout: LayoutVariant) -> PhotoboxResult<()> {
        self.session.select_layout(layout);
        self.refresh()
    }

    /// Drop the photos and the composition; selections are kept.
    pub fn reset(&mut self) {
        self.session.reset();
        self.composition = None;
    }

    fn refresh(&mut self) -> PhotoboxResult<()> {
        if self.composition.is_some() {
            self.compose()?;
        }
        Ok(())
    }
}
