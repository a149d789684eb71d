//! Decoded photos.

use std::path::Path;
use std::sync::Arc;

use image::{imageops, RgbaImage};
use photobox_common::error::{PhotoboxError, PhotoboxResult};

/// An in-memory RGBA raster.
///
/// Pixels live behind an `Arc`, so clones are cheap and a `RawImage` can
/// never be modified after it is produced. Transformations return new images.
#[derive(Debug, Clone)]
pub struct RawImage {
    pixels: Arc<RgbaImage>,
}

impl RawImage {
    /// Wrap an already decoded buffer. Zero-sized buffers are rejected.
    pub fn from_rgba(pixels: RgbaImage) -> PhotoboxResult<Self> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(PhotoboxError::image_decode(format!(
                "image has zero size ({}x{})",
                pixels.width(),
                pixels.height()
            )));
        }
        Ok(Self {
            pixels: Arc::new(pixels),
        })
    }

    /// Decode an encoded image (PNG or JPEG).
    pub fn decode(bytes: &[u8]) -> PhotoboxResult<Self> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| PhotoboxError::image_decode(format!("Failed to decode image: {e}")))?;
        Self::from_rgba(decoded.to_rgba8())
    }

    /// Read and decode an image file.
    pub fn open(path: &Path) -> PhotoboxResult<Self> {
        if !path.exists() {
            return Err(PhotoboxError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let bytes = std::fs::read(path)?;
        Self::decode(&bytes).map_err(|e| match e {
            PhotoboxError::ImageDecode { message } => {
                PhotoboxError::image_decode(format!("{}: {message}", path.display()))
            }
            other => other,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width() as f64 / self.height() as f64
    }

    /// A horizontally flipped copy.
    ///
    /// Live previews are shown mirrored, so raw frames are flipped before
    /// storage to match what the subject saw.
    pub fn mirrored(&self) -> Self {
        Self {
            pixels: Arc::new(imageops::flip_horizontal(self.pixels.as_ref())),
        }
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}
