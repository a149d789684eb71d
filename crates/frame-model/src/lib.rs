//! Photobox Frame Model
//!
//! The data every other crate agrees on:
//! - [`RawImage`]: one decoded, immutable photo
//! - [`ThemeId`] / [`ThemeSpec`]: the closed theme registry
//! - [`LayoutVariant`] / [`LayoutGeometry`]: layout selector and computed placements
//! - [`CaptureSession`]: the photos and selections for one booth session

pub mod geometry;
pub mod photo;
pub mod session;
pub mod theme;

pub use geometry::{Band, CellRect, LayoutGeometry, LayoutVariant, Point, MAX_CANVAS_DIMENSION};
pub use photo::RawImage;
pub use session::CaptureSession;
pub use theme::{resolve_theme, BorderPlacement, Rgb, ThemeId, ThemeSpec};
