//! Photobox Render Engine
//!
//! Draws a composition from captured photos, computed geometry, and a theme,
//! then hands the finished raster to an exporter.
//!
//! # Draw Order
//!
//! ```text
//! background fill
//!       │
//!       ├── header title (centered in header band)
//!       │
//!       ├── per cell: border ring ──► photo stretched to the cell
//!       │
//!       ├── footer date (centered in footer band)
//!       │
//!       └── corner decorations (topmost)
//!                    │
//!                    ▼
//!           CompositionResult ──► Exporter (share / download)
//! ```

pub mod canvas;
pub mod compositor;
pub mod export;
pub mod studio;
pub mod text;

pub use compositor::{render, Captions, CompositionResult, Compositor};
pub use export::*;
pub use studio::Studio;
