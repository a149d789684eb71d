//! Photobox Layout Core
//!
//! Turns `(photo count, layout variant, source aspect ratio)` into a
//! [`LayoutGeometry`](photobox_frame_model::LayoutGeometry):
//! - **Natural aspect grid:** two columns, cell height from the photo ratio
//! - **Fixed ratio grid:** two columns on a fixed 4:3 canvas
//! - **Vertical strip:** one column, canvas grows with the photo count
//!
//! This crate is pure computation: identical inputs always give identical
//! geometry, which is what the golden render tests rely on.

pub mod grid;
pub mod table;

pub use table::compute_geometry;
