//! Photobox Common Utilities
//!
//! Shared infrastructure for all Photobox crates:
//! - Error types and result aliases
//! - Timer abstraction for the capture countdown
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
