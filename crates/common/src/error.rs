//! Error types shared across Photobox crates.

use std::path::PathBuf;

/// Top-level error type for Photobox operations.
#[derive(Debug, thiserror::Error)]
pub enum PhotoboxError {
    #[error("Unknown theme: {id}")]
    UnknownTheme { id: String },

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Composition(#[from] CompositionError),

    #[error("Capture error: {message}")]
    Capture { message: String },

    #[error("Image decode error: {message}")]
    ImageDecode { message: String },

    #[error("Export error: {message}")]
    Export { message: String },

    #[error("Session error: {message}")]
    Session { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Geometry could not be computed for the requested inputs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("{variant} does not support {count} photos")]
    UnsupportedCount { count: usize, variant: &'static str },

    #[error("Source aspect ratio must be a positive number, got {ratio:?}")]
    InvalidAspectRatio { ratio: Option<f64> },

    #[error("Canvas of {width}x{height} exceeds the {max}px limit")]
    CanvasTooLarge { width: f64, height: f64, max: u32 },
}

/// The renderer's inputs disagree with each other.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompositionError {
    #[error("Got {images} images for a layout with {cells} cells")]
    ImageCountMismatch { images: usize, cells: usize },

    #[error("Layout produced an empty canvas")]
    EmptyCanvas,

    #[error("Canvas of {width}x{height} exceeds the {max}px limit")]
    CanvasTooLarge { width: u32, height: u32, max: u32 },
}

/// Result type alias using PhotoboxError.
pub type PhotoboxResult<T> = Result<T, PhotoboxError>;

impl PhotoboxError {
    pub fn unknown_theme(id: impl Into<String>) -> Self {
        Self::UnknownTheme { id: id.into() }
    }

    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture {
            message: msg.into(),
        }
    }

    pub fn image_decode(msg: impl Into<String>) -> Self {
        Self::ImageDecode {
            message: msg.into(),
        }
    }

    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export {
            message: msg.into(),
        }
    }

    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Whether the error came from the camera or from decoding a shot.
    ///
    /// These are reported to the user and recovered by resetting the session;
    /// everything else indicates a caller bug or an environment problem.
    pub fn is_session_recoverable(&self) -> bool {
        matches!(self, Self::Capture { .. } | Self::ImageDecode { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_error_converts_and_keeps_message() {
        let err: PhotoboxError = LayoutError::UnsupportedCount {
            count: 7,
            variant: "vertical-strip",
        }
        .into();
        assert_eq!(err.to_string(), "vertical-strip does not support 7 photos");
        assert!(!err.is_session_recoverable());
    }

    #[test]
    fn capture_and_decode_errors_are_recoverable() {
        assert!(PhotoboxError::capture("camera busy").is_session_recoverable());
        assert!(PhotoboxError::image_decode("truncated png").is_session_recoverable());
        assert!(!PhotoboxError::unknown_theme("sepia").is_session_recoverable());
    }
}
