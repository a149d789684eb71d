//! Application configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory where composed images are downloaded to.
    pub output_dir: PathBuf,

    /// Capture sequence defaults.
    #[serde(default)]
    pub capture: CaptureDefaults,

    /// Composition defaults.
    #[serde(default)]
    pub composition: CompositionDefaults,

    /// Export defaults.
    #[serde(default)]
    pub export: ExportDefaults,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Default capture parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureDefaults {
    /// Number of photos per session.
    pub photo_count: usize,

    /// Countdown start value shown before each shot.
    pub countdown_start: u32,

    /// Countdown tick interval in milliseconds.
    pub tick_ms: u64,

    /// Flash overlay duration in milliseconds.
    pub flash_ms: u64,

    /// Delay after each shot before the next countdown, in milliseconds.
    pub settle_ms: u64,

    /// Video device path (e.g. `/dev/video0`). Autodetected when unset.
    pub device: Option<String>,

    /// Requested capture width.
    pub width: u32,

    /// Requested capture height.
    pub height: u32,
}

/// Default composition parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositionDefaults {
    /// Header text.
    pub title: String,

    /// Locale used for the footer date (e.g. "id_ID", "en_US").
    pub locale: String,

    /// Theme identifier.
    pub theme: String,

    /// Layout variant identifier.
    pub layout: String,
}

/// Default export parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportDefaults {
    /// Command used to hand a file to the platform share surface.
    pub share_command: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "photobox=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            capture: CaptureDefaults::default(),
            composition: CompositionDefaults::default(),
            export: ExportDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for CaptureDefaults {
    fn default() -> Self {
        Self {
            photo_count: 4,
            countdown_start: 3,
            tick_ms: 1000,
            flash_ms: 500,
            settle_ms: 1000,
            device: None,
            width: 1280,
            height: 720,
        }
    }
}

impl Default for CompositionDefaults {
    fn default() -> Self {
        Self {
            title: "PHOTOBOX MEMORIES".to_string(),
            locale: "id_ID".to_string(),
            theme: "simple-white".to_string(),
            layout: "natural-aspect-grid".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"));
    base.join("photobox").join("config.json")
}

/// Default download directory.
fn default_output_dir() -> PathBuf {
    std::env::var("XDG_PICTURES_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join("Pictures"))
        .join("photobox")
}

fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string()))
}
