//! Export of finished compositions: direct download or platform share.
//!
//! The choice between the two is a pure function of [`ShareCapabilities`];
//! the side-effecting part lives behind the [`Exporter`] trait so the
//! fallback policy can be exercised without touching the desktop.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use photobox_common::error::{PhotoboxError, PhotoboxResult};

use crate::compositor::CompositionResult;

/// File name used for shared compositions.
pub const SHARE_FILE_NAME: &str = "photobox_memories.png";

const MOBILE_HINT: &str =
    "Photo saved! Open Instagram, tap '+' and pick the photo from your gallery.";
const DESKTOP_HINT: &str = "Photo saved! Transfer it to your phone and upload it to Instagram.";

/// Which exporter a composition goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportTarget {
    PlatformShare,
    DirectDownload,
}

/// What the running platform can do with a file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShareCapabilities {
    /// The user is on a handheld device.
    pub mobile: bool,
    /// A share mechanism exists at all.
    pub share_api: bool,
    /// The share mechanism accepts image files.
    pub can_share_files: bool,
}

impl ShareCapabilities {
    /// Capabilities on this machine when the user asked to share.
    ///
    /// `prefer_share` stands in for the handheld check: a desktop build only
    /// shares when explicitly requested.
    pub fn probe(share: &dyn Exporter, prefer_share: bool) -> Self {
        let available = share.is_available();
        Self {
            mobile: prefer_share,
            share_api: available,
            can_share_files: available,
        }
    }
}

/// Prefer sharing only when every capability is present.
pub fn select_export_target(caps: &ShareCapabilities) -> ExportTarget {
    if caps.mobile && caps.share_api && caps.can_share_files {
        ExportTarget::PlatformShare
    } else {
        ExportTarget::DirectDownload
    }
}

/// Result of a completed export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub target: ExportTarget,
    pub path: PathBuf,
    /// Follow-up advice shown after a download.
    pub hint: Option<String>,
}

/// A destination for compositions.
pub trait Exporter {
    fn name(&self) -> &'static str;

    fn is_available(&self) -> bool;

    fn export(&self, result: &CompositionResult, file_name: &str) -> PhotoboxResult<ExportOutcome>;
}

/// Writes the PNG into a directory.
#[derive(Debug, Clone)]
pub struct DirectDownload {
    pub output_dir: PathBuf,
}

impl DirectDownload {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// `photobox-<unix millis>.png`
    pub fn timestamped_file_name() -> String {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        format!("photobox-{millis}.png")
    }
}

impl Exporter for DirectDownload {
    fn name(&self) -> &'static str {
        "download"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn export(&self, result: &CompositionResult, file_name: &str) -> PhotoboxResult<ExportOutcome> {
        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(file_name);
        write_png(result, &path)?;

        tracing::info!(path = %path.display(), "Saved composition");
        Ok(ExportOutcome {
            target: ExportTarget::DirectDownload,
            path,
            hint: None,
        })
    }
}

/// Hands the PNG to a desktop share/open command.
#[derive(Debug, Clone)]
pub struct PlatformShare {
    pub command: String,
    pub staging_dir: PathBuf,
}

impl PlatformShare {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            staging_dir: std::env::temp_dir().join("photobox-share"),
        }
    }
}

impl Default for PlatformShare {
    fn default() -> Self {
        Self::new("xdg-open")
    }
}

impl Exporter for PlatformShare {
    fn name(&self) -> &'static str {
        "share"
    }

    fn is_available(&self) -> bool {
        command_exists(&self.command)
    }

    fn export(&self, result: &CompositionResult, file_name: &str) -> PhotoboxResult<ExportOutcome> {
        std::fs::create_dir_all(&self.staging_dir)?;
        let path = self.staging_dir.join(file_name);
        write_png(result, &path)?;

        let status = Command::new(&self.command)
            .arg(&path)
            .status()
            .map_err(|e| PhotoboxError::export(format!("Failed to run {}: {e}", self.command)))?;
        if !status.success() {
            return Err(PhotoboxError::export(format!(
                "{} exited with {status}",
                self.command
            )));
        }

        tracing::info!(command = %self.command, path = %path.display(), "Shared composition");
        Ok(ExportOutcome {
            target: ExportTarget::PlatformShare,
            path,
            hint: None,
        })
    }
}

/// Share when the platform allows it, otherwise (or when sharing fails)
/// download. Each exporter is attempted at most once.
pub fn export_with_fallback(
    result: &CompositionResult,
    caps: &ShareCapabilities,
    share: &dyn Exporter,
    download: &dyn Exporter,
) -> PhotoboxResult<ExportOutcome> {
    if select_export_target(caps) == ExportTarget::PlatformShare {
        match share.export(result, SHARE_FILE_NAME) {
            Ok(outcome) => return Ok(outcome),
            Err(e) => tracing::warn!(
                exporter = share.name(),
                error = %e,
                "Share failed, falling back to download"
            ),
        }
    }

    let mut outcome = download.export(result, &DirectDownload::timestamped_file_name())?;
    let hint = if caps.mobile { MOBILE_HINT } else { DESKTOP_HINT };
    outcome.hint = Some(hint.to_string());
    Ok(outcome)
}

fn write_png(result: &CompositionResult, path: &Path) -> PhotoboxResult<()> {
    std::fs::write(path, result.encode_png()?)?;
    Ok(())
}

fn command_exists(binary: &str) -> bool {
    // Passed as a positional parameter so the name is never parsed as shell.
    Command::new("sh")
        .arg("-c")
        .arg("command -v \"$1\" >/dev/null 2>&1")
        .arg("sh")
        .arg(binary)
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use image::{Rgba, RgbaImage};
    use photobox_frame_model::{LayoutVariant, RawImage, ThemeId};
    use photobox_layout_core::compute_geometry;

    use super::*;
    use crate::compositor::{render, Captions};

    struct Scripted {
        name: &'static str,
        fail: bool,
        calls: Cell<usize>,
    }

    impl Scripted {
        fn new(name: &'static str, fail: bool) -> Self {
            Self {
                name,
                fail,
                calls: Cell::new(0),
            }
        }
    }

    impl Exporter for Scripted {
        fn name(&self) -> &'static str {
            self.name
        }

        fn is_available(&self) -> bool {
            true
        }

        fn export(&self, _: &CompositionResult, file_name: &str) -> PhotoboxResult<ExportOutcome> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(PhotoboxError::export("scripted failure"));
            }
            Ok(ExportOutcome {
                target: if self.name == "share" {
                    ExportTarget::PlatformShare
                } else {
                    ExportTarget::DirectDownload
                },
                path: PathBuf::from(file_name),
                hint: None,
            })
        }
    }

    fn composition() -> CompositionResult {
        let geometry = compute_geometry(3, LayoutVariant::VerticalStrip, Some(1.0)).unwrap();
        let photo =
            RawImage::from_rgba(RgbaImage::from_pixel(8, 8, Rgba([200, 10, 10, 255]))).unwrap();
        let captions = Captions {
            title: "T".into(),
            footer: "F".into(),
        };
        render(&vec![photo; 3], &geometry, ThemeId::SimpleWhite.spec(), &captions).unwrap()
    }

    const ALL: ShareCapabilities = ShareCapabilities {
        mobile: true,
        share_api: true,
        can_share_files: true,
    };

    #[test]
    fn share_requires_every_capability() {
        assert_eq!(select_export_target(&ALL), ExportTarget::PlatformShare);
        for caps in [
            ShareCapabilities { mobile: false, ..ALL },
            ShareCapabilities { share_api: false, ..ALL },
            ShareCapabilities { can_share_files: false, ..ALL },
            ShareCapabilities::default(),
        ] {
            assert_eq!(select_export_target(&caps), ExportTarget::DirectDownload);
        }
    }

    #[test]
    fn successful_share_skips_download() {
        let share = Scripted::new("share", false);
        let download = Scripted::new("download", false);

        let outcome = export_with_fallback(&composition(), &ALL, &share, &download).unwrap();
        assert_eq!(outcome.target, ExportTarget::PlatformShare);
        assert_eq!(outcome.path, PathBuf::from(SHARE_FILE_NAME));
        assert_eq!(outcome.hint, None);
        assert_eq!((share.calls.get(), download.calls.get()), (1, 0));
    }

    #[test]
    fn failed_share_downloads_exactly_once() {
        let share = Scripted::new("share", true);
        let download = Scripted::new("download", false);

        let outcome = export_with_fallback(&composition(), &ALL, &share, &download).unwrap();
        assert_eq!(outcome.target, ExportTarget::DirectDownload);
        assert_eq!(outcome.hint.as_deref(), Some(MOBILE_HINT));
        assert_eq!((share.calls.get(), download.calls.get()), (1, 1));
    }

    #[test]
    fn desktop_never_attempts_share() {
        let share = Scripted::new("share", false);
        let download = Scripted::new("download", false);
        let caps = ShareCapabilities { mobile: false, ..ALL };

        let outcome = export_with_fallback(&composition(), &caps, &share, &download).unwrap();
        assert_eq!(outcome.hint.as_deref(), Some(DESKTOP_HINT));
        assert_eq!(share.calls.get(), 0);
        assert!(outcome
            .path
            .to_string_lossy()
            .starts_with("photobox-"));
    }

    #[test]
    fn download_failure_is_surfaced() {
        let share = Scripted::new("share", true);
        let download = Scripted::new("download", true);
        let err = export_with_fallback(&composition(), &ALL, &share, &download).unwrap_err();
        assert!(matches!(err, PhotoboxError::Export { .. }));
        assert_eq!(download.calls.get(), 1);
    }

    #[test]
    fn direct_download_writes_a_decodable_png() {
        let dir = std::env::temp_dir().join(format!("photobox-export-{}", std::process::id()));
        let result = composition();

        let outcome = DirectDownload::new(&dir)
            .export(&result, "strip.png")
            .unwrap();
        let decoded = RawImage::open(&outcome.path).unwrap();
        assert_eq!(
            (decoded.width(), decoded.height()),
            (result.width(), result.height())
        );

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn missing_share_command_is_unavailable() {
        let share = PlatformShare::new("photobox-no-such-share-tool");
        assert!(!share.is_available());
        assert!(!ShareCapabilities::probe(&share, true).share_api);
    }

    #[test]
    fn share_command_with_shell_syntax_is_unavailable() {
        assert!(PlatformShare::new("sh").is_available());
        for command in ["photobox-no-such-share-tool || true", "sh; true", "gio open"] {
            let share = PlatformShare::new(command);
            assert!(!share.is_available(), "{command:?} reported available");
            assert_eq!(
                select_export_target(&ShareCapabilities::probe(&share, true)),
                ExportTarget::DirectDownload
            );
        }
    }
}
