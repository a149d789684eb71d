//! Live frame sources.

use std::path::Path;
use std::process::{Command, Stdio};

use photobox_common::error::{PhotoboxError, PhotoboxResult};
use photobox_frame_model::RawImage;

/// An exclusively owned camera handle.
///
/// `begin` acquires the device, `snapshot` grabs one frame as shown in the
/// live preview (mirroring is undone by the sequencer), `stop` releases it.
pub trait FrameSource: Send {
    fn begin(&mut self) -> PhotoboxResult<()>;

    fn snapshot(&mut self) -> PhotoboxResult<RawImage>;

    fn stop(&mut self) -> PhotoboxResult<()>;
}

/// Grabs single PNG frames from a V4L2 device through the `ffmpeg` binary.
#[derive(Debug, Clone)]
pub struct FfmpegWebcamSource {
    device: Option<String>,
    width: u32,
    height: u32,
    active_device: Option<String>,
}

impl FfmpegWebcamSource {
    /// `device` of `None` picks the most webcam-like `/dev/video*` node.
    pub fn new(device: Option<String>, width: u32, height: u32) -> Self {
        Self {
            device,
            width,
            height,
            active_device: None,
        }
    }

    pub fn active_device(&self) -> Option<&str> {
        self.active_device.as_deref()
    }

    fn capture_args(&self, device: &str) -> Vec<String> {
        let size = format!("{}x{}", self.width, self.height);
        [
            "-hide_banner",
            "-loglevel",
            "error",
            "-f",
            "video4linux2",
            "-video_size",
            size.as_str(),
            "-i",
            device,
            "-frames:v",
            "1",
            "-f",
            "image2pipe",
            "-vcodec",
            "png",
            "-",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }
}

impl FrameSource for FfmpegWebcamSource {
    fn begin(&mut self) -> PhotoboxResult<()> {
        if !command_exists("ffmpeg") {
            return Err(PhotoboxError::capture(
                "ffmpeg not found on PATH (install ffmpeg to use the webcam)",
            ));
        }

        let device = match &self.device {
            Some(device) => device.clone(),
            None => detect_default_webcam_device().ok_or_else(|| {
                PhotoboxError::capture(
                    "No webcam device found (expected /dev/video0 or another /dev/video* node)",
                )
            })?,
        };
        if !Path::new(&device).exists() {
            return Err(PhotoboxError::capture(format!(
                "Webcam device {device} does not exist"
            )));
        }

        tracing::info!(device = %device, width = self.width, height = self.height, "Webcam opened");
        self.active_device = Some(device);
        Ok(())
    }

    fn snapshot(&mut self) -> PhotoboxResult<RawImage> {
        let device = self
            .active_device
            .as_deref()
            .ok_or_else(|| PhotoboxError::capture("Webcam is not open"))?;

        let output = Command::new("ffmpeg")
            .args(self.capture_args(device))
            .stdin(Stdio::null())
            .output()
            .map_err(|e| PhotoboxError::capture(format!("Failed to run ffmpeg: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PhotoboxError::capture(format!(
                "ffmpeg could not read a frame from {device}: {}",
                stderr.trim()
            )));
        }

        RawImage::decode(&output.stdout)
    }

    fn stop(&mut self) -> PhotoboxResult<()> {
        if let Some(device) = self.active_device.take() {
            tracing::info!(device = %device, "Webcam released");
        }
        Ok(())
    }
}

/// Whether `binary` resolves on `PATH`.
pub fn command_exists(binary: &str) -> bool {
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

/// Pick the most webcam-like `/dev/videoN` node.
///
/// Nodes are scored from their sysfs name; ties keep the lowest index. When
/// no node carries a useful name the first existing one is returned.
pub fn detect_default_webcam_device() -> Option<String> {
    let mut best: Option<(String, u32)> = None;

    for idx in 0..16u32 {
        let dev_path = format!("/dev/video{idx}");
        if !Path::new(&dev_path).exists() {
            continue;
        }

        let name = std::fs::read_to_string(format!("/sys/class/video4linux/video{idx}/name"))
            .unwrap_or_default();
        let score = webcam_name_score(&name);
        if best.as_ref().map_or(true, |(_, s)| score > *s) {
            best = Some((dev_path, score));
        }
    }

    if let Some((device, score)) = &best {
        tracing::debug!(device = %device, score, "Selected webcam device");
    }
    best.map(|(device, _)| device)
}

fn webcam_name_score(name: &str) -> u32 {
    const WEBCAM: [&str; 7] = [
        "webcam", "camera", "cam", "facetime", "logitech", "uvc", "v4l2loopback",
    ];
    const NOT_WEBCAM: [&str; 5] = ["tuner", "tv", "dvb", "hdmi", "metadata"];

    let name = name.to_lowercase();
    if name.is_empty() {
        return 1;
    }
    if NOT_WEBCAM.iter().any(|k| name.contains(k)) {
        return 0;
    }
    if WEBCAM.iter().any(|k| name.contains(k)) {
        return 10;
    }
    2
}
