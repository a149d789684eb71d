//! Check webcam and share support.

use photobox_capture_engine::{command_exists, detect_default_webcam_device};
use photobox_common::config::AppConfig;
use photobox_render_engine::Exporter;

pub fn run(config: &AppConfig) -> anyhow::Result<()> {
    println!("Photobox System Check");
    println!("{}", "=".repeat(50));

    let ffmpeg = command_exists("ffmpeg");
    report(ffmpeg, "ffmpeg", "install ffmpeg to capture from the webcam");

    let device = config
        .capture
        .device
        .clone()
        .or_else(detect_default_webcam_device);
    match &device {
        Some(device) if std::path::Path::new(device).exists() => {
            println!("[OK] Webcam: {device}")
        }
        Some(device) => println!("[MISSING] Webcam: {device} does not exist"),
        None => println!("[MISSING] Webcam: no /dev/video* node (connect a camera)"),
    }

    let share = super::share_exporter(config);
    report(
        share.is_available(),
        &format!("Share command ({})", share.command),
        "set export.share_command in the config file; photos are still saved",
    );

    println!("[OK] Output directory: {}", config.output_dir.display());

    println!();
    if ffmpeg && device.is_some() {
        println!("Ready to shoot.");
    } else {
        println!("`photobox shoot` is unavailable; `photobox compose` still works.");
    }

    Ok(())
}

fn report(ok: bool, what: &str, fix: &str) {
    if ok {
        println!("[OK] {what}");
    } else {
        println!("[MISSING] {what}: {fix}");
    }
}
