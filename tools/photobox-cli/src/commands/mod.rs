pub mod check;
pub mod compose;
pub mod geometry;
pub mod shoot;
pub mod themes;

use std::path::PathBuf;

use photobox_common::config::AppConfig;
use photobox_frame_model::{LayoutVariant, ThemeId};
use photobox_render_engine::{
    export_with_fallback, DirectDownload, PlatformShare, ShareCapabilities, Studio,
};

/// Theme and layout from the flags, falling back to the config file.
pub fn selections(
    config: &AppConfig,
    theme: Option<&str>,
    layout: Option<&str>,
) -> anyhow::Result<(ThemeId, LayoutVariant)> {
    let theme = theme.unwrap_or(config.composition.theme.as_str()).parse()?;
    let layout = layout.unwrap_or(config.composition.layout.as_str()).parse()?;
    Ok((theme, layout))
}

pub fn share_exporter(config: &AppConfig) -> PlatformShare {
    config
        .export
        .share_command
        .as_deref()
        .map(PlatformShare::new)
        .unwrap_or_default()
}

/// Export the studio's composition and report where it went.
pub fn deliver(
    studio: &Studio,
    config: &AppConfig,
    output: Option<PathBuf>,
    share: bool,
) -> anyhow::Result<()> {
    let result = studio
        .composition()
        .ok_or_else(|| anyhow::anyhow!("Nothing has been composed yet"))?;

    let share_exporter = share_exporter(config);
    let download = DirectDownload::new(output.unwrap_or_else(|| config.output_dir.clone()));
    let caps = ShareCapabilities::probe(&share_exporter, share);

    let outcome = export_with_fallback(result, &caps, &share_exporter, &download)?;
    println!(
        "Composition {}x{} written to {}",
        result.width(),
        result.height(),
        outcome.path.display()
    );
    if let Some(hint) = outcome.hint.filter(|_| share) {
        println!("{hint}");
    }
    Ok(())
}
