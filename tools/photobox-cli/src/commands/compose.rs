//! Compose existing photos into one image.

use std::path::PathBuf;

use chrono::NaiveDate;
use photobox_common::config::AppConfig;
use photobox_frame_model::{CaptureSession, RawImage};
use photobox_render_engine::{Captions, Studio};

pub struct ComposeArgs {
    pub images: Vec<PathBuf>,
    pub theme: Option<String>,
    pub layout: Option<String>,
    pub output: Option<PathBuf>,
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
}

pub fn run(config: &AppConfig, args: ComposeArgs) -> anyhow::Result<()> {
    let (theme, layout) = super::selections(config, args.theme.as_deref(), args.layout.as_deref())?;

    let images = args
        .images
        .iter()
        .map(|path| RawImage::open(path))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::info!(count = images.len(), %theme, %layout, "Composing photos");

    let mut session = CaptureSession::from_images(images)?;
    session.select_theme(theme);
    session.select_layout(layout);

    let title = args
        .title
        .unwrap_or_else(|| config.composition.title.clone());
    let date = args
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let captions = Captions::dated(title, date, &config.composition.locale)?;

    let mut studio = Studio::new(session, captions)?;
    studio.compose()?;
    super::deliver(&studio, config, args.output, false)
}
