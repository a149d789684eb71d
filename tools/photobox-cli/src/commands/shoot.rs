//! Take a countdown photo sequence with the webcam and compose it.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use photobox_capture_engine::{CaptureObserver, CaptureSequencer, FfmpegWebcamSource};
use photobox_common::clock::{SequenceTiming, TokioTimer};
use photobox_common::config::AppConfig;
use photobox_frame_model::CaptureSession;
use photobox_render_engine::{Captions, Studio};

pub struct ShootArgs {
    pub count: Option<usize>,
    pub theme: Option<String>,
    pub layout: Option<String>,
    pub device: Option<String>,
    pub output: Option<PathBuf>,
    pub share: bool,
}

/// Prints the countdown to the terminal.
struct TerminalObserver;

impl CaptureObserver for TerminalObserver {
    fn countdown(&mut self, shot: usize, total: usize, remaining: u32) {
        print!("\rPhoto {shot}/{total} in {remaining}... ");
        std::io::stdout().flush().ok();
    }

    fn flash(&mut self, _shot: usize, _duration: Duration) {
        print!("\r*** SNAP ***            ");
        std::io::stdout().flush().ok();
    }

    fn captured(&mut self, shot: usize, total: usize) {
        println!("\rPhoto {shot}/{total} captured.   ");
    }

    fn completed(&mut self) {
        println!("All photos taken.");
    }
}

pub async fn run(config: &AppConfig, args: ShootArgs) -> anyhow::Result<()> {
    let (theme, layout) = super::selections(config, args.theme.as_deref(), args.layout.as_deref())?;
    let count = args.count.unwrap_or(config.capture.photo_count);
    if !layout.supports(count) {
        anyhow::bail!(
            "{layout} supports {:?} photos, not {count}",
            layout.supported_counts()
        );
    }

    let mut session = CaptureSession::new(count)?;
    session.select_theme(theme);
    session.select_layout(layout);

    let source = FfmpegWebcamSource::new(
        args.device.or_else(|| config.capture.device.clone()),
        config.capture.width,
        config.capture.height,
    );
    let timing = SequenceTiming::from(&config.capture);

    println!("Taking {count} photos. Look at the camera!");
    let mut sequencer =
        CaptureSequencer::new(source, session, timing).with_observer(TerminalObserver);
    if let Err(e) = sequencer.run(&TokioTimer).await {
        if e.is_session_recoverable() {
            eprintln!("Capture failed: {e}. Run `photobox shoot` again to retry.");
        }
        return Err(e.into());
    }
    let session = sequencer.into_session();

    let captions = Captions::today(config.composition.title.clone(), &config.composition.locale)?;
    let mut studio = Studio::new(session, captions)?;
    studio.compose()?;
    super::deliver(&studio, config, args.output, args.share)
}
