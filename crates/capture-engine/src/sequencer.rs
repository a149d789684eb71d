//! Timed countdown capture sequencer.
//!
//! Each shot runs `Counting → Flashing → Waiting`; after the last shot the
//! sequencer enters `Complete` and releases the camera. Waits are returned to
//! the caller as [`Step::Wait`] so the state machine itself never sleeps.

use std::time::Duration;

use photobox_common::clock::{SequenceTiming, Timer};
use photobox_common::error::{PhotoboxError, PhotoboxResult};
use photobox_frame_model::CaptureSession;

use crate::source::FrameSource;

/// Where the sequence is. Shots are numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerState {
    Idle,
    Counting { shot: usize, remaining: u32 },
    Flashing { shot: usize },
    Waiting { shot: usize },
    Complete,
}

/// What the driver should do after one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Sleep for the duration, then advance again.
    Wait(Duration),
    /// Advance again immediately.
    Continue,
    /// The sequence reached `Complete`.
    Done,
}

/// UI hooks fired during a sequence. All default to no-ops.
pub trait CaptureObserver: Send {
    fn countdown(&mut self, _shot: usize, _total: usize, _remaining: u32) {}

    fn flash(&mut self, _shot: usize, _duration: Duration) {}

    fn captured(&mut self, _shot: usize, _total: usize) {}

    fn completed(&mut self) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentObserver;

impl CaptureObserver for SilentObserver {}

pub struct CaptureSequencer<S: FrameSource> {
    source: S,
    session: CaptureSession,
    timing: SequenceTiming,
    state: SequencerState,
    observer: Box<dyn CaptureObserver>,
    source_open: bool,
}

impl<S: FrameSource> CaptureSequencer<S> {
    pub fn new(source: S, session: CaptureSession, timing: SequenceTiming) -> Self {
        Self {
            source,
            session,
            timing,
            state: SequencerState::Idle,
            observer: Box::new(SilentObserver),
            source_open: false,
        }
    }

    pub fn with_observer(mut self, observer: impl CaptureObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    pub fn session(&self) -> &CaptureSession {
        &self.session
    }

    /// Hand the session over to the review stage.
    pub fn into_session(mut self) -> CaptureSession {
        self.release();
        self.session.take()
    }

    /// Perform exactly one state transition.
    pub fn advance(&mut self) -> PhotoboxResult<Step> {
        let total = self.session.target_count();

        match self.state {
            SequencerState::Idle => {
                if !self.session.images().is_empty() {
                    return Err(PhotoboxError::session(
                        "Session already holds photos; reset it before capturing",
                    ));
                }
                self.source.begin()?;
                self.source_open = true;
                tracing::info!(total, "Capture sequence started");
                self.state = SequencerState::Counting {
                    shot: 1,
                    remaining: self.timing.countdown_start,
                };
                Ok(Step::Continue)
            }
            SequencerState::Counting { shot, remaining: 0 } => {
                self.state = SequencerState::Flashing { shot };
                Ok(Step::Continue)
            }
            SequencerState::Counting { shot, remaining } => {
                self.observer.countdown(shot, total, remaining);
                self.state = SequencerState::Counting {
                    shot,
                    remaining: remaining - 1,
                };
                Ok(Step::Wait(self.timing.tick))
            }
            SequencerState::Flashing { shot } => {
                self.observer.flash(shot, self.timing.flash);
                let frame = match self.source.snapshot() {
                    Ok(frame) => frame,
                    Err(e) => return Err(self.fail(shot, e)),
                };
                if let Err(e) = self.session.push_image(frame.mirrored()) {
                    return Err(self.fail(shot, e));
                }
                self.observer.captured(shot, total);
                tracing::debug!(shot, total, "Photo captured");

                self.state = SequencerState::Waiting { shot };
                Ok(Step::Wait(self.timing.settle))
            }
            SequencerState::Waiting { shot } if shot >= total => {
                self.release();
                self.state = SequencerState::Complete;
                self.observer.completed();
                tracing::info!(photos = self.session.images().len(), "Capture sequence complete");
                Ok(Step::Done)
            }
            SequencerState::Waiting { shot } => {
                self.state = SequencerState::Counting {
                    shot: shot + 1,
                    remaining: self.timing.countdown_start,
                };
                Ok(Step::Continue)
            }
            SequencerState::Complete => Ok(Step::Done),
        }
    }

    /// Drive the sequence to `Complete`, sleeping on `timer` between steps.
    pub async fn run(&mut self, timer: &dyn Timer) -> PhotoboxResult<&CaptureSession> {
        loop {
            match self.advance()? {
                Step::Wait(duration) => timer.sleep(duration).await,
                Step::Continue => {}
                Step::Done => return Ok(&self.session),
            }
        }
    }

    /// Stop early: release the camera and drop the photos taken so far.
    pub fn abandon(&mut self) {
        self.release();
        self.session.reset();
        self.state = SequencerState::Idle;
        tracing::info!("Capture sequence abandoned");
    }

    fn fail(&mut self, shot: usize, error: PhotoboxError) -> PhotoboxError {
        tracing::warn!(shot, error = %error, "Capture failed, discarding session photos");
        self.release();
        self.session.reset();
        self.state = SequencerState::Idle;
        error
    }

    fn release(&mut self) {
        if !self.source_open {
            return;
        }
        self.source_open = false;
        if let Err(e) = self.source.stop() {
            tracing::warn!(error = %e, "Failed to release camera");
        }
    }
}

impl<S: FrameSource> Drop for CaptureSequencer<S> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use image::{Rgba, RgbaImage};
    use photobox_common::clock::SimulatedTimer;
    use photobox_frame_model::{LayoutVariant, RawImage, ThemeId};

    use super::*;

    #[derive(Default)]
    struct Log {
        begins: usize,
        stops: usize,
        snapshots: usize,
    }

    /// Each snapshot is a 2x1 frame whose left pixel encodes the shot number.
    struct ScriptedSource {
        log: Arc<Mutex<Log>>,
        fail_on: Option<usize>,
        fail_begin: bool,
    }

    impl ScriptedSource {
        fn new(log: &Arc<Mutex<Log>>) -> Self {
            Self {
                log: Arc::clone(log),
                fail_on: None,
                fail_begin: false,
            }
        }
    }

    impl FrameSource for ScriptedSource {
        fn begin(&mut self) -> PhotoboxResult<()> {
            if self.fail_begin {
                return Err(PhotoboxError::capture("permission denied"));
            }
            self.log.lock().unwrap().begins += 1;
            Ok(())
        }

        fn snapshot(&mut self) -> PhotoboxResult<RawImage> {
            let mut log = self.log.lock().unwrap();
            log.snapshots += 1;
            if self.fail_on == Some(log.snapshots) {
                return Err(PhotoboxError::capture("device unplugged"));
            }
            let mut frame = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 255]));
            frame.put_pixel(0, 0, Rgba([log.snapshots as u8, 0, 0, 255]));
            RawImage::from_rgba(frame)
        }

        fn stop(&mut self) -> PhotoboxResult<()> {
            self.log.lock().unwrap().stops += 1;
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<String>>>);

    impl CaptureObserver for Recorder {
        fn countdown(&mut self, shot: usize, _total: usize, remaining: u32) {
            self.0.lock().unwrap().push(format!("{shot}:{remaining}"));
        }

        fn flash(&mut self, shot: usize, _duration: Duration) {
            self.0.lock().unwrap().push(format!("{shot}:flash"));
        }

        fn captured(&mut self, shot: usize, total: usize) {
            self.0.lock().unwrap().push(format!("{shot}/{total}"));
        }

        fn completed(&mut self) {
            self.0.lock().unwrap().push("done".into());
        }
    }

    fn sequencer(source: ScriptedSource, count: usize) -> CaptureSequencer<ScriptedSource> {
        CaptureSequencer::new(
            source,
            CaptureSession::new(count).unwrap(),
            SequenceTiming::default(),
        )
    }

    #[tokio::test]
    async fn captures_in_order_with_mirrored_frames() {
        let log = Arc::new(Mutex::new(Log::default()));
        let mut seq = sequencer(ScriptedSource::new(&log), 4);

        let session = seq.run(&SimulatedTimer::new()).await.unwrap();
        assert_eq!(session.images().len(), 4);
        for (i, image) in session.images().iter().enumerate() {
            // Mirroring moves the marker pixel to the right.
            assert_eq!(image.pixels().get_pixel(1, 0)[0], i as u8 + 1);
            assert_eq!(image.pixels().get_pixel(0, 0)[0], 0);
        }
        assert_eq!(seq.state(), SequencerState::Complete);
    }

    #[tokio::test]
    async fn observer_sees_countdown_flash_capture_per_shot() {
        let log = Arc::new(Mutex::new(Log::default()));
        let recorder = Recorder::default();
        let mut seq = sequencer(ScriptedSource::new(&log), 3).with_observer(recorder.clone());

        seq.run(&SimulatedTimer::new()).await.unwrap();

        let events = recorder.0.lock().unwrap().join(" ");
        assert_eq!(
            events,
            "1:3 1:2 1:1 1:flash 1/3 \
             2:3 2:2 2:1 2:flash 2/3 \
             3:3 3:2 3:1 3:flash 3/3 done"
        );
    }

    #[tokio::test]
    async fn waits_follow_the_configured_timing() {
        let log = Arc::new(Mutex::new(Log::default()));
        let mut seq = sequencer(ScriptedSource::new(&log), 5);
        let timer = SimulatedTimer::new();

        seq.run(&timer).await.unwrap();

        let second = Duration::from_secs(1);
        let waits = timer.waits();
        assert_eq!(waits.len(), 5 * 4);
        assert!(waits.iter().all(|w| *w == second));
        assert_eq!(timer.elapsed(), SequenceTiming::default().cycle_duration() * 5);
    }

    #[tokio::test]
    async fn camera_is_released_exactly_once() {
        let log = Arc::new(Mutex::new(Log::default()));
        {
            let mut seq = sequencer(ScriptedSource::new(&log), 3);
            seq.run(&SimulatedTimer::new()).await.unwrap();
            assert_eq!(seq.advance().unwrap(), Step::Done);
            let session = seq.into_session();
            assert!(session.is_complete());
        }
        let log = log.lock().unwrap();
        assert_eq!((log.begins, log.stops, log.snapshots), (1, 1, 3));
    }

    #[tokio::test]
    async fn handing_over_keeps_photo_order_and_selections() {
        let log = Arc::new(Mutex::new(Log::default()));
        let mut session = CaptureSession::new(3).unwrap();
        session.select_theme(ThemeId::Neon);
        session.select_layout(LayoutVariant::VerticalStrip);
        let mut seq = CaptureSequencer::new(
            ScriptedSource::new(&log),
            session,
            SequenceTiming::default(),
        );

        seq.run(&SimulatedTimer::new()).await.unwrap();
        let session = seq.into_session();

        let markers: Vec<u8> = session
            .images()
            .iter()
            .map(|image| image.pixels().get_pixel(1, 0)[0])
            .collect();
        assert_eq!(markers, vec![1, 2, 3]);
        assert_eq!(session.selected_theme(), ThemeId::Neon);
        assert_eq!(session.selected_layout(), LayoutVariant::VerticalStrip);
        assert_eq!(log.lock().unwrap().stops, 1);
    }

    #[tokio::test]
    async fn zero_countdown_shoots_without_ticking() {
        let log = Arc::new(Mutex::new(Log::default()));
        let recorder = Recorder::default();
        let timing = SequenceTiming {
            countdown_start: 0,
            ..SequenceTiming::default()
        };
        let mut seq = CaptureSequencer::new(
            ScriptedSource::new(&log),
            CaptureSession::new(3).unwrap(),
            timing,
        )
        .with_observer(recorder.clone());
        let timer = SimulatedTimer::new();

        let session = seq.run(&timer).await.unwrap();
        assert!(session.is_complete());

        assert_eq!(
            recorder.0.lock().unwrap().join(" "),
            "1:flash 1/3 2:flash 2/3 3:flash 3/3 done"
        );
        assert_eq!(timer.waits(), vec![timing.settle; 3]);
        assert_eq!(timer.elapsed(), timing.cycle_duration() * 3);
    }

    #[tokio::test]
    async fn mid_sequence_failure_leaves_no_partial_session() {
        let log = Arc::new(Mutex::new(Log::default()));
        let mut source = ScriptedSource::new(&log);
        source.fail_on = Some(3);
        let mut seq = sequencer(source, 4);

        let err = seq.run(&SimulatedTimer::new()).await.unwrap_err();
        assert!(err.is_session_recoverable());
        assert!(seq.session().images().is_empty());
        assert_eq!(seq.state(), SequencerState::Idle);

        drop(seq);
        assert_eq!(log.lock().unwrap().stops, 1);
    }

    #[tokio::test]
    async fn denied_camera_never_starts() {
        let log = Arc::new(Mutex::new(Log::default()));
        let mut source = ScriptedSource::new(&log);
        source.fail_begin = true;
        let recorder = Recorder::default();
        let mut seq = sequencer(source, 3).with_observer(recorder.clone());

        assert!(matches!(
            seq.run(&SimulatedTimer::new()).await,
            Err(PhotoboxError::Capture { .. })
        ));
        assert!(recorder.0.lock().unwrap().is_empty());
        drop(seq);
        assert_eq!(log.lock().unwrap().stops, 0);
    }

    #[test]
    fn abandon_releases_and_resets() {
        let log = Arc::new(Mutex::new(Log::default()));
        let mut seq = sequencer(ScriptedSource::new(&log), 3);

        // Idle → Counting(3) → 3 ticks → Flashing → captured.
        for _ in 0..6 {
            seq.advance().unwrap();
        }
        assert_eq!(seq.session().images().len(), 1);

        seq.abandon();
        assert!(seq.session().images().is_empty());
        assert_eq!(seq.state(), SequencerState::Idle);
        drop(seq);
        assert_eq!(log.lock().unwrap().stops, 1);
    }
}
