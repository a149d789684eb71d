//! Photobox Capture Engine
//!
//! Acquires the photos of one session: a [`FrameSource`] supplies frames
//! from the camera and the [`CaptureSequencer`] runs the countdown, flash,
//! and capture cycle once per photo.
//!
//! # Sequence
//!
//! ```text
//! Idle ──begin──► Counting(3..1) ──► Flashing ──snapshot──► Waiting
//!                    ▲                                        │
//!                    └──────────── next shot ◄────────────────┤
//!                                                             │ last shot
//!                                                             ▼
//!                                                   Complete (camera released)
//! ```

pub mod sequencer;
pub mod source;

pub use sequencer::{CaptureObserver, CaptureSequencer, SequencerState, SilentObserver, Step};
pub use source::{command_exists, detect_default_webcam_device, FfmpegWebcamSource, FrameSource};
