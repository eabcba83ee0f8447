//! Capture-to-disk engine for modular synthesizer plugins.
//!
//! Real-time frames go into a lock-protected ring buffer on every engine
//! tick; a background drain worker converts them to 16-bit PCM and streams
//! them to a WAV file.
//!
//! # Data flow
//!
//! ```text
//! audio thread ── IngestHandle::ingest ──▶ FrameRingBuffer
//!                                              │ drain_all (periodic)
//!                                              ▼
//!                                        drain worker ── pcm ──▶ WavSink ──▶ disk
//! ```
//!
//! The host UI reaches the engine through [`RecordToggle`] (or
//! [`CaptureSession`] directly) and reads the recording flag back for its
//! status lamp. The save prompt and error reporting stay on the host side
//! behind the [`SavePrompt`] and [`AlertSink`] collaborators.
//!
//! # Example
//!
//! ```ignore
//! use nastro_capture::{CaptureConfig, CaptureSession, RecordToggle};
//!
//! let session = CaptureSession::<2>::new(CaptureConfig::default(), alert);
//! let ingest = session.handle();          // lives on the audio thread
//! let mut toggle = RecordToggle::new(session, prompt);
//!
//! toggle.toggle(48_000)?;                 // record button pressed
//! // per engine tick:
//! ingest.ingest(&[left_volts, right_volts]);
//! toggle.toggle(48_000)?;                 // pressed again: flush + finalize
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod config;
pub use config::CaptureConfig;

pub mod control;
pub use control::{AlertSink, ControlState, RecordToggle, SavePrompt};

pub mod events;
pub use events::CaptureEvent;

pub mod metrics;
pub use metrics::CaptureMetrics;

pub mod session;
pub use session::{CaptureSession, IngestHandle, StartOutcome};

pub mod sink;
pub use sink::WavSink;

mod worker;
