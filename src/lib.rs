//! # nastro - capture-to-disk recording for modular synth plugins
//!
//! Umbrella crate coordinating:
//! - **nastro-core** - frame primitives, PCM conversion, the capture ring buffer
//! - **nastro-capture** - capture session, drain worker, WAV sink, control surface
//!
//! ## Architecture
//!
//! ```text
//!        host UI                       audio thread
//!           │                               │ one frame per tick
//!           ▼                               ▼
//!     ┌──────────────┐  handle()   ┌────────────────┐
//!     │ RecordToggle │────────────▶│  IngestHandle  │
//!     │ (start/stop) │             └────────────────┘
//!     └──────────────┘                      │ push (never blocks)
//!           │                               ▼
//!           │ spawn/join            ┌────────────────┐
//!           │                       │ FrameRingBuffer│
//!           ▼                       └────────────────┘
//!     ┌──────────────┐   drain_all (periodic) │
//!     │ drain worker │◀───────────────────────┘
//!     └──────────────┘
//!           │ 16-bit PCM
//!           ▼
//!     ┌──────────────┐
//!     │   WavSink    │──▶ disk
//!     └──────────────┘
//! ```
//!
//! ## Quick start
//!
//! ```ignore
//! use nastro::prelude::*;
//!
//! let session = CaptureSession::<2>::new(CaptureConfig::default(), alert);
//! let ingest = session.handle();      // hand this to the audio thread
//! let mut toggle = RecordToggle::new(session, prompt);
//!
//! toggle.toggle(48_000)?;             // record button: start
//! // per engine tick:
//! ingest.ingest(&[left_volts, right_volts]);
//! toggle.toggle(48_000)?;             // record button: stop + finalize
//! ```
//!
//! ## Feature flags
//!
//! - `default` - full capture engine
//! - `capture` - session, worker, sink, control surface (on by default;
//!   disable for the bare primitives)

/// Re-export of nastro-core for direct access
pub use nastro_core as core;

/// Re-export of nastro-capture for direct access
#[cfg(feature = "capture")]
pub use nastro_capture as capture;

// Core primitives
pub use nastro_core::{pcm, FrameRingBuffer, SampleFrame};

// Capture engine
#[cfg(feature = "capture")]
pub use nastro_capture::{
    AlertSink, CaptureConfig, CaptureEvent, CaptureMetrics, CaptureSession, ControlState, Error,
    IngestHandle, RecordToggle, Result, SavePrompt, StartOutcome, WavSink,
};

/// Commonly used types.
pub mod prelude {
    pub use crate::{pcm, FrameRingBuffer, SampleFrame};

    #[cfg(feature = "capture")]
    pub use crate::{
        AlertSink, CaptureConfig, CaptureEvent, CaptureSession, IngestHandle, RecordToggle,
        SavePrompt, StartOutcome,
    };
}
