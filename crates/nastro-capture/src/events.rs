//! Diagnostic events published by the capture session.

use crossbeam_channel::{bounded, Receiver, Sender};
use std::path::PathBuf;

/// Capacity of the diagnostic event queue.
const EVENT_QUEUE_CAPACITY: usize = 64;

/// Session lifecycle and drain diagnostics.
///
/// Events are best-effort: when the queue is full new events are discarded
/// rather than blocking the drain worker.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureEvent {
    /// Recording started to the given file.
    Started {
        /// Output path.
        path: PathBuf,
    },
    /// A drain cycle flushed this many frames to disk.
    Flushed {
        /// Frames written in this cycle.
        frames: usize,
    },
    /// The ring buffer was observed full.
    Overflow {
        /// The session's running dropped-frame total.
        dropped: u64,
    },
    /// The session stopped itself after an unrecoverable failure.
    Failed {
        /// User-facing description.
        message: String,
    },
    /// Recording stopped and the header was backpatched.
    Stopped {
        /// Total frames in the finished file.
        frames_written: u64,
    },
}

pub(crate) fn event_channel() -> (Sender<CaptureEvent>, Receiver<CaptureEvent>) {
    bounded(EVENT_QUEUE_CAPACITY)
}
