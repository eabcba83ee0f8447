//! Record toggle, status indicator, and the UI-owned collaborators.

use crate::error::Result;
use crate::session::CaptureSession;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Blocking file-save prompt, owned by the UI layer.
pub trait SavePrompt {
    /// Returns the chosen path, or `None` when the user dismissed the
    /// prompt. `start_dir` is the directory of the previous recording.
    fn save_path(&self, start_dir: &Path) -> Option<PathBuf>;
}

/// Modal-style user-facing error reporting, owned by the UI layer.
///
/// The engine supplies message content only (operation plus underlying
/// error description); presentation is the host's concern. Reports can
/// arrive from the drain worker, so implementations must be thread-safe.
pub trait AlertSink: Send + Sync {
    /// Report one failure to the user.
    fn alert(&self, message: &str);
}

/// Persistable control-surface state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlState {
    /// Last chosen output path; seeds the next save prompt's directory.
    pub last_path: Option<PathBuf>,
}

/// The record button and lamp, mapped onto a capture session.
pub struct RecordToggle<const N: usize> {
    session: CaptureSession<N>,
    prompt: Box<dyn SavePrompt>,
}

impl<const N: usize> RecordToggle<N> {
    /// Wire a session to the UI's save prompt.
    pub fn new(session: CaptureSession<N>, prompt: Box<dyn SavePrompt>) -> Self {
        Self { session, prompt }
    }

    /// One press of the record button: idle starts, active stops.
    ///
    /// `sample_rate` is the engine's rate at the moment of the press; it is
    /// fixed for the recording it starts. Failures were already reported to
    /// the user by the session; the returned error is for host state.
    pub fn toggle(&mut self, sample_rate: u32) -> Result<()> {
        if self.session.is_recording() {
            self.session.stop()
        } else {
            self.session
                .start(self.prompt.as_ref(), sample_rate)
                .map(|_| ())
        }
    }

    /// Lamp value for the status indicator: 1.0 while recording.
    pub fn indicator(&self) -> f32 {
        if self.session.is_recording() {
            1.0
        } else {
            0.0
        }
    }

    /// Lock-free recording flag.
    pub fn is_recording(&self) -> bool {
        self.session.is_recording()
    }

    /// The underlying session.
    pub fn session(&self) -> &CaptureSession<N> {
        &self.session
    }

    /// The underlying session, mutably.
    pub fn session_mut(&mut self) -> &mut CaptureSession<N> {
        &mut self.session
    }

    /// State for host-side persistence.
    pub fn snapshot(&self) -> ControlState {
        ControlState {
            last_path: self.session.last_path().cloned(),
        }
    }

    /// Restore persisted state.
    pub fn restore(&mut self, state: ControlState) {
        self.session.set_last_path(state.last_path);
    }
}
