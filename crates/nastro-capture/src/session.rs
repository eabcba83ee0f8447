//! Capture session lifecycle and the real-time ingest handle.

use crate::config::CaptureConfig;
use crate::control::{AlertSink, SavePrompt};
use crate::error::{Error, Result};
use crate::events::{event_channel, CaptureEvent};
use crate::metrics::CaptureMetrics;
use crate::sink::WavSink;
use crate::worker;
use crossbeam_channel::{Receiver, Sender};
use nastro_core::{FrameRingBuffer, SampleFrame};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

/// Outcome of a start attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// Recording is now active.
    Started,
    /// The save prompt was dismissed; the session stays idle.
    Cancelled,
    /// A recording was already active; nothing changed.
    AlreadyActive,
}

/// State shared between the session, the ingest handle and the drain worker.
pub(crate) struct SessionShared<const N: usize> {
    pub(crate) active: AtomicBool,
    pub(crate) ring: FrameRingBuffer<N>,
    pub(crate) metrics: CaptureMetrics,
    reference_scale: f32,
}

/// Orchestrates one recording at a time: owns the ring buffer, the WAV sink
/// handoff and the background drain worker.
///
/// The session lives with the control layer; the audio thread holds an
/// [`IngestHandle`] and never touches the session itself. Exactly two
/// threads run per active recording: the host's tick caller and the drain
/// worker the session spawns on `start` and joins on `stop`.
pub struct CaptureSession<const N: usize> {
    shared: Arc<SessionShared<N>>,
    worker: Option<JoinHandle<Result<()>>>,
    config: CaptureConfig,
    alert: Arc<dyn AlertSink>,
    events_tx: Sender<CaptureEvent>,
    events_rx: Receiver<CaptureEvent>,
    last_path: Option<PathBuf>,
}

impl<const N: usize> CaptureSession<N> {
    /// Create an idle session. `alert` is the UI-owned error reporter; it
    /// is also handed to the drain worker for mid-session failures.
    pub fn new(config: CaptureConfig, alert: Arc<dyn AlertSink>) -> Self {
        let (events_tx, events_rx) = event_channel();
        Self {
            shared: Arc::new(SessionShared {
                active: AtomicBool::new(false),
                ring: FrameRingBuffer::new(config.buffer_frames),
                metrics: CaptureMetrics::default(),
                reference_scale: config.reference_scale,
            }),
            worker: None,
            config,
            alert,
            events_tx,
            events_rx,
            last_path: None,
        }
    }

    /// Handle for the real-time producer.
    pub fn handle(&self) -> IngestHandle<N> {
        IngestHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Lock-free recording flag; what the status indicator reads.
    pub fn is_recording(&self) -> bool {
        self.shared.active.load(Ordering::SeqCst)
    }

    /// Session lifetime counters.
    pub fn metrics(&self) -> &CaptureMetrics {
        &self.shared.metrics
    }

    /// Diagnostic event stream; drain with `try_iter` at UI rate.
    pub fn events(&self) -> Receiver<CaptureEvent> {
        self.events_rx.clone()
    }

    /// Last chosen output path, if any.
    pub fn last_path(&self) -> Option<&PathBuf> {
        self.last_path.as_ref()
    }

    /// Seed the save prompt's starting directory, e.g. from persisted state.
    pub fn set_last_path(&mut self, path: Option<PathBuf>) {
        self.last_path = path;
    }

    /// Begin recording at the engine's current sample rate.
    ///
    /// Resolves the output path through `prompt`; a dismissed prompt is not
    /// an error. An open failure is reported through the alert collaborator
    /// and returned, and the session stays idle. Starting while already
    /// active is a no-op: no second worker, no re-opened sink.
    ///
    /// `sample_rate` is fixed for the recording this starts; a later engine
    /// rate change applies to the next recording.
    pub fn start(&mut self, prompt: &dyn SavePrompt, sample_rate: u32) -> Result<StartOutcome> {
        if self.is_recording() {
            return Ok(StartOutcome::AlreadyActive);
        }
        // A worker that stopped itself on a write failure is still parked
        // in the handle; reap it before starting over.
        if let Err(e) = self.reap_worker() {
            tracing::debug!("previous drain worker exited with: {e}");
        }

        let start_dir = self
            .last_path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let Some(path) = prompt.save_path(&start_dir) else {
            return Ok(StartOutcome::Cancelled);
        };

        let sink = match WavSink::create(&path, sample_rate, N as u16) {
            Ok(sink) => sink,
            Err(e) => {
                self.alert.alert(&e.to_string());
                return Err(e);
            }
        };
        tracing::info!(path = %path.display(), sample_rate, "recording started");
        self.last_path = Some(path.clone());

        self.shared.ring.clear();
        self.shared.active.store(true, Ordering::SeqCst);

        let interval = self.config.drain_interval(sample_rate as f64);
        match worker::spawn(
            Arc::clone(&self.shared),
            sink,
            interval,
            Arc::clone(&self.alert),
            self.events_tx.clone(),
        ) {
            Ok(handle) => {
                self.worker = Some(handle);
                let _ = self.events_tx.try_send(CaptureEvent::Started { path });
                Ok(StartOutcome::Started)
            }
            Err(e) => {
                self.shared.active.store(false, Ordering::SeqCst);
                self.alert.alert(&e.to_string());
                Err(e)
            }
        }
    }

    /// Stop recording: clear the active flag, then join the drain worker.
    ///
    /// The worker flushes any residual frames and backpatches the header
    /// before it exits, so a successful return means the file on disk is
    /// complete. Blocks for at most one wake interval plus one write; an
    /// in-flight blocking write is waited out, not cancelled. Stopping an
    /// idle session is a no-op.
    pub fn stop(&mut self) -> Result<()> {
        self.shared.active.store(false, Ordering::SeqCst);
        self.reap_worker()
    }

    fn reap_worker(&mut self) -> Result<()> {
        let Some(handle) = self.worker.take() else {
            return Ok(());
        };
        match handle.join() {
            Ok(result) => result,
            Err(_) => Err(Error::WorkerPanicked),
        }
    }
}

impl<const N: usize> Drop for CaptureSession<N> {
    /// Dropping an active session forces a stop: the worker is joined and
    /// the file finalized on every exit path.
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            tracing::error!("capture session teardown: {e}");
        }
    }
}

/// Real-time producer handle: one frame per engine tick.
///
/// Cheap to clone. Nothing on this path blocks, sleeps or performs I/O;
/// the only wait is the ring buffer's short index lock.
#[derive(Clone)]
pub struct IngestHandle<const N: usize> {
    shared: Arc<SessionShared<N>>,
}

impl<const N: usize> IngestHandle<N> {
    /// Ingest the current tick's per-channel voltages.
    ///
    /// A no-op while idle (a single lock-free flag read). While recording,
    /// rescales by the configured reference and pushes one frame; a full
    /// buffer drops the frame and counts it, never waits.
    pub fn ingest(&self, voltages: &[f32; N]) {
        if !self.shared.active.load(Ordering::SeqCst) {
            return;
        }
        let frame = SampleFrame::from_scaled(voltages, self.shared.reference_scale);
        if self.shared.ring.push(frame) {
            self.shared.metrics.record_captured(1);
        } else {
            self.shared.metrics.record_dropped(1);
        }
    }

    /// Lock-free recording flag.
    pub fn is_recording(&self) -> bool {
        self.shared.active.load(Ordering::SeqCst)
    }
}
