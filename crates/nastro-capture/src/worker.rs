//! Background drain worker: ring buffer to WAV sink.

use crate::control::AlertSink;
use crate::error::{Error, Result};
use crate::events::CaptureEvent;
use crate::session::SessionShared;
use crate::sink::WavSink;
use crossbeam_channel::Sender;
use nastro_core::pcm;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use thread_priority::ThreadPriority;

/// Spawn the drain worker for one recording.
///
/// The worker is the only entity allowed to block: it sleeps between
/// drain cycles and does all file I/O. The session joins the returned
/// handle on stop.
pub(crate) fn spawn<const N: usize>(
    shared: Arc<SessionShared<N>>,
    sink: WavSink,
    interval: Duration,
    alert: Arc<dyn AlertSink>,
    events: Sender<CaptureEvent>,
) -> Result<JoinHandle<Result<()>>> {
    thread::Builder::new()
        .name("nastro-drain".into())
        .spawn(move || {
            let _ = thread_priority::set_current_thread_priority(ThreadPriority::Max);
            drain_loop(&shared, sink, interval, &alert, &events)
        })
        .map_err(Error::Io)
}

/// Wake at the configured interval, flush everything buffered, and after
/// the active flag clears drain once more before backpatching the header.
///
/// Failures are caught here at the worker boundary: a failed append clears
/// the active flag, reports through the alert collaborator, and ends the
/// recording. Nothing propagates to the real-time thread.
fn drain_loop<const N: usize>(
    shared: &SessionShared<N>,
    mut sink: WavSink,
    interval: Duration,
    alert: &Arc<dyn AlertSink>,
    events: &Sender<CaptureEvent>,
) -> Result<()> {
    let mut pcm_scratch: Vec<i16> = Vec::with_capacity(shared.ring.capacity() * N);

    loop {
        let active = shared.active.load(Ordering::SeqCst);
        if active {
            thread::sleep(interval);
        }

        if shared.ring.full() {
            tracing::warn!(
                capacity = shared.ring.capacity(),
                "capture buffer overflow; disk writes are not keeping up"
            );
            let _ = events.try_send(CaptureEvent::Overflow {
                dropped: shared.metrics.frames_dropped(),
            });
        }

        let frames = shared.ring.drain_all();
        if !frames.is_empty() {
            pcm_scratch.clear();
            pcm::write_frames_i16(&frames, &mut pcm_scratch);
            tracing::debug!(frames = frames.len(), "writing frames to disk");
            if let Err(e) = sink.append(&pcm_scratch) {
                shared.active.store(false, Ordering::SeqCst);
                alert.alert(&e.to_string());
                let _ = events.try_send(CaptureEvent::Failed {
                    message: e.to_string(),
                });
                let _ = sink.finalize();
                return Err(e);
            }
            shared
                .metrics
                .record_write(frames.len() as u64, pcm_scratch.len() as u64 * 2);
            let _ = events.try_send(CaptureEvent::Flushed {
                frames: frames.len(),
            });
        }

        if !active {
            break;
        }
    }

    let frames_written = sink.frames_written();
    if let Err(e) = sink.finalize() {
        alert.alert(&e.to_string());
        let _ = events.try_send(CaptureEvent::Failed {
            message: e.to_string(),
        });
        return Err(e);
    }
    tracing::info!(frames = frames_written, "recording stopped");
    let _ = events.try_send(CaptureEvent::Stopped { frames_written });
    Ok(())
}
