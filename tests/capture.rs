//! Capture lifecycle integration tests.
//!
//! Drives a full session the way a host plugin would: prompt for a path,
//! ingest ticks, stop, then decode the finished WAV from disk.

use nastro::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;

struct FixedPrompt(PathBuf);

impl SavePrompt for FixedPrompt {
    fn save_path(&self, _start_dir: &Path) -> Option<PathBuf> {
        Some(self.0.clone())
    }
}

struct NullAlert;

impl AlertSink for NullAlert {
    fn alert(&self, _message: &str) {}
}

fn two_channel_session(buffer_frames: usize) -> CaptureSession<2> {
    let config = CaptureConfig {
        buffer_frames,
        ..CaptureConfig::default()
    };
    CaptureSession::new(config, Arc::new(NullAlert))
}

#[test]
fn test_end_to_end_two_channel_capture() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("take.wav");

    let mut session = two_channel_session(1024);
    let ingest = session.handle();

    let outcome = session.start(&FixedPrompt(path.clone()), 48000).unwrap();
    assert_eq!(outcome, StartOutcome::Started);
    assert!(session.is_recording());

    // 100 ticks of a ±2.5 V frame; the default 5 V reference scales it to
    // (0.5, -0.5) before conversion.
    for _ in 0..100 {
        ingest.ingest(&[2.5, -2.5]);
    }
    session.stop().unwrap();
    assert!(!session.is_recording());

    let mut reader = hound::WavReader::open(&path).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 48000);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(reader.len(), 200);

    let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    let expected_l = pcm::sample_to_i16(0.5);
    let expected_r = pcm::sample_to_i16(-0.5);
    for pair in samples.chunks(2) {
        assert_eq!(pair, &[expected_l, expected_r][..]);
    }

    let metrics = session.metrics();
    assert_eq!(metrics.frames_captured(), 100);
    assert_eq!(metrics.frames_written(), 100);
    assert_eq!(metrics.frames_dropped(), 0);
    assert_eq!(metrics.bytes_written(), 400);
}

#[test]
fn test_event_stream_reports_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.wav");

    let mut session = two_channel_session(1024);
    let ingest = session.handle();
    let events = session.events();

    session.start(&FixedPrompt(path.clone()), 48000).unwrap();
    for _ in 0..10 {
        ingest.ingest(&[1.0, -1.0]);
    }
    session.stop().unwrap();

    let seen: Vec<CaptureEvent> = events.try_iter().collect();
    assert!(matches!(
        seen.first(),
        Some(CaptureEvent::Started { path: p }) if *p == path
    ));
    assert!(matches!(
        seen.last(),
        Some(CaptureEvent::Stopped { frames_written: 10 })
    ));
}

#[test]
fn test_dropping_active_session_finalizes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("teardown.wav");

    {
        let mut session = two_channel_session(1024);
        let ingest = session.handle();
        session.start(&FixedPrompt(path.clone()), 44100).unwrap();
        for _ in 0..50 {
            ingest.ingest(&[5.0, -5.0]);
        }
        // Dropped while active: teardown must join the worker and
        // backpatch the header.
    }

    let reader = hound::WavReader::open(&path).unwrap();
    assert_eq!(reader.spec().sample_rate, 44100);
    assert_eq!(reader.len(), 100);
}

#[test]
fn test_threaded_producer_preserves_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ramp.wav");

    let config = CaptureConfig {
        buffer_frames: 4096,
        reference_scale: 1.0,
    };
    let mut session: CaptureSession<1> = CaptureSession::new(config, Arc::new(NullAlert));
    let ingest = session.handle();
    session.start(&FixedPrompt(path.clone()), 48000).unwrap();

    let producer = std::thread::spawn(move || {
        // i/32768 converts back to exactly i, making order checkable.
        for i in 0..2000u32 {
            ingest.ingest(&[i as f32 / 32768.0]);
        }
    });
    producer.join().unwrap();
    session.stop().unwrap();

    let mut reader = hound::WavReader::open(&path).unwrap();
    let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(samples.len(), 2000);
    for (i, &sample) in samples.iter().enumerate() {
        assert_eq!(sample as usize, i);
    }
    assert_eq!(session.metrics().frames_dropped(), 0);
}

#[test]
fn test_record_toggle_drives_lamp_and_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("toggle.wav");

    let session = two_channel_session(1024);
    let ingest = session.handle();
    let mut toggle = RecordToggle::new(session, Box::new(FixedPrompt(path.clone())));

    assert_eq!(toggle.indicator(), 0.0);
    toggle.toggle(48000).unwrap();
    assert_eq!(toggle.indicator(), 1.0);

    for _ in 0..10 {
        ingest.ingest(&[1.0, -1.0]);
    }

    toggle.toggle(48000).unwrap();
    assert_eq!(toggle.indicator(), 0.0);

    let reader = hound::WavReader::open(&path).unwrap();
    assert_eq!(reader.len(), 20);
}

#[test]
fn test_eight_channel_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("octo.wav");

    let mut session: CaptureSession<8> =
        CaptureSession::new(CaptureConfig::default(), Arc::new(NullAlert));
    let ingest = session.handle();
    session.start(&FixedPrompt(path.clone()), 48000).unwrap();

    let voltages = [5.0, -5.0, 2.5, -2.5, 0.0, 5.0, -5.0, 0.0];
    for _ in 0..25 {
        ingest.ingest(&voltages);
    }
    session.stop().unwrap();

    let mut reader = hound::WavReader::open(&path).unwrap();
    assert_eq!(reader.spec().channels, 8);
    assert_eq!(reader.len(), 200);

    let first_frame: Vec<i16> = reader
        .samples::<i16>()
        .take(8)
        .map(|s| s.unwrap())
        .collect();
    let expected: Vec<i16> = voltages.iter().map(|&v| pcm::sample_to_i16(v / 5.0)).collect();
    assert_eq!(first_frame, expected);
}
