//! Capture configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the capture buffer and input scaling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Ring buffer capacity in frames (default: 32 * 1024)
    pub buffer_frames: usize,
    /// Input full-scale reference in host units (default: 5.0, a ±5 V path)
    pub reference_scale: f32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            buffer_frames: 32 * 1024,
            reference_scale: 5.0,
        }
    }
}

impl CaptureConfig {
    /// Create config with a custom ring capacity.
    pub fn with_buffer_frames(frames: usize) -> Self {
        Self {
            buffer_frames: frames.max(64), // minimum 64 frames
            ..Default::default()
        }
    }

    /// Drain worker wake interval for a given sample rate: half the time the
    /// buffer takes to fill at that rate. Never zero, so the worker always
    /// sleeps between drain cycles.
    pub fn drain_interval(&self, sample_rate: f64) -> Duration {
        let rate = sample_rate.max(1.0);
        let frames = self.buffer_frames.max(64); // minimum 64 frames
        Duration::from_secs_f64(frames as f64 / (2.0 * rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CaptureConfig::default();
        assert_eq!(config.buffer_frames, 32 * 1024);
        assert_eq!(config.reference_scale, 5.0);
    }

    #[test]
    fn test_minimum_buffer() {
        let config = CaptureConfig::with_buffer_frames(1);
        assert_eq!(config.buffer_frames, 64);
    }

    #[test]
    fn test_drain_interval_is_half_fill_time() {
        let config = CaptureConfig::with_buffer_frames(32 * 1024);
        let interval = config.drain_interval(48000.0);
        let expected = 32.0 * 1024.0 / (2.0 * 48000.0);
        assert!((interval.as_secs_f64() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_drain_interval_never_zero() {
        // Struct-literal construction can bypass the with_buffer_frames
        // clamp; the derived interval must still be a real sleep.
        let config = CaptureConfig {
            buffer_frames: 0,
            ..CaptureConfig::default()
        };
        assert!(config.drain_interval(48000.0) > Duration::ZERO);
    }
}
