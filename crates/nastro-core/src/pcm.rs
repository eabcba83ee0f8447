//! Float to 16-bit PCM conversion.

use crate::frame::SampleFrame;

/// Convert one normalized sample to signed 16-bit PCM.
///
/// Scales by 32768 and rounds half away from zero (`f32::round`), then
/// saturates to `[-32768, 32767]`: a transient over clips to full scale
/// instead of wrapping into an audible artifact.
#[inline]
pub fn sample_to_i16(sample: f32) -> i16 {
    let scaled = (sample * 32768.0).round();
    scaled.clamp(i16::MIN as f32, i16::MAX as f32) as i16
}

/// Interleave a drained frame batch into `out` as 16-bit PCM.
///
/// Appends `frames.len() * N` samples in frame order, channels innermost.
/// The caller clears and reuses the scratch buffer between drain cycles.
pub fn write_frames_i16<const N: usize>(frames: &[SampleFrame<N>], out: &mut Vec<i16>) {
    out.reserve(frames.len() * N);
    for frame in frames {
        for &sample in frame.samples() {
            out.push(sample_to_i16(sample));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_to_i16_endpoints() {
        assert_eq!(sample_to_i16(0.0), 0);
        assert_eq!(sample_to_i16(1.0), 32767);
        assert_eq!(sample_to_i16(-1.0), -32768);
    }

    #[test]
    fn test_sample_to_i16_saturates() {
        assert_eq!(sample_to_i16(2.0), 32767);
        assert_eq!(sample_to_i16(-2.0), -32768);
        assert_eq!(sample_to_i16(f32::INFINITY), 32767);
        assert_eq!(sample_to_i16(f32::NEG_INFINITY), -32768);
    }

    #[test]
    fn test_sample_to_i16_midscale_rounding() {
        assert_eq!(sample_to_i16(0.5), 16384);
        assert_eq!(sample_to_i16(-0.5), -16384);
        // Deterministic across calls.
        for _ in 0..8 {
            assert_eq!(sample_to_i16(0.5), 16384);
        }
    }

    #[test]
    fn test_write_frames_interleaves_channels() {
        let frames = [
            SampleFrame::new([0.5, -0.5]),
            SampleFrame::new([1.0, 0.0]),
        ];
        let mut out = Vec::new();
        write_frames_i16(&frames, &mut out);
        assert_eq!(out, vec![16384, -16384, 32767, 0]);
    }

    #[test]
    fn test_write_frames_appends_to_scratch() {
        let frames = [SampleFrame::new([0.25])];
        let mut out = vec![7i16];
        write_frames_i16(&frames, &mut out);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], 7);
        assert_eq!(out[1], 8192);
    }
}
