//! WAV sink for sequential PCM appends.

use crate::error::{Error, Result};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Sequential 16-bit PCM writer over a WAV file.
///
/// States: Closed -> Open -> Closed. The provisional header written on
/// create carries placeholder sizes; [`finalize`](Self::finalize)
/// backpatches them from the accumulated sample count and closes the
/// handle. The sink owns the file exclusively for the session's duration.
pub struct WavSink {
    writer: Option<WavWriter<BufWriter<File>>>,
    path: PathBuf,
    channels: u16,
    sample_rate: u32,
    samples_written: u64,
}

impl WavSink {
    /// Create the file and write the provisional header
    /// (16-bit signed PCM, little-endian, `channels` interleaved).
    pub fn create(path: impl AsRef<Path>, sample_rate: u32, channels: u16) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let spec = WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let writer = WavWriter::create(&path, spec).map_err(|source| Error::Open {
            path: path.clone(),
            source,
        })?;
        Ok(Self {
            writer: Some(writer),
            path,
            channels,
            sample_rate,
            samples_written: 0,
        })
    }

    /// Append interleaved PCM samples and accumulate the running count.
    ///
    /// A failed write leaves the sink dead for this session; the owner must
    /// stop recording rather than retry.
    pub fn append(&mut self, pcm: &[i16]) -> Result<()> {
        let writer = self.writer.as_mut().ok_or(Error::Closed)?;
        for &sample in pcm {
            writer.write_sample(sample).map_err(Error::Write)?;
        }
        self.samples_written += pcm.len() as u64;
        Ok(())
    }

    /// Backpatch the header size fields and close the handle.
    ///
    /// A no-op on an already-closed sink. A failure is reported once and
    /// not retried; the file may be left with a stale header.
    pub fn finalize(&mut self) -> Result<()> {
        match self.writer.take() {
            Some(writer) => writer.finalize().map_err(Error::Finalize),
            None => Ok(()),
        }
    }

    /// True until `finalize` runs.
    pub fn is_open(&self) -> bool {
        self.writer.is_some()
    }

    /// Output path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Interleaved samples appended so far.
    pub fn samples_written(&self) -> u64 {
        self.samples_written
    }

    /// Whole frames appended so far.
    pub fn frames_written(&self) -> u64 {
        self.samples_written / self.channels as u64
    }

    /// Sample rate the header was opened with.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Channel count the header was opened with.
    pub fn channels(&self) -> u16 {
        self.channels
    }
}
