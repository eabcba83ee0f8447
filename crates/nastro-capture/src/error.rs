//! Error types.

use std::path::PathBuf;
use thiserror::Error;

/// Error type.
///
/// Display strings double as the user-facing alert content: the failed
/// operation plus the underlying error description.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to create the output file or write its provisional header.
    #[error("failed to open WAV file {}: {}", .path.display(), .source)]
    Open {
        /// The path the prompt resolved.
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    /// A sample append failed mid-session; the owning session must stop.
    #[error("failed to write WAV file: {0}")]
    Write(#[source] hound::Error),

    /// Header backpatch or close failed; the file may carry a stale header.
    #[error("failed to finalize WAV file: {0}")]
    Finalize(#[source] hound::Error),

    /// Append on a sink that is not open.
    #[error("WAV sink is closed")]
    Closed,

    /// Filesystem or thread-spawn failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The drain worker terminated abnormally.
    #[error("drain worker panicked")]
    WorkerPanicked,
}

/// Result type.
pub type Result<T> = std::result::Result<T, Error>;
