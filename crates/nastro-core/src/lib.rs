//! Core primitives for the nastro capture engine.
//!
//! - [`SampleFrame`]: one sample per channel, captured at a single engine tick
//! - [`pcm`]: float to 16-bit PCM conversion with saturation
//! - [`FrameRingBuffer`]: the lock-protected handoff between the real-time
//!   producer and the disk drain worker
//!
//! This crate performs no I/O; everything here is independently testable
//! without a host engine or a filesystem.

pub mod frame;
pub mod pcm;
pub mod ring;

pub use frame::SampleFrame;
pub use ring::FrameRingBuffer;
