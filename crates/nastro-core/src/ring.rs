//! Lock-protected frame ring buffer.

use crate::frame::SampleFrame;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Fixed-capacity FIFO of sample frames between the real-time producer and
/// the drain worker.
///
/// Exactly one producer (the per-tick ingest call) and one consumer (the
/// drain worker) operate on the buffer. A single mutex serializes push,
/// drain, size and reset so each is one atomic group; the lock is held only
/// for index arithmetic and slot copies, never across I/O. `push` does not
/// block beyond the lock: when the buffer is full the incoming frame is
/// dropped and counted instead.
pub struct FrameRingBuffer<const N: usize> {
    slots: Mutex<Slots<N>>,
    capacity: usize,
    dropped: AtomicU64,
}

struct Slots<const N: usize> {
    frames: Box<[SampleFrame<N>]>,
    start: usize,
    len: usize,
}

impl<const N: usize> FrameRingBuffer<N> {
    /// Create a buffer holding up to `capacity` frames.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: Mutex::new(Slots {
                frames: vec![SampleFrame::SILENCE; capacity].into_boxed_slice(),
                start: 0,
                len: 0,
            }),
            capacity,
            dropped: AtomicU64::new(0),
        }
    }

    /// Append a frame.
    ///
    /// Returns `false` when the buffer is full; the frame is dropped and
    /// [`dropped_frames`](Self::dropped_frames) incremented. The caller on
    /// the real-time path must never wait for space.
    pub fn push(&self, frame: SampleFrame<N>) -> bool {
        let mut slots = self.slots.lock();
        if slots.len == self.capacity {
            drop(slots);
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }
        let idx = (slots.start + slots.len) % self.capacity;
        slots.frames[idx] = frame;
        slots.len += 1;
        true
    }

    /// Remove and return all buffered frames in push order.
    ///
    /// Consumption is all-or-nothing: both indices reset to zero, so the
    /// consumer takes the lock once per drain cycle rather than per frame.
    pub fn drain_all(&self) -> Vec<SampleFrame<N>> {
        let mut slots = self.slots.lock();
        let mut out = Vec::with_capacity(slots.len);
        for i in 0..slots.len {
            out.push(slots.frames[(slots.start + i) % self.capacity]);
        }
        slots.start = 0;
        slots.len = 0;
        out
    }

    /// Discard all buffered frames.
    pub fn clear(&self) {
        let mut slots = self.slots.lock();
        slots.start = 0;
        slots.len = 0;
    }

    /// Number of buffered frames.
    pub fn len(&self) -> usize {
        self.slots.lock().len
    }

    /// True when no frames are buffered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when a push would be dropped.
    pub fn full(&self) -> bool {
        self.slots.lock().len == self.capacity
    }

    /// Slot capacity in frames.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Frames dropped on overflow since construction.
    pub fn dropped_frames(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}
