// SPDX-FileCopyrightText: 2026 Contributors to the sdl3-audio project.
// SPDX-License-Identifier: Apache-2.0

//! Bounded playback queue with drop-oldest backpressure.
//!
//! Producers hand PCM byte buffers to [`PlaybackQueue::push_bytes`]; the
//! playback worker drains them with [`PlaybackQueue::pop`]. The queue has
//! a hard capacity: once full, the *oldest* entry is evicted to admit the
//! new one. That caps end-to-end latency at roughly `capacity × buffer
//! duration` (~200 ms at the defaults) at the cost of audible drops under
//! sustained overload, instead of letting latency grow without bound.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use crossbeam_queue::ArrayQueue;
use tracing::warn;

use crate::{pool::BufferPool, stats::PlaybackStats};

/// Hard bound on pending queue entries.
pub const MAX_QUEUE_CAPACITY: usize = 10;

/// Hard bound on a single sample's byte size.
///
/// Larger buffers are rejected outright so one misbehaving producer cannot
/// pin an arbitrary amount of memory in the playback path.
pub const MAX_SAMPLE_BYTES: usize = 2 * 1024 * 1024;

/// One pending PCM buffer.
///
/// Storage is rented from the [`BufferPool`]; the vector's length is the
/// logical sample length. Consumers must hand the storage back via
/// [`PlaybackQueue::recycle`] once written out.
pub struct PendingSample {
    data: Vec<u8>,
}

impl PendingSample {
    /// The sample's PCM bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Logical sample length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` when the entry carries no bytes (never expected in-queue).
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Thread-safe bounded queue of pending samples.
///
/// Safe for any mix of concurrent producers and consumers; the expected
/// shape (many producers, one worker consumer) is a scheduling property of
/// the endpoint, not baked into the queue. Depth is tracked in a separate
/// atomic so [`Self::depth`] is a single load, never a traversal.
pub struct PlaybackQueue {
    inner: ArrayQueue<PendingSample>,
    depth: AtomicUsize,
    pool: Arc<BufferPool>,
    stats: Arc<PlaybackStats>,
}

impl PlaybackQueue {
    /// Creates a queue with the default [`MAX_QUEUE_CAPACITY`].
    pub fn new(pool: Arc<BufferPool>, stats: Arc<PlaybackStats>) -> Self {
        Self::with_capacity(MAX_QUEUE_CAPACITY, pool, stats)
    }

    /// Creates a queue with an explicit capacity (tests and tuning).
    pub fn with_capacity(
        capacity: usize,
        pool: Arc<BufferPool>,
        stats: Arc<PlaybackStats>,
    ) -> Self {
        Self {
            inner: ArrayQueue::new(capacity),
            depth: AtomicUsize::new(0),
            pool,
            stats,
        }
    }

    /// Copies `bytes` into pooled storage and enqueues it.
    ///
    /// Returns `true` if the sample was admitted. Oversize samples (above
    /// [`MAX_SAMPLE_BYTES`]) and empty samples are dropped with a warning
    /// and leave the queue untouched; a producer mistake must not crash
    /// or stall the real-time path.
    ///
    /// When the queue is already full, the oldest entry is evicted first
    /// (storage returned to the pool, dropped-frame counter incremented)
    /// and the new entry admitted in its place. The newest data always
    /// wins.
    pub fn push_bytes(&self, bytes: &[u8]) -> bool {
        if bytes.is_empty() {
            warn!("Rejecting empty audio sample");
            return false;
        }
        if bytes.len() > MAX_SAMPLE_BYTES {
            warn!(
                "Rejecting oversize audio sample: {} bytes (cap {})",
                bytes.len(),
                MAX_SAMPLE_BYTES
            );
            return false;
        }

        let mut data = self.pool.rent(bytes.len());
        data.extend_from_slice(bytes);

        match self.inner.force_push(PendingSample { data }) {
            // Evicted the oldest entry to make room; net depth unchanged.
            Some(evicted) => {
                self.stats.count_dropped();
                self.pool.give_back(evicted.data);
            }
            None => {
                self.depth.fetch_add(1, Ordering::Relaxed);
            }
        }
        true
    }

    /// Pops the oldest pending sample, if any.
    pub fn pop(&self) -> Option<PendingSample> {
        let sample = self.inner.pop()?;
        self.depth.fetch_sub(1, Ordering::Relaxed);
        Some(sample)
    }

    /// Returns a consumed sample's storage to the pool.
    pub fn recycle(&self, sample: PendingSample) {
        self.pool.give_back(sample.data);
    }

    /// Discards every pending entry, returning storage to the pool.
    ///
    /// Used when the stream is torn down while data is still queued.
    pub fn drain_to_pool(&self) {
        while let Some(sample) = self.pop() {
            self.pool.give_back(sample.data);
        }
    }

    /// Current number of pending entries (single atomic load).
    pub fn depth(&self) -> usize {
        self.depth.load(Ordering::Relaxed)
    }
}
