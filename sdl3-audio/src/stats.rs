// SPDX-FileCopyrightText: 2026 Contributors to the sdl3-audio project.
// SPDX-License-Identifier: Apache-2.0

//! Playback statistics counters.
//!
//! All counters are plain atomics so the callback bridge and worker can
//! update them without touching the endpoint's state lock, and readers can
//! snapshot them without blocking the hot path.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic counters shared by the queue, worker, and callback bridge.
#[derive(Default)]
pub struct PlaybackStats {
    underruns: AtomicU64,
    dropped_frames: AtomicU64,
}

impl PlaybackStats {
    /// Creates zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one underrun (native thread asked for data, queue empty).
    pub fn count_underrun(&self) {
        self.underruns.fetch_add(1, Ordering::Relaxed);
    }

    /// Records one dropped entry (overload eviction).
    pub fn count_dropped(&self) {
        self.dropped_frames.fetch_add(1, Ordering::Relaxed);
    }

    /// Total underruns observed so far.
    pub fn underruns(&self) -> u64 {
        self.underruns.load(Ordering::Relaxed)
    }

    /// Total entries dropped by the overload policy so far.
    pub fn dropped_frames(&self) -> u64 {
        self.dropped_frames.load(Ordering::Relaxed)
    }
}

/// Point-in-time view of the playback pipeline, returned by
/// [`crate::PlaybackEndpoint::stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Times the native thread requested data while the queue was empty.
    pub underruns: u64,
    /// Entries evicted by the drop-oldest overload policy.
    pub dropped_frames: u64,
    /// Entries currently waiting in the playback queue.
    pub queue_depth: usize,
    /// `true` while the endpoint is started and not paused.
    pub is_active: bool,
}
