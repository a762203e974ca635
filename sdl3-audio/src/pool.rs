// SPDX-FileCopyrightText: 2026 Contributors to the sdl3-audio project.
// SPDX-License-Identifier: Apache-2.0

//! Reusable byte-buffer pool backing the playback queue.
//!
//! Queue entries borrow their storage from here so that steady-state
//! playback recycles a handful of allocations instead of allocating per
//! sample. The pool is deliberately simple: a bounded free list under a
//! mutex, touched once per enqueue and once per consume, never from the
//! native audio thread.

use parking_lot::Mutex;

/// Maximum number of idle buffers retained in the free list.
///
/// Anything beyond the queue capacity plus in-flight batch is just memory
/// held hostage, so the list is kept small.
const MAX_POOLED: usize = 16;

/// Bounded free list of reusable `Vec<u8>` buffers.
pub struct BufferPool {
    free: Mutex<Vec<Vec<u8>>>,
}

impl BufferPool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self {
            free: Mutex::new(Vec::new()),
        }
    }

    /// Rents a buffer with at least `len` bytes of capacity, cleared to
    /// length 0.
    pub fn rent(&self, len: usize) -> Vec<u8> {
        let mut free = self.free.lock();
        // Take the first buffer that can hold the sample without growing.
        if let Some(pos) = free.iter().position(|buffer| buffer.capacity() >= len) {
            let mut buffer = free.swap_remove(pos);
            buffer.clear();
            return buffer;
        }
        drop(free);
        Vec::with_capacity(len)
    }

    /// Returns a buffer to the free list, or drops it if the list is full.
    pub fn give_back(&self, buffer: Vec<u8>) {
        let mut free = self.free.lock();
        if free.len() < MAX_POOLED {
            free.push(buffer);
        }
    }

    /// Number of idle buffers currently pooled.
    pub fn idle(&self) -> usize {
        self.free.lock().len()
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new()
    }
}
