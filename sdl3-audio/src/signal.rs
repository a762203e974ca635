// SPDX-FileCopyrightText: 2026 Contributors to the sdl3-audio project.
// SPDX-License-Identifier: Apache-2.0

//! Counting wake signal between the callback bridge and the worker.
//!
//! A small counting semaphore over `parking_lot`'s mutex/condvar pair.
//! `release` is called from the native audio thread, so it does the bare
//! minimum: bump a counter and notify. The worker is the only waiter and
//! always waits with a bounded timeout so cancellation is observed even
//! when the native side goes quiet.

use std::time::Duration;

use parking_lot::{Condvar, Mutex};

/// Saturation bound for pending permits.
///
/// More pending wakes than queue slots carries no information; releasing
/// past the bound is the benign race the protocol allows.
const MAX_PERMITS: usize = 64;

/// Counting semaphore with bounded-timeout acquire.
pub(crate) struct WakeSignal {
    permits: Mutex<usize>,
    condvar: Condvar,
}

impl WakeSignal {
    pub(crate) fn new() -> Self {
        Self {
            permits: Mutex::new(0),
            condvar: Condvar::new(),
        }
    }

    /// Adds one permit and wakes a waiter. Saturates at [`MAX_PERMITS`].
    pub(crate) fn release(&self) {
        let mut permits = self.permits.lock();
        if *permits < MAX_PERMITS {
            *permits += 1;
        }
        drop(permits);
        self.condvar.notify_one();
    }

    /// Takes one permit, waiting at most `timeout` for one to appear.
    ///
    /// Returns `true` if a permit was consumed, `false` on timeout. A
    /// `false` return is not an error; the worker uses it to re-check its
    /// cancellation flag.
    pub(crate) fn acquire_timeout(&self, timeout: Duration) -> bool {
        let mut permits = self.permits.lock();
        if *permits == 0 {
            // One bounded wait; spurious wakeups fall through to the
            // recheck below.
            let _ = self.condvar.wait_for(&mut permits, timeout);
        }
        if *permits > 0 {
            *permits -= 1;
            true
        } else {
            false
        }
    }
}
