// SPDX-FileCopyrightText: 2026 Contributors to the sdl3-audio project.
// SPDX-License-Identifier: Apache-2.0

//! Trampoline between the native audio thread and the playback pipeline.
//!
//! The native library invokes [`playback_pull_callback`] on its own audio
//! thread whenever the device wants more data. That thread runs on a hard
//! time budget, so the bridge does three cheap things and returns: a
//! lock-free-ish snapshot of "is a stream open", an underrun count when
//! data is demanded but none is queued, and a wake-signal release for the
//! worker. All heavy lifting lives on the worker thread.

use std::{
    os::raw::{c_int, c_void},
    panic::{AssertUnwindSafe, catch_unwind},
    sync::Arc,
};

use parking_lot::RwLock;
use tracing::error;

use crate::{
    handle::{AudioStreamHandle, BorrowedStream},
    queue::PlaybackQueue,
    signal::WakeSignal,
    stats::PlaybackStats,
};

/// State shared between the endpoint, the worker, and the native callback.
///
/// The handle slot is the single piece of state read by both the
/// lock-protected lifecycle controller and the lock-free callback/worker
/// snapshots. It holds an `Arc` so a snapshot stays usable even while the
/// controller swaps the slot underneath it.
pub(crate) struct StreamShared {
    handle_slot: RwLock<Option<Arc<AudioStreamHandle>>>,
    pub(crate) queue: Arc<PlaybackQueue>,
    pub(crate) wake: Arc<WakeSignal>,
    pub(crate) stats: Arc<PlaybackStats>,
}

impl StreamShared {
    pub(crate) fn new(
        queue: Arc<PlaybackQueue>,
        wake: Arc<WakeSignal>,
        stats: Arc<PlaybackStats>,
    ) -> Self {
        Self {
            handle_slot: RwLock::new(None),
            queue,
            wake,
            stats,
        }
    }

    /// Installs a freshly opened handle, returning the previous one.
    pub(crate) fn install_handle(
        &self,
        handle: Option<Arc<AudioStreamHandle>>,
    ) -> Option<Arc<AudioStreamHandle>> {
        std::mem::replace(&mut *self.handle_slot.write(), handle)
    }

    /// Clones the current handle out of the slot (worker path; may block
    /// briefly on a concurrent swap, which is fine off the audio thread).
    pub(crate) fn snapshot_handle(&self) -> Option<Arc<AudioStreamHandle>> {
        self.handle_slot.read().clone()
    }

    /// Non-blocking check for a currently valid handle (callback path).
    ///
    /// Contention on the slot is treated as "no handle": the swap only
    /// ever happens during a lifecycle transition, and returning early
    /// beats stalling the native audio thread.
    fn has_valid_handle(&self) -> bool {
        match self.handle_slot.try_read() {
            Some(slot) => slot.as_ref().is_some_and(|handle| handle.is_valid()),
            None => false,
        }
    }

    /// Reaction to the native "need more data" request.
    fn on_need_data(&self, stream: *mut sdl3_audio_sys::SDL_AudioStream, additional: c_int) {
        if additional <= 0 {
            return;
        }
        // The pointer handed to the callback is a borrowed view of the
        // stream the endpoint owns; it must never be released from here.
        let view = BorrowedStream::from_raw(stream);
        if !view.is_valid() || !self.has_valid_handle() {
            return;
        }
        if self.queue.depth() == 0 {
            self.stats.count_underrun();
        }
        self.wake.release();
    }
}

/// Pull callback registered with the native stream at open time.
///
/// `userdata` is a pointer to the endpoint's [`StreamShared`], which the
/// endpoint keeps alive for its whole lifetime, including across
/// re-initializations, so the registered pointer never dangles.
///
/// Panics must not cross back into native stack frames; the body is
/// wrapped in `catch_unwind` and a panic is logged and swallowed.
pub(crate) unsafe extern "C" fn playback_pull_callback(
    userdata: *mut c_void,
    stream: *mut sdl3_audio_sys::SDL_AudioStream,
    additional_amount: c_int,
    _total_amount: c_int,
) {
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        let shared = unsafe { &*(userdata as *const StreamShared) };
        shared.on_need_data(stream, additional_amount);
    }));
    if outcome.is_err() {
        error!("Panic in audio pull callback was contained at the FFI boundary");
    }
}
