// SPDX-FileCopyrightText: 2026 Contributors to the sdl3-audio project.
// SPDX-License-Identifier: Apache-2.0

//! Owning and borrowed wrappers around a native audio stream.
//!
//! [`AudioStreamHandle`] owns one native stream and guarantees the native
//! destroy call is issued exactly once, no matter how many times release
//! is attempted or from which threads. [`BorrowedStream`] is the
//! non-owning view for pointers received inside callback contexts.

use std::{
    os::raw::c_void,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use crate::{Error, Result, driver::AudioDriver};

/// Owning wrapper around a native device stream.
///
/// Created by [`AudioStreamHandle::open`]; destroyed exactly once via
/// [`AudioStreamHandle::release`] or `Drop`, whichever happens first. The
/// release race is resolved by a compare-and-swap on an atomic flag, not a
/// lock, so it is safe to lose the race from any thread, including one
/// that must never block.
///
/// # Thread Safety
///
/// The handle is `Send + Sync`: the pointer itself is immutable, validity
/// is tracked atomically, and the native API tolerates concurrent calls on
/// one stream (the wrapper above serializes actual writes).
pub struct AudioStreamHandle {
    raw: *mut sdl3_audio_sys::SDL_AudioStream,
    driver: Arc<dyn AudioDriver>,
    released: AtomicBool,
}

// Safety: `raw` is only dereferenced by the native library; the released
// flag makes the destroy path single-entry across threads.
unsafe impl Send for AudioStreamHandle {}
unsafe impl Sync for AudioStreamHandle {}

impl AudioStreamHandle {
    /// Opens a device stream and takes ownership of the resulting handle.
    ///
    /// The stream is opened in the paused state; the device does not pull
    /// data until it is resumed.
    ///
    /// # Arguments
    ///
    /// * `driver` - Native API implementation
    /// * `device` - Device id (or a default-device pseudo id)
    /// * `spec` - Desired sample format, channel count, and rate
    /// * `callback` - Pull callback registered with the native stream
    /// * `userdata` - Opaque pointer handed back to the callback
    ///
    /// # Errors
    ///
    /// Returns [`Error::OpenFailed`] carrying the native error string when
    /// the native open returns null. The error string is read immediately
    /// after the failing call, before any other native call on this
    /// thread can clear it.
    pub fn open(
        driver: Arc<dyn AudioDriver>,
        device: sdl3_audio_sys::SDL_AudioDeviceID,
        spec: &sdl3_audio_sys::SDL_AudioSpec,
        callback: sdl3_audio_sys::SDL_AudioStreamCallback,
        userdata: *mut c_void,
    ) -> Result<Self> {
        let raw = driver.open_device_stream(device, spec, callback, userdata);
        if raw.is_null() {
            return Err(Error::OpenFailed(driver.last_error()));
        }
        Ok(Self {
            raw,
            driver,
            released: AtomicBool::new(false),
        })
    }

    /// Returns the raw stream pointer.
    ///
    /// The pointer is only meaningful while [`Self::is_valid`] holds; the
    /// wrapper keeps the handle out of reach of writers before releasing it.
    pub fn raw(&self) -> *mut sdl3_audio_sys::SDL_AudioStream {
        self.raw
    }

    /// Returns `true` until the handle has been released.
    pub fn is_valid(&self) -> bool {
        !self.released.load(Ordering::Acquire)
    }

    /// Releases the native stream. Idempotent.
    ///
    /// The first caller (explicit close or `Drop`, from any thread)
    /// performs the native destroy; every later caller observes the flag
    /// already set and does nothing. Never panics: there is no native
    /// failure to report, and a throwing destructor path is a process-level
    /// hazard this type exists to rule out.
    pub fn release(&self) {
        if self
            .released
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            self.driver.destroy_stream(self.raw);
        }
    }

    /// Queues PCM bytes into the native stream.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StreamClosed`] if the handle was already released,
    /// or [`Error::Other`] with the native error string when the native
    /// write reports failure.
    pub fn put_data(&self, data: &[u8]) -> Result<()> {
        if !self.is_valid() {
            return Err(Error::StreamClosed);
        }
        if self.driver.put_stream_data(self.raw, data) {
            Ok(())
        } else {
            Err(Error::Other(self.driver.last_error()))
        }
    }

    /// Returns the number of bytes queued inside the native stream, or 0
    /// once the handle has been released.
    pub fn queued_bytes(&self) -> i32 {
        if !self.is_valid() {
            return 0;
        }
        self.driver.get_stream_queued(self.raw)
    }

    /// Pauses the device feeding this stream. Best effort; a native
    /// refusal is reported as `false` by the driver and ignored here.
    pub(crate) fn pause_device(&self) -> bool {
        self.is_valid() && self.driver.pause_stream_device(self.raw)
    }

    /// Resumes the device feeding this stream.
    pub(crate) fn resume_device(&self) -> bool {
        self.is_valid() && self.driver.resume_stream_device(self.raw)
    }
}

impl Drop for AudioStreamHandle {
    /// Releases the stream if it was not already released explicitly.
    fn drop(&mut self) {
        self.release();
    }
}

/// Non-owning view of a native stream pointer.
///
/// Built from a raw pointer received inside a callback invocation, so the
/// pointer can be handled with the same shape as [`AudioStreamHandle`]
/// without any risk of a double free: dropping a `BorrowedStream` is a
/// no-op.
#[derive(Debug, Clone, Copy)]
pub struct BorrowedStream {
    raw: *mut sdl3_audio_sys::SDL_AudioStream,
}

impl BorrowedStream {
    /// Wraps a raw stream pointer without taking ownership.
    pub fn from_raw(raw: *mut sdl3_audio_sys::SDL_AudioStream) -> Self {
        Self { raw }
    }

    /// Returns the wrapped pointer.
    pub fn raw(&self) -> *mut sdl3_audio_sys::SDL_AudioStream {
        self.raw
    }

    /// Returns `true` if the wrapped pointer is non-null.
    ///
    /// A borrowed view cannot observe release; callers own that knowledge.
    pub fn is_valid(&self) -> bool {
        !self.raw.is_null()
    }
}
