// SPDX-FileCopyrightText: 2026 Contributors to the sdl3-audio project.
// SPDX-License-Identifier: Apache-2.0

//! The seam between the safe wrapper and the native library.
//!
//! [`AudioDriver`] covers exactly the native surface the streaming core
//! consumes. The production implementation is [`crate::SdlApi`] (symbols
//! resolved at runtime); tests substitute a call-counting double.

use std::os::raw::c_void;

/// Minimum native surface required by the streaming core.
///
/// Raw stream pointers pass through unchanged; ownership and validity are
/// tracked above this trait by [`crate::AudioStreamHandle`]. Implementations
/// must be callable from any thread (`Send + Sync`): the native library is
/// thread-safe at the API level even though a given stream has one logical
/// owner.
pub trait AudioDriver: Send + Sync {
    /// Initializes the native audio subsystem. Returns `false` on failure.
    fn init_audio(&self) -> bool;

    /// Shuts the native audio subsystem down.
    fn quit_audio(&self);

    /// Opens a device stream in the paused state.
    ///
    /// Returns a null pointer on failure; the cause is available from
    /// [`Self::last_error`] until the next native call on this thread.
    fn open_device_stream(
        &self,
        device: sdl3_audio_sys::SDL_AudioDeviceID,
        spec: &sdl3_audio_sys::SDL_AudioSpec,
        callback: sdl3_audio_sys::SDL_AudioStreamCallback,
        userdata: *mut c_void,
    ) -> *mut sdl3_audio_sys::SDL_AudioStream;

    /// Destroys a stream and closes its device binding.
    fn destroy_stream(&self, stream: *mut sdl3_audio_sys::SDL_AudioStream);

    /// Pauses the device feeding this stream.
    fn pause_stream_device(&self, stream: *mut sdl3_audio_sys::SDL_AudioStream) -> bool;

    /// Resumes the device feeding this stream.
    fn resume_stream_device(&self, stream: *mut sdl3_audio_sys::SDL_AudioStream) -> bool;

    /// Queues PCM bytes into the stream. Returns `false` on failure.
    fn put_stream_data(&self, stream: *mut sdl3_audio_sys::SDL_AudioStream, data: &[u8]) -> bool;

    /// Returns the number of bytes currently queued inside the native stream.
    fn get_stream_queued(&self, stream: *mut sdl3_audio_sys::SDL_AudioStream) -> i32;

    /// Returns the native last-error string for the calling thread.
    fn last_error(&self) -> String;
}
