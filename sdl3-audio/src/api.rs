// SPDX-FileCopyrightText: 2026 Contributors to the sdl3-audio project.
// SPDX-License-Identifier: Apache-2.0

//! Runtime loading of the native library.
//!
//! This module resolves the consumed SDL3 entry points out of the shared
//! library with `libloading` and collects them into [`SdlApi`], the raw
//! API handle threaded through the safe wrapper types.

use std::{
    ffi::CStr,
    os::raw::{c_int, c_void},
    sync::Arc,
};

use crate::{Result, driver::AudioDriver};

/// Shared handle to the loaded native API.
pub type SdlApiHandle = Arc<SdlApi>;

/// Resolved function table for the SDL3 audio subset.
///
/// One field per consumed native entry point. The table holds plain
/// function pointers copied out of the library; the `_lib` field keeps the
/// shared object mapped for as long as any pointer may be called.
///
/// Obtained from [`load_api`]; use through the [`AudioDriver`] trait or
/// the thin raw methods below.
pub struct SdlApi {
    init_sub_system: sdl3_audio_sys::SDL_InitSubSystem_fn,
    quit_sub_system: sdl3_audio_sys::SDL_QuitSubSystem_fn,
    open_audio_device_stream: sdl3_audio_sys::SDL_OpenAudioDeviceStream_fn,
    destroy_audio_stream: sdl3_audio_sys::SDL_DestroyAudioStream_fn,
    pause_audio_stream_device: sdl3_audio_sys::SDL_PauseAudioStreamDevice_fn,
    resume_audio_stream_device: sdl3_audio_sys::SDL_ResumeAudioStreamDevice_fn,
    put_audio_stream_data: sdl3_audio_sys::SDL_PutAudioStreamData_fn,
    get_audio_stream_queued: sdl3_audio_sys::SDL_GetAudioStreamQueued_fn,
    get_error: sdl3_audio_sys::SDL_GetError_fn,
    _lib: libloading::Library,
}

/// Loads the native library and resolves the audio-subset symbols.
///
/// # Arguments
///
/// * `path` - Library path or name (e.g., `"libSDL3.so.0"`); resolution
///   follows the platform loader's search rules.
///
/// # Errors
///
/// Returns [`crate::Error::LibLoading`] if the library cannot be opened
/// or any required symbol is missing.
///
/// # Examples
///
/// ```no_run
/// use sdl3_audio::load_api;
///
/// # fn main() -> Result<(), sdl3_audio::Error> {
/// let api = load_api("libSDL3.so.0")?;
/// # Ok(())
/// # }
/// ```
pub fn load_api<P: AsRef<std::ffi::OsStr>>(path: P) -> Result<SdlApiHandle> {
    unsafe {
        let lib = libloading::Library::new(path.as_ref())?;

        // Copy the plain function pointers out of the `Symbol` wrappers
        // before the library moves into the table; `_lib` keeps the
        // mapping alive for as long as the pointers may be called.
        let init_sub_system =
            *lib.get::<sdl3_audio_sys::SDL_InitSubSystem_fn>(b"SDL_InitSubSystem\0")?;
        let quit_sub_system =
            *lib.get::<sdl3_audio_sys::SDL_QuitSubSystem_fn>(b"SDL_QuitSubSystem\0")?;
        let open_audio_device_stream = *lib
            .get::<sdl3_audio_sys::SDL_OpenAudioDeviceStream_fn>(b"SDL_OpenAudioDeviceStream\0")?;
        let destroy_audio_stream =
            *lib.get::<sdl3_audio_sys::SDL_DestroyAudioStream_fn>(b"SDL_DestroyAudioStream\0")?;
        let pause_audio_stream_device = *lib
            .get::<sdl3_audio_sys::SDL_PauseAudioStreamDevice_fn>(
                b"SDL_PauseAudioStreamDevice\0",
            )?;
        let resume_audio_stream_device = *lib
            .get::<sdl3_audio_sys::SDL_ResumeAudioStreamDevice_fn>(
                b"SDL_ResumeAudioStreamDevice\0",
            )?;
        let put_audio_stream_data =
            *lib.get::<sdl3_audio_sys::SDL_PutAudioStreamData_fn>(b"SDL_PutAudioStreamData\0")?;
        let get_audio_stream_queued = *lib
            .get::<sdl3_audio_sys::SDL_GetAudioStreamQueued_fn>(b"SDL_GetAudioStreamQueued\0")?;
        let get_error = *lib.get::<sdl3_audio_sys::SDL_GetError_fn>(b"SDL_GetError\0")?;

        Ok(Arc::new(SdlApi {
            init_sub_system,
            quit_sub_system,
            open_audio_device_stream,
            destroy_audio_stream,
            pause_audio_stream_device,
            resume_audio_stream_device,
            put_audio_stream_data,
            get_audio_stream_queued,
            get_error,
            _lib: lib,
        }))
    }
}

impl AudioDriver for SdlApi {
    fn init_audio(&self) -> bool {
        unsafe { (self.init_sub_system)(sdl3_audio_sys::SDL_INIT_AUDIO) }
    }

    fn quit_audio(&self) {
        unsafe { (self.quit_sub_system)(sdl3_audio_sys::SDL_INIT_AUDIO) }
    }

    fn open_device_stream(
        &self,
        device: sdl3_audio_sys::SDL_AudioDeviceID,
        spec: &sdl3_audio_sys::SDL_AudioSpec,
        callback: sdl3_audio_sys::SDL_AudioStreamCallback,
        userdata: *mut c_void,
    ) -> *mut sdl3_audio_sys::SDL_AudioStream {
        unsafe { (self.open_audio_device_stream)(device, spec, callback, userdata) }
    }

    fn destroy_stream(&self, stream: *mut sdl3_audio_sys::SDL_AudioStream) {
        unsafe { (self.destroy_audio_stream)(stream) }
    }

    fn pause_stream_device(&self, stream: *mut sdl3_audio_sys::SDL_AudioStream) -> bool {
        unsafe { (self.pause_audio_stream_device)(stream) }
    }

    fn resume_stream_device(&self, stream: *mut sdl3_audio_sys::SDL_AudioStream) -> bool {
        unsafe { (self.resume_audio_stream_device)(stream) }
    }

    fn put_stream_data(&self, stream: *mut sdl3_audio_sys::SDL_AudioStream, data: &[u8]) -> bool {
        unsafe {
            (self.put_audio_stream_data)(stream, data.as_ptr() as *const c_void, data.len() as c_int)
        }
    }

    fn get_stream_queued(&self, stream: *mut sdl3_audio_sys::SDL_AudioStream) -> i32 {
        unsafe { (self.get_audio_stream_queued)(stream) }
    }

    fn last_error(&self) -> String {
        // Must be read immediately after the failing call, on the same
        // thread, before any other native call clears it.
        unsafe {
            let message = (self.get_error)();
            if message.is_null() {
                String::new()
            } else {
                CStr::from_ptr(message).to_string_lossy().into_owned()
            }
        }
    }
}
