// SPDX-FileCopyrightText: 2026 Contributors to the sdl3-audio project.
// SPDX-License-Identifier: Apache-2.0

//! # sdl3-audio-sys: Raw FFI surface for the SDL3 audio subsystem
//!
//! This crate declares the low-level C ABI types, constants, and function
//! shapes that the safe [`sdl3-audio`] wrapper needs from SDL3's audio
//! subsystem. It covers only the device-stream subset: opening a device
//! stream, feeding it data, pausing/resuming, and the pull callback the
//! native audio thread invokes.
//!
//! ## Overview
//!
//! `sdl3-audio-sys` exposes:
//! - Opaque native types (`SDL_AudioStream`)
//! - Plain data types shared across the ABI (`SDL_AudioSpec`)
//! - Constants for sample formats, subsystem flags, and default devices
//! - The `SDL_AudioStreamCallback` shape
//! - One function-pointer type alias per consumed native entry point
//!
//! ## Usage
//!
//! **Most users should NOT use this crate directly.** Use the safe
//! [`sdl3-audio`] wrapper crate instead, which provides:
//! - Memory safety via RAII stream handles
//! - Rust-idiomatic error handling with `Result`
//! - A bounded playback queue and worker thread above the raw stream
//!
//! The declarations here are hand-maintained against the SDL3 headers.
//! The library is loaded at runtime with `dlopen` (never linked), so there
//! are no `extern` blocks; symbols are resolved into the function-pointer
//! types below by the wrapper crate's loader.
//!
//! ## Safety
//!
//! Everything in this crate is ABI plumbing. Callers must uphold SDL's
//! invariants:
//! - Stream pointers must not be used after `SDL_DestroyAudioStream`
//! - The stream callback runs on SDL's audio thread and must not block
//! - Null checks are the caller's responsibility
//!
//! [`sdl3-audio`]: ../sdl3_audio/index.html

#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
#![allow(missing_docs)]
#![allow(clippy::missing_safety_doc)]

use std::os::raw::{c_char, c_int, c_void};

/// Opaque SDL audio stream. Only ever handled behind a raw pointer.
#[repr(C)]
pub struct SDL_AudioStream {
    _unused: [u8; 0],
}

/// SDL audio device identifier.
pub type SDL_AudioDeviceID = u32;

/// Sample format encoding (`SDL_AudioFormat` in the C headers).
///
/// The value packs byte size, signedness, endianness, and float-ness into
/// one integer, e.g. `SDL_AUDIO_S16LE = 0x8010` (signed, 16 bit, LE).
pub type SDL_AudioFormat = c_int;

pub const SDL_AUDIO_U8: SDL_AudioFormat = 0x0008;
pub const SDL_AUDIO_S8: SDL_AudioFormat = 0x8008;
pub const SDL_AUDIO_S16LE: SDL_AudioFormat = 0x8010;
pub const SDL_AUDIO_S16BE: SDL_AudioFormat = 0x9010;
pub const SDL_AUDIO_S32LE: SDL_AudioFormat = 0x8020;
pub const SDL_AUDIO_S32BE: SDL_AudioFormat = 0x9020;
pub const SDL_AUDIO_F32LE: SDL_AudioFormat = 0x8120;
pub const SDL_AUDIO_F32BE: SDL_AudioFormat = 0x9120;

/// Subsystem flag for `SDL_InitSubSystem` / `SDL_QuitSubSystem`.
pub const SDL_INIT_AUDIO: u32 = 0x0000_0010;

/// Pseudo device id selecting the default playback device.
pub const SDL_AUDIO_DEVICE_DEFAULT_PLAYBACK: SDL_AudioDeviceID = 0xFFFF_FFFF;
/// Pseudo device id selecting the default recording device.
pub const SDL_AUDIO_DEVICE_DEFAULT_RECORDING: SDL_AudioDeviceID = 0xFFFF_FFFE;

/// Desired/obtained stream format (`SDL_AudioSpec` in the C headers).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SDL_AudioSpec {
    /// Sample format (one of the `SDL_AUDIO_*` constants).
    pub format: SDL_AudioFormat,
    /// Channel count (1 = mono, 2 = stereo, ...).
    pub channels: c_int,
    /// Sample rate in frames per second.
    pub freq: c_int,
}

/// Pull callback invoked by SDL's audio thread.
///
/// For a playback stream, SDL calls this when it has consumed data and
/// wants more: `additional_amount` is the byte count it could accept right
/// now without underrunning, `total_amount` the total request size. The
/// callback runs on the native audio thread and must return quickly.
pub type SDL_AudioStreamCallback = Option<
    unsafe extern "C" fn(
        userdata: *mut c_void,
        stream: *mut SDL_AudioStream,
        additional_amount: c_int,
        total_amount: c_int,
    ),
>;

// Function-pointer shapes of the consumed native entry points, in header
// order. SDL3 reports success as a C bool (one byte, zero = failure).

pub type SDL_InitSubSystem_fn = unsafe extern "C" fn(flags: u32) -> bool;

pub type SDL_QuitSubSystem_fn = unsafe extern "C" fn(flags: u32);

pub type SDL_OpenAudioDeviceStream_fn = unsafe extern "C" fn(
    devid: SDL_AudioDeviceID,
    spec: *const SDL_AudioSpec,
    callback: SDL_AudioStreamCallback,
    userdata: *mut c_void,
) -> *mut SDL_AudioStream;

pub type SDL_DestroyAudioStream_fn = unsafe extern "C" fn(stream: *mut SDL_AudioStream);

pub type SDL_PauseAudioStreamDevice_fn =
    unsafe extern "C" fn(stream: *mut SDL_AudioStream) -> bool;

pub type SDL_ResumeAudioStreamDevice_fn =
    unsafe extern "C" fn(stream: *mut SDL_AudioStream) -> bool;

pub type SDL_PutAudioStreamData_fn = unsafe extern "C" fn(
    stream: *mut SDL_AudioStream,
    buf: *const c_void,
    len: c_int,
) -> bool;

pub type SDL_GetAudioStreamQueued_fn =
    unsafe extern "C" fn(stream: *mut SDL_AudioStream) -> c_int;

pub type SDL_GetError_fn = unsafe extern "C" fn() -> *const c_char;
