// SPDX-FileCopyrightText: 2026 Contributors to the sdl3-audio project.
// SPDX-License-Identifier: Apache-2.0

//! # sdl3-audio - Safe audio device streaming over the SDL3 C ABI
//!
//! Safe, idiomatic Rust wrapper around SDL3's pull-based audio device
//! streams, providing RAII handle ownership, a bounded playback queue with
//! drop-oldest backpressure, and a worker-thread pipeline between your
//! PCM producer and the native audio thread.
//!
//! ## Overview
//!
//! SDL3 delivers playback through an opaque *device stream*: the library
//! owns an audio thread that invokes a pull callback whenever the device
//! wants more data. This crate wraps the raw FFI ([`sdl3_audio_sys`]) so
//! that applications push PCM on their own schedule and the real-time
//! plumbing stays correct by construction:
//!
//! - **[`AudioStreamHandle`]**: owning handle, native destroy guaranteed
//!   exactly once, with a non-owning [`BorrowedStream`] view for callback
//!   contexts
//! - **[`PlaybackQueue`]**: bounded queue, oldest entry evicted under
//!   overload (bounded latency beats unbounded growth)
//! - **[`PlaybackEndpoint`]**: the start/pause/resume/close state machine
//!   coordinating the worker thread with the native pull callback
//! - **[`StatsSnapshot`]**: underruns, drops, and queue depth read off
//!   atomics, never off the state lock
//!
//! ## Architecture
//!
//! ```text
//! caller threads                 worker thread            native audio thread
//! ──────────────                 ─────────────            ───────────────────
//! put_audio_sample ─► PlaybackQueue ─► batch write ─► SDL stream ─► device
//!        │                  ▲                               │
//!        │                  └────── wake signal ◄── pull callback
//! start/pause/resume/close ──► PlaybackEndpoint state machine
//! ```
//!
//! ## Examples
//!
//! ```no_run
//! use sdl3_audio::{PlaybackEndpoint, load_api};
//! use sdl3_audio_sys::{SDL_AUDIO_DEVICE_DEFAULT_PLAYBACK, SDL_AUDIO_F32LE, SDL_AudioSpec};
//!
//! # fn main() -> Result<(), sdl3_audio::Error> {
//! let api = load_api("libSDL3.so.0")?;
//! let endpoint = PlaybackEndpoint::new(api, SDL_AUDIO_DEVICE_DEFAULT_PLAYBACK);
//!
//! endpoint.set_error_handler(|message| eprintln!("audio: {message}"));
//! endpoint.set_format(&SDL_AudioSpec {
//!     format: SDL_AUDIO_F32LE,
//!     channels: 2,
//!     freq: 48_000,
//! })?;
//!
//! loop {
//!     let pcm: Vec<u8> = decode_next_chunk();
//!     endpoint.put_audio_sample(&pcm);
//! #   break;
//! }
//! # fn decode_next_chunk() -> Vec<u8> { Vec::new() }
//!
//! endpoint.close();
//! # Ok(())
//! # }
//! ```
//!
//! ## Thread Safety
//!
//! - [`PlaybackEndpoint`] is `Send + Sync`; every method may be called
//!   from any thread, including lifecycle calls racing each other
//! - The native pull callback never blocks and never takes the state
//!   lock; sustained overload surfaces as counted drops, not stalls
//! - Cancellation is cooperative and bounded by the worker poll interval
//!
//! ## Testing
//!
//! The native seam is the [`AudioDriver`] trait; production code goes
//! through [`SdlApi`] (symbols resolved with `libloading` at runtime),
//! tests through a call-counting double. No real device is required for
//! the crate's test suite.

mod api;
mod bridge;
mod driver;
mod endpoint;
mod error;
mod handle;
mod pool;
mod queue;
mod signal;
mod stats;
mod worker;

pub mod init;

pub use api::{SdlApi, SdlApiHandle, load_api};
pub use driver::AudioDriver;
pub use endpoint::{ErrorHandler, PlaybackEndpoint};
pub use error::{Error, Result};
pub use handle::{AudioStreamHandle, BorrowedStream};
pub use pool::BufferPool;
pub use queue::{MAX_QUEUE_CAPACITY, MAX_SAMPLE_BYTES, PendingSample, PlaybackQueue};
pub use sdl3_audio_sys::{SDL_AudioDeviceID, SDL_AudioFormat, SDL_AudioSpec};
pub use stats::{PlaybackStats, StatsSnapshot};
pub use worker::WorkerConfig;
