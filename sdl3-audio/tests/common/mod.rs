// SPDX-FileCopyrightText: 2026 Contributors to the sdl3-audio project.
// SPDX-License-Identifier: Apache-2.0

//! Shared test utilities: logging setup and the call-counting driver double.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::{
    os::raw::c_void,
    sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering},
};

use parking_lot::Mutex;
use sdl3_audio::AudioDriver;

/// Ensures logging is initialized only once across all tests.
static LOG_ONCE: std::sync::Once = std::sync::Once::new();

/// Initializes tracing output (respects the `RUST_LOG` environment variable).
pub fn setup_logging() {
    LOG_ONCE.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::builder()
                    .with_default_directive(tracing::level_filters::LevelFilter::INFO.into())
                    .from_env_lossy(),
            )
            .init();
    });
}

/// Callback registration captured by the fake at open time.
///
/// Pointers are stored as integers so the struct stays `Send + Sync`; the
/// values are only ever turned back into pointers inside
/// [`FakeDriver::fire_callback`].
#[derive(Clone, Copy)]
struct Registered {
    callback: sdl3_audio_sys::SDL_AudioStreamCallback,
    userdata: usize,
    stream: usize,
}

/// Call-counting test double for the native layer.
///
/// Fabricates stream pointers (never dereferenced), records every call,
/// keeps a FIFO log of written sample bytes, and can replay the
/// registered pull callback to simulate the native audio thread.
#[derive(Default)]
pub struct FakeDriver {
    pub open_calls: AtomicU64,
    pub destroy_calls: AtomicU64,
    pub pause_calls: AtomicU64,
    pub resume_calls: AtomicU64,
    /// When set, `open_device_stream` returns null.
    pub fail_open: AtomicBool,
    /// When set, `put_stream_data` reports failure.
    pub fail_writes: AtomicBool,
    /// FIFO log of successfully written samples.
    pub writes: Mutex<Vec<Vec<u8>>>,
    registered: Mutex<Option<Registered>>,
    next_stream: AtomicUsize,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invokes the registered pull callback the way the native audio
    /// thread would.
    ///
    /// # Panics
    ///
    /// Panics if no stream has been opened with a callback.
    pub fn fire_callback(&self, additional_amount: i32, total_amount: i32) {
        let registered = self.registered.lock().expect("no stream opened");
        let callback = registered.callback.expect("no callback registered");
        unsafe {
            callback(
                registered.userdata as *mut c_void,
                registered.stream as *mut sdl3_audio_sys::SDL_AudioStream,
                additional_amount,
                total_amount,
            );
        }
    }

    /// Number of samples written so far.
    pub fn write_count(&self) -> usize {
        self.writes.lock().len()
    }
}

impl AudioDriver for FakeDriver {
    fn init_audio(&self) -> bool {
        true
    }

    fn quit_audio(&self) {}

    fn open_device_stream(
        &self,
        _device: sdl3_audio_sys::SDL_AudioDeviceID,
        _spec: &sdl3_audio_sys::SDL_AudioSpec,
        callback: sdl3_audio_sys::SDL_AudioStreamCallback,
        userdata: *mut c_void,
    ) -> *mut sdl3_audio_sys::SDL_AudioStream {
        self.open_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_open.load(Ordering::SeqCst) {
            return std::ptr::null_mut();
        }
        // Fabricated, aligned, never-dereferenced stream "pointer".
        let stream = 0x1000 + self.next_stream.fetch_add(0x10, Ordering::SeqCst);
        *self.registered.lock() = Some(Registered {
            callback,
            userdata: userdata as usize,
            stream,
        });
        stream as *mut sdl3_audio_sys::SDL_AudioStream
    }

    fn destroy_stream(&self, _stream: *mut sdl3_audio_sys::SDL_AudioStream) {
        self.destroy_calls.fetch_add(1, Ordering::SeqCst);
        *self.registered.lock() = None;
    }

    fn pause_stream_device(&self, _stream: *mut sdl3_audio_sys::SDL_AudioStream) -> bool {
        self.pause_calls.fetch_add(1, Ordering::SeqCst);
        true
    }

    fn resume_stream_device(&self, _stream: *mut sdl3_audio_sys::SDL_AudioStream) -> bool {
        self.resume_calls.fetch_add(1, Ordering::SeqCst);
        true
    }

    fn put_stream_data(&self, _stream: *mut sdl3_audio_sys::SDL_AudioStream, data: &[u8]) -> bool {
        if self.fail_writes.load(Ordering::SeqCst) {
            return false;
        }
        self.writes.lock().push(data.to_vec());
        true
    }

    fn get_stream_queued(&self, _stream: *mut sdl3_audio_sys::SDL_AudioStream) -> i32 {
        0
    }

    fn last_error(&self) -> String {
        "fake driver: requested operation failed".to_string()
    }
}

/// Polls `check` every 10 ms until it holds or `deadline_ms` elapses.
pub fn wait_until(deadline_ms: u64, mut check: impl FnMut() -> bool) -> bool {
    for _ in 0..deadline_ms / 10 {
        if check() {
            return true;
        }
        std::thread::sleep(std::time::Duration::from_millis(10));
    }
    check()
}
