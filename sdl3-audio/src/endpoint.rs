// SPDX-FileCopyrightText: 2026 Contributors to the sdl3-audio project.
// SPDX-License-Identifier: Apache-2.0

//! Playback endpoint lifecycle controller.
//!
//! [`PlaybackEndpoint`] owns one logical audio output: the native stream
//! handle, the bounded playback queue, the worker thread, and the state
//! machine tying them together. States map onto two flags guarded by a
//! single mutex:
//!
//! - Closed: `!started` (no handle installed)
//! - Idle: `started && paused` (handle open, device paused, no worker)
//! - Running: `started && !paused` (device pulling, worker feeding)
//!
//! Every public transition commits `{started, paused, handle slot}` as one
//! critical section, then issues the potentially slow native calls outside
//! the lock. The callback bridge never takes this lock (it only snapshots
//! the handle slot), so a transition waiting on the worker can never
//! deadlock against the native audio thread.

use std::{
    os::raw::c_void,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use parking_lot::Mutex;
use tracing::debug;

use crate::{
    Result,
    bridge::{StreamShared, playback_pull_callback},
    driver::AudioDriver,
    handle::AudioStreamHandle,
    init,
    pool::BufferPool,
    queue::PlaybackQueue,
    signal::WakeSignal,
    stats::{PlaybackStats, StatsSnapshot},
    worker::{PlaybackWorker, WorkerConfig},
};

/// Callback invoked with a human-readable message when the endpoint
/// becomes unusable (device open failure, unexpected invalidation).
pub type ErrorHandler = Box<dyn Fn(&str) + Send + Sync>;

/// Lifecycle flags and the worker, guarded by one mutex.
struct LifecycleState {
    started: bool,
    paused: bool,
    worker: Option<PlaybackWorker>,
}

/// One logical audio playback endpoint.
///
/// # Examples
///
/// ```no_run
/// use sdl3_audio::{PlaybackEndpoint, load_api};
/// use sdl3_audio_sys::{SDL_AUDIO_DEVICE_DEFAULT_PLAYBACK, SDL_AUDIO_S16LE, SDL_AudioSpec};
///
/// # fn main() -> Result<(), sdl3_audio::Error> {
/// let api = load_api("libSDL3.so.0")?;
/// let endpoint = PlaybackEndpoint::new(api, SDL_AUDIO_DEVICE_DEFAULT_PLAYBACK);
///
/// endpoint.set_format(&SDL_AudioSpec {
///     format: SDL_AUDIO_S16LE,
///     channels: 2,
///     freq: 48_000,
/// })?;
///
/// // Feed PCM from the decoder; never blocks, drops oldest under overload.
/// endpoint.put_audio_sample(&[0u8; 960]);
///
/// let stats = endpoint.stats();
/// println!("queued: {}, dropped: {}", stats.queue_depth, stats.dropped_frames);
///
/// endpoint.close();
/// # Ok(())
/// # }
/// ```
pub struct PlaybackEndpoint {
    driver: Arc<dyn AudioDriver>,
    device: sdl3_audio_sys::SDL_AudioDeviceID,
    shared: Arc<StreamShared>,
    state: Mutex<LifecycleState>,
    // Mirror of "Running" kept outside the state lock so stats reads
    // stay non-blocking.
    active: AtomicBool,
    error_handler: Mutex<Option<ErrorHandler>>,
    config: WorkerConfig,
}

impl PlaybackEndpoint {
    /// Creates a closed endpoint bound to a device id.
    ///
    /// Nothing is opened until [`Self::set_format`]; device matching and
    /// enumeration happen upstream, this type only consumes an id (or a
    /// default-device pseudo id).
    pub fn new(driver: Arc<dyn AudioDriver>, device: sdl3_audio_sys::SDL_AudioDeviceID) -> Self {
        Self::with_config(driver, device, WorkerConfig::default())
    }

    /// Creates a closed endpoint with explicit worker tuning.
    pub fn with_config(
        driver: Arc<dyn AudioDriver>,
        device: sdl3_audio_sys::SDL_AudioDeviceID,
        config: WorkerConfig,
    ) -> Self {
        let pool = Arc::new(BufferPool::new());
        let stats = Arc::new(PlaybackStats::new());
        let queue = Arc::new(PlaybackQueue::new(pool, stats.clone()));
        let wake = Arc::new(WakeSignal::new());
        Self {
            driver,
            device,
            shared: Arc::new(StreamShared::new(queue, wake, stats)),
            state: Mutex::new(LifecycleState {
                started: false,
                paused: true,
                worker: None,
            }),
            active: AtomicBool::new(false),
            error_handler: Mutex::new(None),
            config,
        }
    }

    /// Registers the error-notification hook.
    ///
    /// Replaces any previous handler. Fired synchronously from the thread
    /// observing the failure.
    pub fn set_error_handler<F>(&self, handler: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        *self.error_handler.lock() = Some(Box::new(handler));
    }

    /// (Re)initializes the device stream for a format and starts playback.
    ///
    /// Any previously open stream is torn down first; re-initialization
    /// never leaks a handle. On open failure the endpoint stays Closed,
    /// the error hook fires with the native message, and the error is
    /// returned so the caller may retry.
    pub fn set_format(&self, spec: &sdl3_audio_sys::SDL_AudioSpec) -> Result<()> {
        init::ensure_initialized(self.driver.as_ref())?;
        self.close();

        // The registered userdata is the endpoint's shared state, which
        // outlives every stream opened through it (kept alive by this
        // struct and by the worker), so the pointer cannot dangle while
        // the native side may still invoke the callback.
        let userdata = Arc::as_ptr(&self.shared) as *mut c_void;
        let handle = AudioStreamHandle::open(
            self.driver.clone(),
            self.device,
            spec,
            Some(playback_pull_callback),
            userdata,
        )
        .inspect_err(|err| self.notify_error(&err.to_string()))?;

        // A concurrent set_format may have installed its own handle since
        // the close above; whichever loses the swap gets released here.
        if let Some(previous) = self.shared.install_handle(Some(Arc::new(handle))) {
            previous.release();
        }
        self.start()
    }

    /// Starts playback: Closed → Idle, then an immediate resume.
    ///
    /// No-op when already started. Requires an open stream
    /// ([`Self::set_format`] performs both steps).
    pub fn start(&self) -> Result<()> {
        {
            let mut state = self.state.lock();
            if state.started {
                return Ok(());
            }
            if self.shared.snapshot_handle().is_none() {
                return Err(crate::Error::StreamClosed);
            }
            state.started = true;
            state.paused = true;
        }
        self.resume();
        Ok(())
    }

    /// Resumes playback: Idle → Running.
    ///
    /// Starts the worker and un-pauses the device. No effect when already
    /// Running or when Closed.
    pub fn resume(&self) {
        let handle = {
            let mut state = self.state.lock();
            if !state.started || !state.paused {
                return;
            }
            let Some(handle) = self.shared.snapshot_handle() else {
                return;
            };
            state.paused = false;
            if state.worker.is_none() {
                state.worker = Some(PlaybackWorker::spawn(self.shared.clone(), self.config));
            }
            self.active.store(true, Ordering::Release);
            handle
        };
        // Native resume outside the lock; worker start and device resume
        // are independent effects, only the end state is the contract.
        handle.resume_device();
    }

    /// Pauses playback: Running → Idle.
    ///
    /// Stops the worker (bounded by one poll interval) and pauses the
    /// device. No effect when already Idle or Closed.
    pub fn pause(&self) {
        let (worker, handle) = {
            let mut state = self.state.lock();
            if !state.started || state.paused {
                return;
            }
            state.paused = true;
            self.active.store(false, Ordering::Release);
            (state.worker.take(), self.shared.snapshot_handle())
        };
        if let Some(worker) = worker {
            worker.stop();
        }
        if let Some(handle) = handle {
            handle.pause_device();
        }
    }

    /// Closes the endpoint from any state. Idempotent.
    ///
    /// Pauses first, swaps the handle slot empty under the state lock,
    /// then releases the captured handle outside the lock (the native
    /// destroy can be slow and must not block state queries or callback
    /// snapshots), and finally discards any still-queued samples.
    pub fn close(&self) {
        self.pause();
        let (worker, previous) = {
            let mut state = self.state.lock();
            state.started = false;
            state.paused = true;
            self.active.store(false, Ordering::Release);
            // A racing resume may have respawned the worker since the
            // pause above; whatever is present now stops here.
            (state.worker.take(), self.shared.install_handle(None))
        };
        if let Some(worker) = worker {
            worker.stop();
        }
        if let Some(handle) = previous {
            handle.release();
            debug!("Audio stream closed");
        }
        self.shared.queue.drain_to_pool();
    }

    /// Enqueues one PCM sample for playback. Never blocks.
    ///
    /// Oversize samples are rejected with a warning; when the queue is
    /// full the oldest pending sample is dropped to admit this one. Each
    /// admitted sample releases the worker's wake signal.
    pub fn put_audio_sample(&self, bytes: &[u8]) {
        if self.shared.queue.push_bytes(bytes) {
            self.shared.wake.release();
        }
    }

    /// Returns a point-in-time statistics snapshot without touching the
    /// state lock's hot-path counters.
    pub fn stats(&self) -> StatsSnapshot {
        StatsSnapshot {
            underruns: self.shared.stats.underruns(),
            dropped_frames: self.shared.stats.dropped_frames(),
            queue_depth: self.shared.queue.depth(),
            is_active: self.active.load(Ordering::Acquire),
        }
    }

    /// Bytes currently queued inside the native stream (diagnostics), or
    /// 0 when closed.
    pub fn native_queued_bytes(&self) -> i32 {
        self.shared
            .snapshot_handle()
            .map(|handle| handle.queued_bytes())
            .unwrap_or(0)
    }

    fn notify_error(&self, message: &str) {
        tracing::error!("Audio endpoint error: {message}");
        if let Some(handler) = self.error_handler.lock().as_ref() {
            handler(message);
        }
    }
}

impl Drop for PlaybackEndpoint {
    /// Tears the stream down if the owner forgot to close explicitly.
    fn drop(&mut self) {
        self.close();
    }
}
