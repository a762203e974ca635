// SPDX-FileCopyrightText: 2026 Contributors to the sdl3-audio project.
// SPDX-License-Identifier: Apache-2.0

//! Dedicated playback worker thread.
//!
//! The worker is the single blocking point of the pipeline: it parks on
//! the wake signal with a bounded timeout, revalidates the stream handle
//! on every wake, and pushes queued samples into the native stream in
//! small batches. Everything it does is allowed to be slow; nothing the
//! callback bridge does is.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread::JoinHandle,
    time::Duration,
};

use tracing::{debug, warn};

use crate::bridge::StreamShared;

/// Tuning knobs for the worker loop.
///
/// Neither default is load-bearing. A larger batch amortizes wakeups, a
/// smaller timeout tightens cancellation latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerConfig {
    /// Samples written per wake before re-parking.
    pub batch_size: usize,
    /// Upper bound on one semaphore wait; also the cancellation latency bound.
    pub poll_timeout: Duration,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            batch_size: 3,
            poll_timeout: Duration::from_millis(50),
        }
    }
}

/// Handle to the running worker thread.
///
/// Cancellation is cooperative: [`PlaybackWorker::stop`] raises a flag,
/// nudges the wake signal, and joins. The loop checks the flag after
/// every bounded wait, so stop returns within roughly one poll interval.
pub(crate) struct PlaybackWorker {
    cancel: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl PlaybackWorker {
    /// Spawns the worker thread over the shared pipeline state.
    pub(crate) fn spawn(shared: Arc<StreamShared>, config: WorkerConfig) -> Self {
        let cancel = Arc::new(AtomicBool::new(false));
        let cancel_flag = cancel.clone();
        let thread = std::thread::Builder::new()
            .name("sdl3-audio-playback".into())
            .spawn(move || run_loop(shared, cancel_flag, config))
            .expect("failed to spawn playback worker thread");
        Self {
            cancel,
            thread: Some(thread),
        }
    }

    /// Requests cancellation and joins the thread.
    pub(crate) fn stop(mut self) {
        self.request_stop();
        if let Some(thread) = self.thread.take()
            && thread.join().is_err()
        {
            warn!("Playback worker thread terminated by panic");
        }
    }

    fn request_stop(&self) {
        self.cancel.store(true, Ordering::Release);
    }
}

impl Drop for PlaybackWorker {
    /// Safety net: an endpoint drop must not leave a detached worker
    /// spinning. Normal teardown goes through [`PlaybackWorker::stop`].
    fn drop(&mut self) {
        self.request_stop();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// Worker loop body.
fn run_loop(shared: Arc<StreamShared>, cancel: Arc<AtomicBool>, config: WorkerConfig) {
    while !cancel.load(Ordering::Acquire) {
        // Bounded wait: a timeout is not an error, it is the cadence at
        // which cancellation and handle changes are observed.
        shared.wake.acquire_timeout(config.poll_timeout);
        if cancel.load(Ordering::Acquire) {
            break;
        }

        // The handle may have been swapped or released since the last
        // wake. Without a valid stream there is nowhere for pending data
        // to go; discard it rather than write into a dying stream.
        let handle = match shared.snapshot_handle() {
            Some(handle) if handle.is_valid() => handle,
            _ => {
                shared.queue.drain_to_pool();
                continue;
            }
        };

        for _ in 0..config.batch_size {
            let Some(sample) = shared.queue.pop() else {
                break;
            };
            // Entries are produced by the queue itself, so an empty one
            // means corruption; drop it without touching the stream.
            if sample.is_empty() {
                warn!("Discarding corrupt zero-length queue entry");
                shared.queue.recycle(sample);
                continue;
            }
            if let Err(err) = handle.put_data(sample.bytes()) {
                // One bad write must not kill the pipeline.
                debug!("Audio stream write failed, sample discarded: {err}");
            }
            shared.queue.recycle(sample);
        }
    }
    debug!("Playback worker exiting");
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    };

    use super::*;
    use crate::{
        driver::AudioDriver,
        handle::AudioStreamHandle,
        pool::BufferPool,
        queue::PlaybackQueue,
        signal::WakeSignal,
        stats::PlaybackStats,
    };

    /// Minimal driver double that counts writes and always opens.
    #[derive(Default)]
    struct CountingDriver {
        writes: AtomicU64,
        destroys: AtomicU64,
    }

    impl AudioDriver for CountingDriver {
        fn init_audio(&self) -> bool {
            true
        }
        fn quit_audio(&self) {}
        fn open_device_stream(
            &self,
            _device: sdl3_audio_sys::SDL_AudioDeviceID,
            _spec: &sdl3_audio_sys::SDL_AudioSpec,
            _callback: sdl3_audio_sys::SDL_AudioStreamCallback,
            _userdata: *mut std::os::raw::c_void,
        ) -> *mut sdl3_audio_sys::SDL_AudioStream {
            0x1000 as *mut sdl3_audio_sys::SDL_AudioStream
        }
        fn destroy_stream(&self, _stream: *mut sdl3_audio_sys::SDL_AudioStream) {
            self.destroys.fetch_add(1, Ordering::SeqCst);
        }
        fn pause_stream_device(&self, _stream: *mut sdl3_audio_sys::SDL_AudioStream) -> bool {
            true
        }
        fn resume_stream_device(&self, _stream: *mut sdl3_audio_sys::SDL_AudioStream) -> bool {
            true
        }
        fn put_stream_data(
            &self,
            _stream: *mut sdl3_audio_sys::SDL_AudioStream,
            _data: &[u8],
        ) -> bool {
            self.writes.fetch_add(1, Ordering::SeqCst);
            true
        }
        fn get_stream_queued(&self, _stream: *mut sdl3_audio_sys::SDL_AudioStream) -> i32 {
            0
        }
        fn last_error(&self) -> String {
            String::new()
        }
    }

    fn make_shared() -> (Arc<CountingDriver>, Arc<StreamShared>) {
        let driver = Arc::new(CountingDriver::default());
        let pool = Arc::new(BufferPool::new());
        let stats = Arc::new(PlaybackStats::new());
        let queue = Arc::new(PlaybackQueue::new(pool, stats.clone()));
        let wake = Arc::new(WakeSignal::new());
        (driver, Arc::new(StreamShared::new(queue, wake, stats)))
    }

    fn wait_until(deadline_ms: u64, mut check: impl FnMut() -> bool) -> bool {
        for _ in 0..deadline_ms / 10 {
            if check() {
                return true;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        check()
    }

    /// An invalid handle observed on wake drains the queue without a
    /// single native write being attempted.
    #[test]
    fn drains_queue_when_handle_is_invalid() {
        let (driver, shared) = make_shared();
        let driver_dyn: Arc<dyn AudioDriver> = driver.clone();
        let handle = Arc::new(
            AudioStreamHandle::open(
                driver_dyn,
                sdl3_audio_sys::SDL_AUDIO_DEVICE_DEFAULT_PLAYBACK,
                &sdl3_audio_sys::SDL_AudioSpec::default(),
                None,
                std::ptr::null_mut(),
            )
            .unwrap(),
        );
        shared.install_handle(Some(handle.clone()));
        handle.release();

        for _ in 0..4 {
            shared.queue.push_bytes(&[1, 2, 3, 4]);
        }
        assert_eq!(shared.queue.depth(), 4);

        let worker = PlaybackWorker::spawn(shared.clone(), WorkerConfig::default());
        shared.wake.release();

        assert!(wait_until(2000, || shared.queue.depth() == 0));
        assert_eq!(driver.writes.load(Ordering::SeqCst), 0);
        worker.stop();
    }

    /// Cancellation is observed within roughly one poll interval.
    #[test]
    fn stop_returns_promptly() {
        let (_driver, shared) = make_shared();
        let worker = PlaybackWorker::spawn(
            shared,
            WorkerConfig {
                batch_size: 3,
                poll_timeout: Duration::from_millis(50),
            },
        );
        let begin = std::time::Instant::now();
        worker.stop();
        assert!(begin.elapsed() < Duration::from_millis(500));
    }
}
