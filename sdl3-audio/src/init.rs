// SPDX-FileCopyrightText: 2026 Contributors to the sdl3-audio project.
// SPDX-License-Identifier: Apache-2.0

//! Process-scoped native subsystem lifecycle.
//!
//! The native audio subsystem is initialized at most once per process and
//! shut down at most once per initialization, no matter how many endpoints
//! come and go. Both entry points are idempotent; the guard is an atomic
//! flag, not a lock, so they are callable from any context.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::{Error, Result, driver::AudioDriver};

static AUDIO_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Initializes the native audio subsystem if it is not already up.
///
/// # Errors
///
/// Returns [`Error::Other`] with the native error string when the native
/// init call fails.
pub fn ensure_initialized(driver: &dyn AudioDriver) -> Result<()> {
    if AUDIO_INITIALIZED.load(Ordering::Acquire) {
        return Ok(());
    }
    if !driver.init_audio() {
        return Err(Error::Other(driver.last_error()));
    }
    if AUDIO_INITIALIZED
        .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
        .is_err()
    {
        // Lost the race to another thread; balance the extra native init
        // (the native subsystem refcounts init/quit pairs).
        driver.quit_audio();
    }
    Ok(())
}

/// Shuts the native audio subsystem down if this process initialized it.
///
/// A no-op unless a prior [`ensure_initialized`] succeeded.
pub fn ensure_shutdown(driver: &dyn AudioDriver) {
    if AUDIO_INITIALIZED
        .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
        .is_ok()
    {
        driver.quit_audio();
    }
}
