// SPDX-FileCopyrightText: 2026 Contributors to the sdl3-audio project.
// SPDX-License-Identifier: Apache-2.0

//! Error types for audio streaming operations.
//!
//! This module defines the error type returned by the safe wrapper,
//! covering native open failures, lifecycle misuse, and the Rust-side
//! failure modes (library loading, string conversion).

/// Convenience result type using [`Error`] as the error variant.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur when using the audio streaming API.
///
/// Overload drops, oversize-sample rejection, transient write failures,
/// and double-release attempts are deliberately *not* represented here:
/// they are counted in [`crate::StatsSnapshot`] or logged and absorbed so
/// that nothing on the real-time playback path escalates to an error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The native device-stream open call failed. Carries the native
    /// error string, read immediately after the failing call.
    #[error("Failed to open device stream: {0}")]
    OpenFailed(String),

    /// An operation required an open stream but the endpoint is closed.
    #[error("Stream is closed")]
    StreamClosed,

    /// An argument passed to the wrapper was invalid.
    #[error("Invalid argument")]
    InvalidArg,

    /// A generic error for Rust-level failures not directly mapped to a
    /// native error (e.g., a missing symbol in the loaded library).
    #[error("Other error: {0}")]
    Other(String),

    /// Failed to convert a Rust string to a C-compatible null-terminated string.
    #[error("Null string: {0}")]
    NulString(#[from] std::ffi::NulError),

    /// Failed to load or interact with the native dynamic library.
    #[error("Loading library: {0}")]
    LibLoading(#[from] libloading::Error),
}
