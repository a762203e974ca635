// SPDX-FileCopyrightText: 2026 Contributors to the sdl3-audio project.
// SPDX-License-Identifier: Apache-2.0

//! Simple smoke test for the hand-maintained declarations.

/// Verifies that the ABI types are constructible with the expected fields
/// and that the packed format constants carry the documented bit layout.
#[test]
fn declarations_are_usable() {
    let spec = sdl3_audio_sys::SDL_AudioSpec {
        format: sdl3_audio_sys::SDL_AUDIO_F32LE,
        channels: 2,
        freq: 48_000,
    };

    println!("spec: {:?}", spec);

    // Low byte of the format value encodes the bit width.
    assert_eq!(sdl3_audio_sys::SDL_AUDIO_S16LE & 0xFF, 16);
    assert_eq!(sdl3_audio_sys::SDL_AUDIO_F32LE & 0xFF, 32);
}
