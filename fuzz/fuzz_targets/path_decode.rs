//! Fuzz target for path string decoding.
//!
//! Feeds arbitrary text to the path decoder, re-encodes what it finds and
//! decodes that again, checking for panics or hangs.
//!
//! Run with:
//!   cargo +nightly fuzz run path_decode

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    if let Ok(text) = std::str::from_utf8(data) {
        let _ = shapedraw::path::fuzz_decode(text);
    }
});
