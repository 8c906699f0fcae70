//! Fuzz target for shape list JSON parsing.
//!
//! Run with:
//!   cargo +nightly fuzz run shapes_json_parse

#![no_main]

use libfuzzer_sys::fuzz_target;
use shapedraw::shape::io_json::from_json_str;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    if let Ok(text) = std::str::from_utf8(data) {
        let _ = from_json_str(text);
    }
});
