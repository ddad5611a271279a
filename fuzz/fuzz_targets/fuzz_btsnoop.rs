//! Fuzz target for btsnoop capture parsing.
//!
//! Tests handling of malformed captures including:
//! - Magic, version and datalink checks
//! - Record headers with oversized included lengths
//! - Truncated trailing records

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Errors are fine, panics are not
    let _ = btsnoop::decode_bytes(data);
});
