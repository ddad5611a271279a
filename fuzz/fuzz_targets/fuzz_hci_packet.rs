//! Fuzz target for the H4 packet decoders.
//!
//! Wraps the input in a valid capture header and a single record so that
//! every byte reaches the event, command, ACL and ATT decoders.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(len) = u32::try_from(data.len()) else {
        return;
    };

    let mut capture = Vec::with_capacity(40 + data.len());
    capture.extend_from_slice(b"btsnoop\0");
    capture.extend_from_slice(&1u32.to_be_bytes()); // Version
    capture.extend_from_slice(&1002u32.to_be_bytes()); // HCI UART (H4)
    capture.extend_from_slice(&len.to_be_bytes()); // Original length
    capture.extend_from_slice(&len.to_be_bytes()); // Included length
    capture.extend_from_slice(&1u32.to_be_bytes()); // Flags: received
    capture.extend_from_slice(&0u32.to_be_bytes()); // Drops
    capture.extend_from_slice(&0u64.to_be_bytes()); // Timestamp
    capture.extend_from_slice(data);

    let store = btsnoop::decode_bytes(&capture).expect("in-memory decode cannot fail");
    assert!(store.record_count() <= 1);
});
