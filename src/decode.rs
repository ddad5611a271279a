//! The decode pass: capture records in, typed events out.

use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::capture::CaptureReader;
use crate::error::Result;
use crate::event::EventStore;
use crate::hci;

/// Decode every record of an open capture, in file order.
///
/// Records are independent: nothing decoded from one record influences how
/// the next is read. Malformed records are skipped, and a capture that stops
/// mid-record (including a cut-off gzip stream) ends the pass with every
/// event decoded so far.
///
/// Any other read error fails the whole pass with [`Error::Io`]; the partial
/// store is discarded.
///
/// [`Error::Io`]: crate::Error::Io
pub fn decode<R: Read>(mut reader: CaptureReader<R>) -> Result<EventStore> {
    let mut store = EventStore::new();
    store.set_warnings(reader.header().warnings());

    while let Some(record) = reader.next_record()? {
        if record.payload.is_empty() {
            debug!(record = reader.record_count(), "skipping empty record");
            continue;
        }
        store.note_record(record.timestamp);
        hci::dispatch(&record, &mut store);
    }

    info!(
        records = store.record_count(),
        connections = store.connections().len(),
        disconnections = store.disconnections().len(),
        advertisements = store.advertisements().len(),
        gatt_operations = store.gatt_operations().len(),
        "decode complete"
    );

    Ok(store)
}

/// Open and decode a capture file (plain or gzipped).
pub fn decode_path<P: AsRef<Path>>(path: P) -> Result<EventStore> {
    decode(CaptureReader::open(path)?)
}

/// Decode a capture from any byte stream.
pub fn decode_reader<R: Read>(reader: R) -> Result<EventStore> {
    decode(CaptureReader::new(reader)?)
}

/// Decode a capture held in memory.
pub fn decode_bytes(data: &[u8]) -> Result<EventStore> {
    decode_reader(data)
}
