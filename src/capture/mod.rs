//! btsnoop capture reading.
//!
//! This module validates the file header and exposes the raw capture
//! records in file order. Nothing here looks inside a record's payload.

mod header;
mod reader;
mod record;

#[cfg(test)]
pub mod test_utils;

pub use header::{
    CaptureHeader, BTSNOOP_MAGIC, BTSNOOP_VERSION, DATALINK_HCI_UART, HEADER_LEN,
};
pub use reader::{is_gzip_extension, CaptureReader, RECORD_HEADER_LEN};
pub use record::{Direction, RawRecord, Timestamp};
