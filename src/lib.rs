//! btsnoop - Decode Bluetooth HCI captures into typed events.
//!
//! This library reads btsnoop files (as written by Android's HCI snoop log
//! and BlueZ's `btmon`) and reconstructs connection setup, disconnections,
//! LE advertising reports and GATT read/write operations from the raw
//! H4 packet stream.
//!
//! # Example
//!
//! ```no_run
//! fn main() -> anyhow::Result<()> {
//!     let store = btsnoop::decode_path("btsnoop_hci.log")?;
//!     for conn in store.connections() {
//!         println!("{} {} {}", conn.timestamp, conn.address, conn.lifecycle);
//!     }
//!     Ok(())
//! }
//! ```

pub mod capture;
pub mod cli;
pub mod decode;
pub mod error;
pub mod event;
pub mod format;
pub mod hci;

pub use decode::{decode, decode_bytes, decode_path, decode_reader};
pub use error::{Error, FormatError, FormatWarning, Result};
pub use event::EventStore;
