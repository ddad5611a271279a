//! HCI packet decoding.
//!
//! This module provides:
//! - `Decoder` trait implemented by each layer decoder
//! - `dispatch` routing a capture record by its H4 packet type
//! - Fixed code tables for reasons, address kinds, report kinds and ATT opcodes
//!
//! Every length field in a packet is untrusted. Decoders clip declared
//! lengths to the bytes actually present and drop the smallest affected
//! unit instead of failing.

mod acl;
mod att;
mod codes;
mod command;
mod event;
mod meta;

use tracing::trace;

use crate::capture::{Direction, RawRecord, Timestamp};
use crate::event::EventStore;

pub use acl::AclDecoder;
pub use att::AttDecoder;
pub use codes::{
    event_code, opcode, reason_text, subevent_code, AddressKind, AttOpcode, ReportKind,
    HANDLE_MASK, L2CAP_CID_ATT,
};
pub use command::CommandDecoder;
pub use event::EventDecoder;
pub use meta::MetaEventDecoder;

/// H4 packet type, the first payload byte of every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PacketType {
    Command = 0x01,
    Acl = 0x02,
    Sco = 0x03,
    Event = 0x04,
}

impl PacketType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x01 => Some(PacketType::Command),
            0x02 => Some(PacketType::Acl),
            0x03 => Some(PacketType::Sco),
            0x04 => Some(PacketType::Event),
            _ => None,
        }
    }
}

/// Per-record information every emitted event inherits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordContext {
    pub timestamp: Timestamp,
    pub direction: Direction,
}

impl RecordContext {
    pub fn new(timestamp: Timestamp, direction: Direction) -> Self {
        Self {
            timestamp,
            direction,
        }
    }
}

impl From<&RawRecord> for RecordContext {
    fn from(record: &RawRecord) -> Self {
        Self::new(record.timestamp, record.direction())
    }
}

/// A decoder for one layer of HCI framing.
pub trait Decoder {
    /// Short identifier used in logs (e.g., "hci_event", "att").
    fn name(&self) -> &'static str;

    /// Decode `data` and append any resulting events to `store`.
    ///
    /// Malformed or truncated input produces no event; it never fails.
    fn decode(&self, data: &[u8], context: &RecordContext, store: &mut EventStore);
}

/// Route one record to the decoder for its packet type.
///
/// SCO data and unknown packet types are ignored.
pub fn dispatch(record: &RawRecord, store: &mut EventStore) {
    let Some(packet_type) = record.packet_type() else {
        return;
    };
    let body = record.body();
    let context = RecordContext::from(record);

    match PacketType::from_u8(packet_type) {
        Some(PacketType::Event) => EventDecoder.decode(body, &context, store),
        Some(PacketType::Command) => CommandDecoder.decode(body, &context, store),
        Some(PacketType::Acl) => AclDecoder.decode(body, &context, store),
        Some(PacketType::Sco) => {}
        None => trace!(packet_type, "ignoring unknown packet type"),
    }
}

/// `len` bytes of `data` starting at `start`, clipped to what is present.
pub(crate) fn clipped(data: &[u8], start: usize, len: usize) -> &[u8] {
    match data.get(start..) {
        Some(rest) => &rest[..len.min(rest.len())],
        None => &[],
    }
}

/// Little-endian u16 at `offset`.
pub(crate) fn read_u16_le(data: &[u8], offset: usize) -> Option<u16> {
    let bytes = data.get(offset..offset.checked_add(2)?)?;
    Some(u16::from_le_bytes([bytes[0], bytes[1]]))
}

/// Little-endian connection handle at `offset`, with the flag bits masked off.
pub(crate) fn read_handle(data: &[u8], offset: usize) -> Option<u16> {
    read_u16_le(data, offset).map(|raw| raw & HANDLE_MASK)
}
