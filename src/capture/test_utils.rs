//! Test utilities for building synthetic btsnoop captures.

use super::{BTSNOOP_MAGIC, BTSNOOP_VERSION, DATALINK_HCI_UART};

/// Builder for constructing btsnoop files in memory.
#[derive(Debug, Clone)]
pub struct CaptureBuilder {
    version: u32,
    link_type: u32,
    records: Vec<u8>,
}

impl Default for CaptureBuilder {
    fn default() -> Self {
        Self {
            version: BTSNOOP_VERSION,
            link_type: DATALINK_HCI_UART,
            records: Vec::new(),
        }
    }
}

impl CaptureBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn link_type(mut self, link_type: u32) -> Self {
        self.link_type = link_type;
        self
    }

    /// Append a record with the given flags and raw payload (packet type included).
    pub fn record(mut self, timestamp: u64, flags: u32, payload: Vec<u8>) -> Self {
        let len = payload.len() as u32;
        self.records.extend_from_slice(&len.to_be_bytes()); // original length
        self.records.extend_from_slice(&len.to_be_bytes()); // included length
        self.records.extend_from_slice(&flags.to_be_bytes());
        self.records.extend_from_slice(&0u32.to_be_bytes()); // drops
        self.records.extend_from_slice(&timestamp.to_be_bytes());
        self.records.extend_from_slice(&payload);
        self
    }

    /// Append a received HCI event record.
    pub fn event(self, timestamp: u64, code: u8, params: &[u8]) -> Self {
        self.record(timestamp, 1, hci_event(code, params))
    }

    /// Append a sent HCI command record.
    pub fn command(self, timestamp: u64, opcode: u16, params: &[u8]) -> Self {
        self.record(timestamp, 0, hci_command(opcode, params))
    }

    pub fn build(self) -> Vec<u8> {
        let mut data = Vec::with_capacity(16 + self.records.len());
        data.extend_from_slice(&BTSNOOP_MAGIC);
        data.extend_from_slice(&self.version.to_be_bytes());
        data.extend_from_slice(&self.link_type.to_be_bytes());
        data.extend_from_slice(&self.records);
        data
    }
}

/// H4 event packet: type, event code, parameter length, parameters.
pub fn hci_event(code: u8, params: &[u8]) -> Vec<u8> {
    let mut packet = vec![0x04, code, params.len() as u8];
    packet.extend_from_slice(params);
    packet
}

/// H4 command packet: type, opcode (LE), parameter length, parameters.
pub fn hci_command(opcode: u16, params: &[u8]) -> Vec<u8> {
    let mut packet = vec![0x01];
    packet.extend_from_slice(&opcode.to_le_bytes());
    packet.push(params.len() as u8);
    packet.extend_from_slice(params);
    packet
}

/// H4 ACL packet carrying one L2CAP frame on `cid`.
pub fn acl_l2cap(handle: u16, cid: u16, payload: &[u8]) -> Vec<u8> {
    let l2cap_len = payload.len() as u16;
    let acl_len = l2cap_len + 4;

    let mut packet = vec![0x02];
    packet.extend_from_slice(&handle.to_le_bytes());
    packet.extend_from_slice(&acl_len.to_le_bytes());
    packet.extend_from_slice(&l2cap_len.to_le_bytes());
    packet.extend_from_slice(&cid.to_le_bytes());
    packet.extend_from_slice(payload);
    packet
}
