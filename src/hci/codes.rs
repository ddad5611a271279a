//! Fixed HCI, L2CAP and ATT code tables.

use std::borrow::Cow;
use std::fmt;

/// HCI event codes.
pub mod event_code {
    pub const CONNECTION_COMPLETE: u8 = 0x03;
    pub const CONNECTION_REQUEST: u8 = 0x04;
    pub const DISCONNECTION_COMPLETE: u8 = 0x05;
    pub const LE_META: u8 = 0x3E;
}

/// LE meta event subevent codes.
pub mod subevent_code {
    pub const LE_CONNECTION_COMPLETE: u8 = 0x01;
    pub const LE_ADVERTISING_REPORT: u8 = 0x02;
    pub const LE_ENHANCED_CONNECTION_COMPLETE: u8 = 0x0A;
}

/// HCI command opcodes (OGF << 10 | OCF).
pub mod opcode {
    pub const CREATE_CONNECTION: u16 = 0x0405;
    pub const DISCONNECT: u16 = 0x0406;
    pub const LE_CREATE_CONNECTION: u16 = 0x200D;
}

/// L2CAP fixed channel carrying the Attribute Protocol.
pub const L2CAP_CID_ATT: u16 = 0x0004;

/// Connection handles are 12 bits; the top nibble holds packet flags.
pub const HANDLE_MASK: u16 = 0x0FFF;

/// Human-readable text for an HCI disconnection reason / error code.
pub fn reason_text(code: u8) -> Cow<'static, str> {
    let text = match code {
        0x00 => "Success",
        0x05 => "Authentication Failure",
        0x06 => "PIN or Key Missing",
        0x07 => "Memory Capacity Exceeded",
        0x08 => "Connection Timeout",
        0x09 => "Connection Limit Exceeded",
        0x0C => "Command Disallowed",
        0x13 => "Remote User Terminated Connection",
        0x14 => "Remote Device Terminated due to Low Resources",
        0x15 => "Remote Device Terminated due to Power Off",
        0x16 => "Connection Terminated by Local Host",
        0x1A => "Unsupported Remote Feature",
        0x22 => "LMP Response Timeout",
        0x3E => "Connection Failed to be Established",
        _ => return Cow::Owned(format!("Unknown(0x{code:02X})")),
    };
    Cow::Borrowed(text)
}

/// LE device address type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressKind {
    Public,
    Random,
    PublicIdentity,
    RandomIdentity,
    Unknown(u8),
}

impl AddressKind {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0x00 => AddressKind::Public,
            0x01 => AddressKind::Random,
            0x02 => AddressKind::PublicIdentity,
            0x03 => AddressKind::RandomIdentity,
            other => AddressKind::Unknown(other),
        }
    }
}

impl fmt::Display for AddressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressKind::Public => f.write_str("Public"),
            AddressKind::Random => f.write_str("Random"),
            AddressKind::PublicIdentity => f.write_str("Public Identity"),
            AddressKind::RandomIdentity => f.write_str("Random Identity"),
            AddressKind::Unknown(v) => write!(f, "Unknown({v})"),
        }
    }
}

/// Legacy advertising report event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    AdvInd,
    AdvDirectInd,
    AdvScanInd,
    AdvNonconnInd,
    ScanRsp,
    Unknown(u8),
}

impl ReportKind {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0x00 => ReportKind::AdvInd,
            0x01 => ReportKind::AdvDirectInd,
            0x02 => ReportKind::AdvScanInd,
            0x03 => ReportKind::AdvNonconnInd,
            0x04 => ReportKind::ScanRsp,
            other => ReportKind::Unknown(other),
        }
    }

    /// The raw event type byte.
    pub fn code(&self) -> u8 {
        match self {
            ReportKind::AdvInd => 0x00,
            ReportKind::AdvDirectInd => 0x01,
            ReportKind::AdvScanInd => 0x02,
            ReportKind::AdvNonconnInd => 0x03,
            ReportKind::ScanRsp => 0x04,
            ReportKind::Unknown(v) => *v,
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportKind::AdvInd => f.write_str("ADV_IND"),
            ReportKind::AdvDirectInd => f.write_str("ADV_DIRECT_IND"),
            ReportKind::AdvScanInd => f.write_str("ADV_SCAN_IND"),
            ReportKind::AdvNonconnInd => f.write_str("ADV_NONCONN_IND"),
            ReportKind::ScanRsp => f.write_str("SCAN_RSP"),
            ReportKind::Unknown(v) => write!(f, "Unknown({v})"),
        }
    }
}

/// ATT read/write operations that are turned into GATT events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttOpcode {
    ReadByTypeRequest,
    ReadByTypeResponse,
    ReadRequest,
    ReadResponse,
    ReadByGroupTypeRequest,
    ReadByGroupTypeResponse,
    WriteRequest,
    WriteResponse,
    PrepareWriteRequest,
    PrepareWriteResponse,
    ExecuteWriteRequest,
    ExecuteWriteResponse,
    WriteCommand,
}

impl AttOpcode {
    /// Returns `None` for opcodes outside the read/write family.
    pub fn from_u8(value: u8) -> Option<Self> {
        let opcode = match value {
            0x08 => AttOpcode::ReadByTypeRequest,
            0x09 => AttOpcode::ReadByTypeResponse,
            0x0A => AttOpcode::ReadRequest,
            0x0B => AttOpcode::ReadResponse,
            0x10 => AttOpcode::ReadByGroupTypeRequest,
            0x11 => AttOpcode::ReadByGroupTypeResponse,
            0x12 => AttOpcode::WriteRequest,
            0x13 => AttOpcode::WriteResponse,
            0x16 => AttOpcode::PrepareWriteRequest,
            0x17 => AttOpcode::PrepareWriteResponse,
            0x18 => AttOpcode::ExecuteWriteRequest,
            0x19 => AttOpcode::ExecuteWriteResponse,
            0x52 => AttOpcode::WriteCommand,
            _ => return None,
        };
        Some(opcode)
    }

    pub fn code(&self) -> u8 {
        match self {
            AttOpcode::ReadByTypeRequest => 0x08,
            AttOpcode::ReadByTypeResponse => 0x09,
            AttOpcode::ReadRequest => 0x0A,
            AttOpcode::ReadResponse => 0x0B,
            AttOpcode::ReadByGroupTypeRequest => 0x10,
            AttOpcode::ReadByGroupTypeResponse => 0x11,
            AttOpcode::WriteRequest => 0x12,
            AttOpcode::WriteResponse => 0x13,
            AttOpcode::PrepareWriteRequest => 0x16,
            AttOpcode::PrepareWriteResponse => 0x17,
            AttOpcode::ExecuteWriteRequest => 0x18,
            AttOpcode::ExecuteWriteResponse => 0x19,
            AttOpcode::WriteCommand => 0x52,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AttOpcode::ReadByTypeRequest => "Read By Type Request",
            AttOpcode::ReadByTypeResponse => "Read By Type Response",
            AttOpcode::ReadRequest => "Read Request",
            AttOpcode::ReadResponse => "Read Response",
            AttOpcode::ReadByGroupTypeRequest => "Read By Group Type Request",
            AttOpcode::ReadByGroupTypeResponse => "Read By Group Type Response",
            AttOpcode::WriteRequest => "Write Request",
            AttOpcode::WriteResponse => "Write Response",
            AttOpcode::PrepareWriteRequest => "Prepare Write Request",
            AttOpcode::PrepareWriteResponse => "Prepare Write Response",
            AttOpcode::ExecuteWriteRequest => "Execute Write Request",
            AttOpcode::ExecuteWriteResponse => "Execute Write Response",
            AttOpcode::WriteCommand => "Write Command",
        }
    }

    /// Whether the PDU starts with a 16-bit attribute handle.
    pub fn carries_handle(&self) -> bool {
        matches!(
            self,
            AttOpcode::ReadRequest
                | AttOpcode::WriteRequest
                | AttOpcode::WriteCommand
                | AttOpcode::PrepareWriteRequest
        )
    }
}

impl fmt::Display for AttOpcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_reason() {
        assert_eq!(reason_text(0x13), "Remote User Terminated Connection");
        assert_eq!(reason_text(0x08), "Connection Timeout");
    }

    #[test]
    fn test_unknown_reason_shows_hex() {
        assert_eq!(reason_text(0x42), "Unknown(0x42)");
        assert_eq!(reason_text(0xAB), "Unknown(0xAB)");
    }

    #[test]
    fn test_address_kind_lookup() {
        assert_eq!(AddressKind::from_u8(0x01).to_string(), "Random");
        assert_eq!(AddressKind::from_u8(0x03).to_string(), "Random Identity");
        assert_eq!(AddressKind::from_u8(0x09).to_string(), "Unknown(9)");
    }

    #[test]
    fn test_report_kind_lookup() {
        assert_eq!(ReportKind::from_u8(0x00).to_string(), "ADV_IND");
        assert_eq!(ReportKind::from_u8(0x04).to_string(), "SCAN_RSP");
        assert_eq!(ReportKind::from_u8(0x07).to_string(), "Unknown(7)");
        assert_eq!(ReportKind::from_u8(0x07).code(), 0x07);
    }

    #[test]
    fn test_att_opcode_table_covers_thirteen_operations() {
        let recognized: Vec<_> = (0..=u8::MAX).filter_map(AttOpcode::from_u8).collect();
        assert_eq!(recognized.len(), 13);

        for opcode in recognized {
            assert_eq!(AttOpcode::from_u8(opcode.code()), Some(opcode));
        }
    }

    #[test]
    fn test_att_opcodes_with_handle() {
        assert!(AttOpcode::ReadRequest.carries_handle());
        assert!(AttOpcode::WriteCommand.carries_handle());
        assert!(!AttOpcode::ReadResponse.carries_handle());
        assert!(!AttOpcode::ExecuteWriteRequest.carries_handle());
    }
}
