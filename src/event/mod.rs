//! Typed events recovered from HCI traffic.
//!
//! Every event carries the timestamp of the record it was decoded from.

mod store;

use std::borrow::Cow;
use std::fmt;

use crate::capture::{Direction, Timestamp};
use crate::hci::{reason_text, AddressKind, AttOpcode, ReportKind};

pub use store::EventStore;

/// Bluetooth device address, kept in wire (little-endian) byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BdAddr([u8; 6]);

impl BdAddr {
    pub const fn new(wire: [u8; 6]) -> Self {
        Self(wire)
    }

    /// Take the first six bytes of `bytes` as an address.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let wire: [u8; 6] = bytes.get(..6)?.try_into().ok()?;
        Some(Self(wire))
    }
}

/// Displayed most significant byte first, e.g. `06:05:04:03:02:01`.
impl fmt::Display for BdAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.0;
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            b[5], b[4], b[3], b[2], b[1], b[0]
        )
    }
}

/// Kind of link being set up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    Acl,
    Sco,
    Le,
    LeEnhanced,
}

impl LinkKind {
    /// BR/EDR link type byte: 0x00 is SCO, anything else is treated as ACL.
    pub fn from_link_type(value: u8) -> Self {
        if value == 0x00 {
            LinkKind::Sco
        } else {
            LinkKind::Acl
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LinkKind::Acl => "ACL",
            LinkKind::Sco => "SCO",
            LinkKind::Le => "LE",
            LinkKind::LeEnhanced => "LE Enhanced",
        }
    }
}

/// Local role on an LE connection (central is reported as "Master").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Master,
    Slave,
}

impl Role {
    pub fn from_u8(value: u8) -> Self {
        if value == 0x00 {
            Role::Master
        } else {
            Role::Slave
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Master => f.write_str("Master"),
            Role::Slave => f.write_str("Slave"),
        }
    }
}

/// Which step of connection setup produced a [`ConnectionEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Request,
    Complete { status: u8 },
    CreateConnectionCommand,
    LeCreateCommand,
    LeConnectionComplete { status: u8, handle: u16 },
    LeEnhancedConnectionComplete { status: u8, handle: u16 },
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lifecycle::Request => f.write_str("request"),
            Lifecycle::Complete { status } => write!(f, "complete (status={status})"),
            Lifecycle::CreateConnectionCommand => f.write_str("create_connection_cmd"),
            Lifecycle::LeCreateCommand => f.write_str("le_create_connection_cmd"),
            Lifecycle::LeConnectionComplete { status, handle } => write!(
                f,
                "le_connection_complete (status={status}, handle=0x{handle:04X})"
            ),
            Lifecycle::LeEnhancedConnectionComplete { status, handle } => write!(
                f,
                "le_enhanced_connection_complete (status={status}, handle=0x{handle:04X})"
            ),
        }
    }
}

/// A connection request, completion, or connection-creating command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionEvent {
    pub timestamp: Timestamp,
    pub direction: Direction,
    pub address: BdAddr,
    pub link: LinkKind,
    /// Only reported by LE connection complete events.
    pub role: Option<Role>,
    /// Only reported by LE connection complete events.
    pub address_kind: Option<AddressKind>,
    pub lifecycle: Lifecycle,
}

impl ConnectionEvent {
    /// Link description such as `ACL` or `LE (Master, Public)`.
    pub fn link_description(&self) -> String {
        match (self.role, self.address_kind) {
            (Some(role), Some(kind)) => format!("{} ({role}, {kind})", self.link.as_str()),
            _ => self.link.as_str().to_string(),
        }
    }
}

/// Where a disconnection was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisconnectOrigin {
    /// Disconnection Complete event from the controller
    Event,
    /// Disconnect command issued by the host
    Command,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisconnectionEvent {
    pub timestamp: Timestamp,
    /// 12-bit connection handle.
    pub handle: u16,
    pub reason: u8,
    pub origin: DisconnectOrigin,
}

impl DisconnectionEvent {
    /// Reason text; host-issued disconnects are prefixed to tell them apart.
    pub fn reason_text(&self) -> Cow<'static, str> {
        match self.origin {
            DisconnectOrigin::Event => reason_text(self.reason),
            DisconnectOrigin::Command => {
                Cow::Owned(format!("Disconnect Command: {}", reason_text(self.reason)))
            }
        }
    }
}

/// One entry of an LE Advertising Report event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvertisementReport {
    pub timestamp: Timestamp,
    pub kind: ReportKind,
    pub address_kind: AddressKind,
    pub address: BdAddr,
    /// dBm; 0 when the RSSI byte was missing.
    pub rssi: i8,
    pub data: Vec<u8>,
}

/// An ATT read or write PDU carried over L2CAP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GattOperation {
    pub timestamp: Timestamp,
    pub direction: Direction,
    pub opcode: AttOpcode,
    /// Attribute handle for requests/commands that address one.
    pub handle: Option<u16>,
    /// PDU bytes following the opcode.
    pub data: Vec<u8>,
}

impl GattOperation {
    pub fn operation(&self) -> &'static str {
        self.opcode.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bd_addr_display_is_reversed() {
        let addr = BdAddr::new([0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);
        assert_eq!(addr.to_string(), "06:05:04:03:02:01");
    }

    #[test]
    fn test_bd_addr_from_short_slice() {
        assert!(BdAddr::from_slice(&[0x01, 0x02, 0x03]).is_none());
        assert!(BdAddr::from_slice(&[0xaa; 8]).is_some());
    }

    #[test]
    fn test_link_description() {
        let mut event = ConnectionEvent {
            timestamp: Timestamp::from_micros(0),
            direction: Direction::Received,
            address: BdAddr::new([0; 6]),
            link: LinkKind::Le,
            role: Some(Role::Slave),
            address_kind: Some(AddressKind::Random),
            lifecycle: Lifecycle::LeConnectionComplete {
                status: 0,
                handle: 0x40,
            },
        };
        assert_eq!(event.link_description(), "LE (Slave, Random)");
        assert_eq!(
            event.lifecycle.to_string(),
            "le_connection_complete (status=0, handle=0x0040)"
        );

        event.role = None;
        event.address_kind = None;
        event.lifecycle = Lifecycle::LeCreateCommand;
        assert_eq!(event.link_description(), "LE");
    }

    #[test]
    fn test_command_disconnect_reason_is_prefixed() {
        let mut event = DisconnectionEvent {
            timestamp: Timestamp::from_micros(0),
            handle: 1,
            reason: 0x13,
            origin: DisconnectOrigin::Event,
        };
        assert_eq!(event.reason_text(), "Remote User Terminated Connection");

        event.origin = DisconnectOrigin::Command;
        assert_eq!(
            event.reason_text(),
            "Disconnect Command: Remote User Terminated Connection"
        );
    }
}
