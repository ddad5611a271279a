//! Raw capture record representation.

use std::fmt;

use chrono::{DateTime, Utc};

/// Microseconds between the btsnoop epoch (0001-01-01) and the Unix epoch.
const UNIX_EPOCH_OFFSET_US: i64 = 62_135_596_800_000_000;

/// Record timestamp in microseconds since 0001-01-01 00:00:00 UTC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Create a timestamp from microseconds since the btsnoop epoch.
    pub const fn from_micros(micros: u64) -> Self {
        Self(micros)
    }

    /// Microseconds since the btsnoop epoch, exactly as stored in the file.
    pub const fn as_micros(self) -> u64 {
        self.0
    }

    /// Convert to a calendar date-time.
    ///
    /// Values past the largest representable date-time saturate to it.
    pub fn to_datetime(self) -> DateTime<Utc> {
        let unix_us = i64::try_from(self.0)
            .unwrap_or(i64::MAX)
            .saturating_sub(UNIX_EPOCH_OFFSET_US);
        DateTime::from_timestamp_micros(unix_us).unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Signed microseconds from `earlier` to `self`.
    ///
    /// Captures are not guaranteed to be chronological, so this may be negative.
    pub fn micros_since(self, earlier: Timestamp) -> i64 {
        let delta = i128::from(self.0) - i128::from(earlier.0);
        delta.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::format::format_datetime(&self.to_datetime()))
    }
}

/// Direction of an HCI packet relative to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Host to controller
    Sent,
    /// Controller to host
    Received,
}

impl Direction {
    /// Bit 0 of the record flags is set for received packets.
    pub fn from_flags(flags: u32) -> Self {
        if flags & 0x01 != 0 {
            Direction::Received
        } else {
            Direction::Sent
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Sent => "sent",
            Direction::Received => "received",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single record from a btsnoop file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// Length of the packet as seen on the wire.
    pub original_length: u32,

    /// Number of payload bytes stored in the file.
    pub included_length: u32,

    /// Record flags; bit 0 is the direction.
    pub flags: u32,

    /// Packets dropped by the capturing host before this one.
    pub drops: u32,

    /// Capture time.
    pub timestamp: Timestamp,

    /// Stored bytes: HCI packet type followed by the packet body.
    pub payload: Vec<u8>,
}

impl RawRecord {
    pub fn direction(&self) -> Direction {
        Direction::from_flags(self.flags)
    }

    /// The H4 packet type byte, if the payload is not empty.
    pub fn packet_type(&self) -> Option<u8> {
        self.payload.first().copied()
    }

    /// Payload without the packet type byte.
    pub fn body(&self) -> &[u8] {
        self.payload.get(1..).unwrap_or(&[])
    }
}
