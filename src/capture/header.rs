//! btsnoop file header.

use crate::error::{FormatError, FormatWarning};

/// Magic bytes at the start of every btsnoop file.
pub const BTSNOOP_MAGIC: [u8; 8] = *b"btsnoop\0";

/// The only format version this decoder knows.
pub const BTSNOOP_VERSION: u32 = 1;

/// Datalink type for HCI UART (H4) captures, which carry a packet type byte.
pub const DATALINK_HCI_UART: u32 = 1002;

/// Size of the file header in bytes.
pub const HEADER_LEN: usize = 16;

/// Parsed btsnoop file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureHeader {
    /// Format version (big-endian on disk).
    pub version: u32,

    /// Datalink type (big-endian on disk).
    pub link_type: u32,
}

impl CaptureHeader {
    /// Parse the 16-byte file header.
    ///
    /// Only a short buffer or a bad magic is fatal. An unexpected version or
    /// datalink type is reported through [`CaptureHeader::warnings`].
    pub fn parse(data: &[u8]) -> Result<Self, FormatError> {
        let Some(header) = data.get(..HEADER_LEN) else {
            return Err(FormatError::HeaderTooShort { have: data.len() });
        };

        let mut magic = [0u8; 8];
        magic.copy_from_slice(&header[..8]);
        if magic != BTSNOOP_MAGIC {
            return Err(FormatError::BadMagic { found: magic });
        }

        Ok(Self {
            version: u32::from_be_bytes([header[8], header[9], header[10], header[11]]),
            link_type: u32::from_be_bytes([header[12], header[13], header[14], header[15]]),
        })
    }

    /// Non-fatal deviations from the expected header values.
    pub fn warnings(&self) -> Vec<FormatWarning> {
        let mut warnings = Vec::new();
        if self.version != BTSNOOP_VERSION {
            warnings.push(FormatWarning::UnexpectedVersion {
                found: self.version,
                expected: BTSNOOP_VERSION,
            });
        }
        if self.link_type != DATALINK_HCI_UART {
            warnings.push(FormatWarning::UnexpectedLinkType {
                found: self.link_type,
                expected: DATALINK_HCI_UART,
            });
        }
        warnings
    }
}
