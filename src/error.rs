//! Error types for btsnoop decoding.

use thiserror::Error;

/// Main error type for btsnoop operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The capture is not a usable btsnoop file
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fatal problems with the capture file itself.
#[derive(Error, Debug)]
pub enum FormatError {
    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Fewer than 16 bytes before the first record
    #[error("File too small to be a valid btsnoop file ({have} header bytes)")]
    HeaderTooShort { have: usize },

    /// Magic bytes are not `btsnoop\0`
    #[error("Invalid btsnoop magic: {found:02x?}")]
    BadMagic { found: [u8; 8] },
}

/// Header oddities that are reported but do not stop decoding.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatWarning {
    #[error("Unexpected version {found}, expected {expected}")]
    UnexpectedVersion { found: u32, expected: u32 },

    #[error("Unexpected datalink type {found}, expected {expected}")]
    UnexpectedLinkType { found: u32, expected: u32 },
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
