//! btsnoop file reader.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use tracing::{debug, warn};

use super::{CaptureHeader, RawRecord, Timestamp, HEADER_LEN};
use crate::error::{Error, FormatError, Result};

/// Buffer size for reading capture files (64KB).
const BUFFER_SIZE: usize = 65536;

/// Gzip magic bytes.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Size of each per-record header in bytes.
pub const RECORD_HEADER_LEN: usize = 24;

/// Sequential reader over the records of a btsnoop capture.
///
/// Running out of bytes in a record header or payload ends the capture
/// cleanly; the partial record is discarded. Once ended, the reader stays
/// ended.
pub struct CaptureReader<R> {
    inner: R,
    header: CaptureHeader,
    record_count: u64,
    finished: bool,
}

impl CaptureReader<BufReader<Box<dyn Read + Send>>> {
    /// Open a btsnoop file for reading.
    ///
    /// Automatically detects and decompresses gzipped files.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let is_gzipped = is_gzip_file(path)?;

        let file = open_file(path)?;
        let reader: Box<dyn Read + Send> = if is_gzipped {
            Box::new(GzDecoder::new(file))
        } else {
            Box::new(file)
        };

        Self::new(BufReader::with_capacity(BUFFER_SIZE, reader))
    }
}

impl<R: Read> CaptureReader<R> {
    /// Read and validate the file header from `inner`.
    pub fn new(mut inner: R) -> Result<Self> {
        let mut bytes = [0u8; HEADER_LEN];
        let have = read_full(&mut inner, &mut bytes)?;
        let header = CaptureHeader::parse(&bytes[..have])?;

        for warning in header.warnings() {
            warn!("{warning}");
        }

        Ok(Self {
            inner,
            header,
            record_count: 0,
            finished: false,
        })
    }

    /// The validated file header.
    pub fn header(&self) -> &CaptureHeader {
        &self.header
    }

    /// Number of complete records returned so far.
    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    /// Read the next complete record.
    ///
    /// Returns `Ok(None)` at end of capture, including when the capture is
    /// cut off inside a record.
    pub fn next_record(&mut self) -> Result<Option<RawRecord>> {
        if self.finished {
            return Ok(None);
        }

        let mut header = [0u8; RECORD_HEADER_LEN];
        let have = read_full(&mut self.inner, &mut header)?;
        if have < RECORD_HEADER_LEN {
            if have > 0 {
                debug!(
                    record = self.record_count + 1,
                    have, "record header truncated, ending capture"
                );
            }
            return Ok(self.finish());
        }

        let be32 = |at: usize| {
            u32::from_be_bytes([header[at], header[at + 1], header[at + 2], header[at + 3]])
        };
        let original_length = be32(0);
        let included_length = be32(4);
        let flags = be32(8);
        let drops = be32(12);
        let mut ts = [0u8; 8];
        ts.copy_from_slice(&header[16..24]);
        let timestamp = Timestamp::from_micros(u64::from_be_bytes(ts));

        let payload = read_payload(&mut self.inner, included_length)?;
        if payload.len() < included_length as usize {
            debug!(
                record = self.record_count + 1,
                declared = included_length,
                have = payload.len(),
                "record payload truncated, ending capture"
            );
            return Ok(self.finish());
        }

        self.record_count += 1;
        Ok(Some(RawRecord {
            original_length,
            included_length,
            flags,
            drops,
            timestamp,
            payload,
        }))
    }

    fn finish(&mut self) -> Option<RawRecord> {
        self.finished = true;
        None
    }
}

/// Iterator adapter for CaptureReader.
impl<R: Read> Iterator for CaptureReader<R> {
    type Item = Result<RawRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// Fill `buf` as far as the reader allows, returning the number of bytes read.
///
/// A stream that ends early, either with a 0-byte read or with
/// `UnexpectedEof` (as a cut-off gzip member reports it), just stops the fill.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Read up to `len` payload bytes, growing with the data actually present
/// instead of allocating the declared length up front.
///
/// Returns fewer than `len` bytes when the stream ends early.
fn read_payload<R: Read>(reader: &mut R, len: u32) -> io::Result<Vec<u8>> {
    let mut payload = Vec::new();
    match reader.take(u64::from(len)).read_to_end(&mut payload) {
        Ok(_) => Ok(payload),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(payload),
        Err(e) => Err(e),
    }
}

fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::Format(FormatError::FileNotFound {
            path: path.display().to_string(),
        }),
        _ => Error::Io(e),
    })
}

/// Check if a file is gzipped by extension or magic bytes.
fn is_gzip_file(path: &Path) -> Result<bool> {
    if is_gzip_extension(path) {
        return Ok(true);
    }

    let mut file = open_file(path)?;
    let mut magic = [0u8; 2];
    match file.read_exact(&mut magic) {
        Ok(()) => Ok(magic == GZIP_MAGIC),
        Err(_) => Ok(false), // File too short to be gzipped
    }
}

/// Check if a path appears to be a gzip file by extension only.
pub fn is_gzip_extension<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .file_name()
        .and_then(|f| f.to_str())
        .is_some_and(|name| name.to_lowercase().ends_with(".gz"))
}
