//! Saving reports to disk.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::{OutputFormat, OutputFormatter};
use crate::event::EventStore;

/// Writes decoded events to files.
pub struct Exporter;

impl Exporter {
    /// Write `store` to `path` in the given format.
    ///
    /// Returns the number of events written.
    pub fn export<P: AsRef<Path>>(
        path: P,
        format: OutputFormat,
        store: &EventStore,
    ) -> std::io::Result<usize> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);

        OutputFormatter::new(format).write(store, &mut writer)?;
        writer.flush()?;

        Ok(store.event_count())
    }
}

/// `<input without its last extension>_parsed.txt`, next to the input.
pub fn default_report_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "btsnoop".to_string());
    input.with_file_name(format!("{stem}_parsed.txt"))
}
