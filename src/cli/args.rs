//! Command-line argument definitions.

use clap::Parser;
use std::path::PathBuf;

use super::OutputFormat;

/// Decode a btsnoop HCI capture into connection, advertisement and GATT events.
#[derive(Parser, Debug)]
#[command(name = "btsnoop")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// btsnoop capture to decode (may be gzipped)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Write the report to this file [default: <FILE>_parsed.txt]
    #[arg(short = 'o', long = "output", value_name = "OUTPUT_FILE")]
    pub output: Option<PathBuf>,

    /// Do not write a report file
    #[arg(long = "no-save", conflicts_with = "output")]
    pub no_save: bool,

    /// Output format for stdout and the report file
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Do not print the report to stdout
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Where the report should be saved, if anywhere.
    pub fn report_path(&self) -> Option<PathBuf> {
        if self.no_save {
            return None;
        }
        Some(
            self.output
                .clone()
                .unwrap_or_else(|| super::default_report_path(&self.file)),
        )
    }
}
