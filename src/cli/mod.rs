//! Command-line interface module.
//!
//! This module handles:
//! - Argument parsing via clap
//! - Report formatting (text report, JSON Lines)
//! - Writing the report to a file

mod args;
mod export;
mod output;

pub use args::Args;
pub use export::{default_report_path, Exporter};
pub use output::{OutputFormat, OutputFormatter};
