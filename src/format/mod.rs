//! Value formatting utilities for report output.
//!
//! Provides formatting functions for displaying decoded values:
//! - Capture timestamps (calendar date-time with optional microseconds)
//! - Signed durations (`H:MM:SS` with optional microseconds)

mod time;

pub use time::{format_datetime, format_duration};
