//! Date-time and duration formatting.

use chrono::{DateTime, Timelike, Utc};

/// Format as `YYYY-MM-DD HH:MM:SS`, adding `.ffffff` only when the
/// sub-second part is non-zero.
pub fn format_datetime(datetime: &DateTime<Utc>) -> String {
    if datetime.nanosecond() == 0 {
        datetime.format("%Y-%m-%d %H:%M:%S").to_string()
    } else {
        datetime.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
    }
}

/// Microseconds in one day.
const DAY_US: i64 = 86_400_000_000;

/// Format signed microseconds as `H:MM:SS`, adding `.ffffff` only when the
/// sub-second part is non-zero.
///
/// Spans of a day or more get a `N day(s), ` prefix. Negative spans count
/// whole days downward and keep the time of day positive, so -2s renders as
/// `-1 day, 23:59:58`.
pub fn format_duration(micros: i64) -> String {
    let days = micros.div_euclid(DAY_US);
    let rest = micros.rem_euclid(DAY_US);

    let fraction = rest % 1_000_000;
    let total_secs = rest / 1_000_000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    let mut out = String::new();
    if days != 0 {
        let plural = if days.abs() == 1 { "" } else { "s" };
        out.push_str(&format!("{days} day{plural}, "));
    }
    out.push_str(&format!("{hours}:{minutes:02}:{seconds:02}"));
    if fraction != 0 {
        out.push_str(&format!(".{fraction:06}"));
    }
    out
}
