//! Human-readable timestamps for the result footer and the rate-limit countdown.

use chrono::{DateTime, Local, NaiveDate, Utc};

/// "just now", "5 minutes ago", "1 day ago", ...
pub fn format_relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    if seconds < 60 {
        return "just now".to_string();
    }

    let (amount, unit) = if seconds < 3_600 {
        (seconds / 60, "minute")
    } else if seconds < 86_400 {
        (seconds / 3_600, "hour")
    } else {
        (seconds / 86_400, "day")
    };

    let plural = if amount == 1 { "" } else { "s" };
    format!("{} {}{} ago", amount, unit, plural)
}

/// Compact duration with at most two units: "45s", "2m 5s", "1h", "2d 4h".
pub fn format_duration(total_seconds: u64) -> String {
    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;

    let (major, minor) = if days > 0 {
        ((days, 'd'), (hours, 'h'))
    } else if hours > 0 {
        ((hours, 'h'), (minutes, 'm'))
    } else if minutes > 0 {
        ((minutes, 'm'), (seconds, 's'))
    } else {
        return format!("{}s", seconds);
    };

    if minor.0 == 0 {
        format!("{}{}", major.0, major.1)
    } else {
        format!("{}{} {}{}", major.0, major.1, minor.0, minor.1)
    }
}

/// Time left until `until`, or `None` once it has passed.
pub fn format_expires_in(until: DateTime<Utc>, now: DateTime<Utc>) -> Option<String> {
    let remaining = (until - now).num_seconds();
    (remaining > 0).then(|| format_duration(remaining as u64))
}

/// YYYYMMDD stamp used in exported file names
pub fn date_stamp(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

pub fn today_stamp() -> String {
    date_stamp(Local::now().date_naive())
}
