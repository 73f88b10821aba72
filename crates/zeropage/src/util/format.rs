use chrono::{DateTime, Local, Utc};
use std::time::Duration;

pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    let secs = duration.as_secs();
    let minutes = secs / 60;
    let seconds = secs % 60;

    if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else if secs > 0 {
        format!("{}s", seconds)
    } else {
        format!("{}ms", millis)
    }
}

pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    let local: DateTime<Local> = DateTime::from(*dt);
    local.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Elapsed time between two timestamps; negative spans count as zero.
pub fn elapsed(start: &DateTime<Utc>, end: &DateTime<Utc>) -> Duration {
    (*end - *start).to_std().unwrap_or_default()
}
