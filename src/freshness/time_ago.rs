use chrono::{DateTime, Utc};

/// Coarse units, largest first. A unit only applies once the delta is
/// strictly larger than one of it.
const UNITS: [(&str, i64); 5] = [
    ("years", 31_536_000),
    ("months", 2_592_000),
    ("days", 86_400),
    ("hours", 3_600),
    ("minutes", 60),
];

/// Human-readable age of `date` as seen at `now`.
pub fn time_ago(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - date).num_milliseconds().div_euclid(1000);
    time_ago_secs(seconds)
}

pub fn time_ago_secs(seconds: i64) -> String {
    for (unit, divisor) in UNITS {
        if seconds > divisor {
            return format!("{} {} ago", seconds / divisor, unit);
        }
    }
    format!("{} seconds ago", seconds)
}
