// Compact upstream dates <-> ISO-ish timestamps, and the default chart window

use chrono::{DateTime, Duration, Utc};

const COMPACT_LEN: usize = 14;

/// Reinterpret a compact `YYYYMMDDHHMMSS` string as `YYYY-MM-DDTHH:MM:SS`.
/// Pure fixed-offset slicing: no calendar validation, no timezone conversion.
/// Non-ASCII or too-short input passes through unchanged.
pub fn compact_to_iso(raw: &str) -> String {
    if raw.len() < COMPACT_LEN || !raw.is_ascii() {
        return raw.to_owned();
    }
    format!(
        "{}-{}-{}T{}:{}:{}",
        &raw[0..4],
        &raw[4..6],
        &raw[6..8],
        &raw[8..10],
        &raw[10..12],
        &raw[12..14]
    )
}

/// Format a timestamp in the compact form the upstream expects
/// (UTC, second precision, no punctuation).
pub fn to_compact(t: DateTime<Utc>) -> String {
    t.format("%Y%m%d%H%M%S").to_string()
}

/// Default chart window: the two weeks ending now.
pub fn two_week_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    (now - Duration::days(14), now)
}

/// Upstream numeric values arrive as strings; malformed input becomes NaN
/// and flows through to the consumer untouched.
pub fn parse_value(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(f64::NAN)
}
