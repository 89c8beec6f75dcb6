//! Display formatting shared by view models.

use chrono::{DateTime, Utc};

const UNITS: [(u64, &str); 5] = [
    (1 << 50, " PB"),
    (1 << 40, " TB"),
    (1 << 30, " GB"),
    (1 << 20, " MB"),
    (1 << 10, " KB"),
];

/// Human-readable size with whole units: `"3 MB"`, `"1 byte"`, `"0 bytes"`.
pub fn human_size(bytes: u64) -> String {
    for (factor, suffix) in UNITS {
        if bytes >= factor {
            return format!("{}{suffix}", bytes / factor);
        }
    }
    if bytes == 1 {
        "1 byte".to_string()
    } else {
        format!("{bytes} bytes")
    }
}

/// Timestamp as shown in file listings, e.g. `2013/06/04 03:07 PM`.
pub fn display_date(at: DateTime<Utc>) -> String {
    at.format("%Y/%m/%d %I:%M %p").to_string()
}

/// Seconds since the Unix epoch, used as a sort key by grid clients.
pub fn epoch_seconds(at: DateTime<Utc>) -> f64 {
    at.timestamp() as f64
}
